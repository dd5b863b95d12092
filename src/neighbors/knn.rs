use crate::dataset::Dataset;
use crate::error::{MlError, Result};
use crate::preprocessing::StandardScaler;
use crate::{Matrix, Vector};
use log::info;
use ndarray::ArrayView1;
use rand::Rng;

pub fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

fn check_k(k: usize, n_samples: usize) -> Result<()> {
    if k == 0 || k > n_samples {
        return Err(MlError::InvalidParameter(format!("k must be in 1..={n_samples}, got {k}")));
    }
    Ok(())
}

/// Labels of the `k` training rows closest to `query`, nearest first.
/// Rows at equal distance keep their training order.
fn nearest_labels(
    features: &Matrix,
    labels: &Vector,
    query: ArrayView1<f64>,
    k: usize,
) -> Result<Vec<f64>> {
    if features.nrows() != labels.len() {
        return Err(MlError::shape("labels", features.nrows(), labels.len()));
    }
    if query.len() != features.ncols() {
        return Err(MlError::shape("query features", features.ncols(), query.len()));
    }
    check_k(k, features.nrows())?;

    let mut by_distance: Vec<(f64, f64)> = features
        .rows()
        .into_iter()
        .zip(labels.iter())
        .map(|(row, &label)| (euclidean_distance(row, query), label))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(by_distance.into_iter().take(k).map(|(_, label)| label).collect())
}

/// Mean label of the `k` nearest training rows.
pub fn knn_regress(
    features: &Matrix,
    labels: &Vector,
    query: ArrayView1<f64>,
    k: usize,
) -> Result<f64> {
    let nearest = nearest_labels(features, labels, query, k)?;
    Ok(nearest.iter().sum::<f64>() / k as f64)
}

/// Most frequent label among the `k` nearest training rows. A tied vote goes
/// to the smallest label.
pub fn knn_classify(
    features: &Matrix,
    labels: &Vector,
    query: ArrayView1<f64>,
    k: usize,
) -> Result<f64> {
    let mut nearest = nearest_labels(features, labels, query, k)?;
    nearest.sort_by(f64::total_cmp);

    let mut best = (nearest[0], 0usize);
    let mut run = (nearest[0], 0usize);
    for label in nearest {
        if label == run.0 {
            run.1 += 1;
        } else {
            run = (label, 1);
        }
        if run.1 > best.1 {
            best = run;
        }
    }
    Ok(best.0)
}

/// Training rows kept by a fitted neighbours model, optionally standardised.
#[derive(Clone, Debug)]
struct Memory {
    scaler: Option<StandardScaler>,
    features: Matrix,
    labels: Vector,
}

impl Memory {
    fn new(x: &Matrix, y: &Vector, standardize: bool) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlError::shape("labels", x.nrows(), y.len()));
        }
        if x.nrows() == 0 {
            return Err(MlError::EmptyInput("training set"));
        }

        let (scaler, features) = if standardize {
            let scaler = StandardScaler::fit(x)?;
            let features = scaler.transform(x)?;
            (Some(scaler), features)
        } else {
            (None, x.clone())
        };

        Ok(Self {
            scaler,
            features,
            labels: y.clone(),
        })
    }

    fn predict_with(
        &self,
        x: &Matrix,
        k: usize,
        rule: fn(&Matrix, &Vector, ArrayView1<f64>, usize) -> Result<f64>,
    ) -> Result<Vector> {
        let queries = match &self.scaler {
            Some(scaler) => scaler.transform(x)?,
            None => x.clone(),
        };

        queries
            .rows()
            .into_iter()
            .map(|query| rule(&self.features, &self.labels, query, k))
            .collect::<Result<Vec<f64>>>()
            .map(Vector::from)
    }
}

/// k-nearest-neighbour regression: predicts the mean label of the nearest rows.
#[derive(Clone, Debug)]
pub struct KNeighborsRegressor {
    k: usize,
    standardize: bool,
    memory: Option<Memory>,
}

impl KNeighborsRegressor {
    /// `k` is checked against the training set at `fit`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            standardize: false,
            memory: None,
        }
    }

    /// Measure distances on features standardised with training statistics.
    pub fn standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        let memory = Memory::new(x, y, self.standardize)?;
        check_k(self.k, memory.features.nrows())?;
        self.memory = Some(memory);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let memory = self
            .memory
            .as_ref()
            .ok_or(MlError::NotFitted("KNeighborsRegressor"))?;
        memory.predict_with(x, self.k, knn_regress)
    }

    /// R² of the predictions on `x` against `y`.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

/// k-nearest-neighbour classification by majority vote.
#[derive(Clone, Debug)]
pub struct KNeighborsClassifier {
    k: usize,
    standardize: bool,
    memory: Option<Memory>,
}

impl KNeighborsClassifier {
    /// `k` is checked against the training set at `fit`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            standardize: false,
            memory: None,
        }
    }

    pub fn standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        let memory = Memory::new(x, y, self.standardize)?;
        check_k(self.k, memory.features.nrows())?;
        self.memory = Some(memory);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let memory = self
            .memory
            .as_ref()
            .ok_or(MlError::NotFitted("KNeighborsClassifier"))?;
        memory.predict_with(x, self.k, knn_classify)
    }

    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::accuracy_score(y, &y_pred)
    }
}

/// Classification accuracy on a random held-out set for each `k`.
///
/// The dataset is shuffled once and split into `test_count` test rows and a
/// training set; every `k` is evaluated on that same split, using the first
/// label column.
pub fn k_accuracy_sweep<R, I>(
    dataset: &Dataset,
    test_count: usize,
    ks: I,
    rng: &mut R,
) -> Result<Vec<(usize, f64)>>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let (test, train) = dataset.shuffle_split(test_count, rng)?;
    let train_labels = train.targets();
    let test_labels = test.targets();

    let mut results = Vec::new();
    for k in ks {
        let mut model = KNeighborsClassifier::new(k);
        model.fit(&train.features, &train_labels)?;
        let accuracy = model.score(&test.features, &test_labels)?;
        info!("accuracy: {} for k={}", accuracy, k);
        results.push((k, accuracy));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_knn_regress_nearest_neighbour() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let labels = array![0.0, 1.0, 2.0, 3.0];

        let prediction = knn_regress(&features, &labels, array![1.1].view(), 1).unwrap();
        assert_eq!(prediction, 1.0);

        let prediction = knn_regress(&features, &labels, array![1.1].view(), 2).unwrap();
        assert!((prediction - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_knn_classify_majority() {
        let features = array![[10.0], [11.0], [12.0], [30.0], [31.0]];
        let labels = array![1.0, 2.0, 2.0, 1.0, 1.0];

        let bucket = knn_classify(&features, &labels, array![11.2].view(), 3).unwrap();
        assert_eq!(bucket, 2.0);
    }

    #[test]
    fn test_knn_classify_tie_prefers_smallest_label() {
        let features = array![[0.0], [1.0], [-1.0], [2.0]];
        let labels = array![4.0, 3.0, 4.0, 3.0];

        let bucket = knn_classify(&features, &labels, array![0.0].view(), 4).unwrap();
        assert_eq!(bucket, 3.0);
    }

    #[test]
    fn test_euclidean_distance() {
        let d = euclidean_distance(array![0.0, 0.0].view(), array![3.0, 4.0].view());
        assert_eq!(d, 5.0);
    }

    #[test]
    fn test_invalid_k_and_shapes() {
        let features = array![[0.0], [1.0]];
        let labels = array![0.0, 1.0];

        assert!(knn_regress(&features, &labels, array![0.5].view(), 0).is_err());
        assert!(knn_regress(&features, &labels, array![0.5].view(), 3).is_err());
        assert!(knn_regress(&features, &labels, array![0.5, 1.0].view(), 1).is_err());
        assert!(knn_regress(&features, &array![0.0], array![0.5].view(), 1).is_err());

        let mut model = KNeighborsClassifier::new(3);
        assert!(model.fit(&features, &labels).is_err());
    }

    #[test]
    fn test_zero_k_rejected_at_fit() {
        let x = array![[0.0], [1.0]];
        let y = array![0.0, 1.0];

        let mut classifier = KNeighborsClassifier::new(0);
        assert!(matches!(classifier.fit(&x, &y), Err(MlError::InvalidParameter(_))));
        assert!(matches!(
            classifier.predict(&x),
            Err(MlError::NotFitted("KNeighborsClassifier"))
        ));

        let mut regressor = KNeighborsRegressor::new(0);
        assert!(regressor.fit(&x, &y).is_err());

        let dataset = Dataset::from_targets(x, y).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(k_accuracy_sweep(&dataset, 1, [0], &mut rng).is_err());
    }

    #[test]
    fn test_regressor_standardizes_with_training_statistics() {
        // second feature dominates raw distance unless standardised
        let x = array![[0.0, 0.0], [1.0, 1000.0], [2.0, 0.0], [3.0, 1000.0]];
        let y = array![0.0, 10.0, 20.0, 30.0];

        let mut raw = KNeighborsRegressor::new(1);
        raw.fit(&x, &y).unwrap();
        let mut scaled = KNeighborsRegressor::new(1).standardize(true);
        scaled.fit(&x, &y).unwrap();

        let query = array![[3.0, 450.0]];
        assert_eq!(raw.predict(&query).unwrap()[0], 20.0);
        assert_eq!(scaled.predict(&query).unwrap()[0], 30.0);
    }

    #[test]
    fn test_predict_without_fit() {
        let model = KNeighborsRegressor::new(1);
        assert!(matches!(
            model.predict(&array![[1.0]]),
            Err(MlError::NotFitted("KNeighborsRegressor"))
        ));
    }

    #[test]
    fn test_k_accuracy_sweep_on_separated_buckets() {
        let features = Matrix::from_shape_fn((60, 1), |(i, _)| (i + 100 * (i / 20)) as f64);
        let labels = Vector::from_shape_fn(60, |i| (i / 20) as f64);
        let dataset = Dataset::from_targets(features, labels).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let results = k_accuracy_sweep(&dataset, 10, 1..4, &mut rng).unwrap();

        assert_eq!(results.iter().map(|(k, _)| *k).collect::<Vec<_>>(), vec![1, 2, 3]);
        for (_, accuracy) in &results {
            assert_eq!(*accuracy, 1.0);
        }
    }
}
