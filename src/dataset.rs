use crate::error::{MlError, Result};
use crate::{Matrix, Vector};
use ndarray::{Axis, s};
use rand::Rng;
use rand::seq::SliceRandom;

/// Feature rows paired with label rows.
///
/// Labels are stored as a matrix: one column for regression and binary
/// classification, `C` columns for one-hot encoded multinomial labels.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub features: Matrix,
    pub labels: Matrix,
}

impl Dataset {
    pub fn new(features: Matrix, labels: Matrix) -> Result<Self> {
        if features.nrows() != labels.nrows() {
            return Err(MlError::shape("labels", features.nrows(), labels.nrows()));
        }

        Ok(Self { features, labels })
    }

    /// Builds a dataset with a single label column.
    pub fn from_targets(features: Matrix, targets: Vector) -> Result<Self> {
        Self::new(features, targets.insert_axis(Axis(1)))
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// First label column as a vector.
    pub fn targets(&self) -> Vector {
        self.labels.column(0).to_owned()
    }

    /// Splits off the last `test_size` fraction of rows as the test set.
    pub fn train_test_split(&self, test_size: f64) -> Result<(Self, Self)> {
        if test_size <= 0.0 || test_size >= 1.0 {
            return Err(MlError::InvalidParameter(format!(
                "test_size must be between 0 and 1, got {test_size}"
            )));
        }

        let n_samples = self.n_samples();
        let n_test = (n_samples as f64 * test_size).round() as usize;
        let n_train = n_samples - n_test;

        let train = Dataset::new(
            self.features.slice(s![..n_train, ..]).to_owned(),
            self.labels.slice(s![..n_train, ..]).to_owned(),
        )?;
        let test = Dataset::new(
            self.features.slice(s![n_train.., ..]).to_owned(),
            self.labels.slice(s![n_train.., ..]).to_owned(),
        )?;

        Ok((train, test))
    }

    /// Shuffles the rows, then returns `(test, train)` where the test set holds
    /// exactly `test_count` rows.
    pub fn shuffle_split<R: Rng + ?Sized>(
        &self,
        test_count: usize,
        rng: &mut R,
    ) -> Result<(Self, Self)> {
        let n_samples = self.n_samples();
        if test_count == 0 || test_count >= n_samples {
            return Err(MlError::InvalidParameter(format!(
                "test_count must be in 1..{n_samples}, got {test_count}"
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(rng);
        let (test_idx, train_idx) = indices.split_at(test_count);

        let test = Dataset::new(
            self.features.select(Axis(0), test_idx),
            self.labels.select(Axis(0), test_idx),
        )?;
        let train = Dataset::new(
            self.features.select(Axis(0), train_idx),
            self.labels.select(Axis(0), train_idx),
        )?;

        Ok((test, train))
    }
}

/// Encodes class indices as one-hot rows.
pub fn one_hot(classes: &[usize], n_classes: usize) -> Result<Matrix> {
    if n_classes == 0 {
        return Err(MlError::InvalidParameter("n_classes must be > 0".to_string()));
    }

    let mut encoded = Matrix::zeros((classes.len(), n_classes));
    for (row, &class) in classes.iter().enumerate() {
        if class >= n_classes {
            return Err(MlError::InvalidLabels(format!(
                "class {class} out of range for {n_classes} classes"
            )));
        }
        encoded[[row, class]] = 1.0;
    }
    Ok(encoded)
}

/// Column index of the largest value in each row. Ties resolve to the lowest index.
pub fn argmax_rows(values: &Matrix) -> Vec<usize> {
    values
        .axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |(best, best_value), (idx, &value)| {
                    if value > best_value {
                        (idx, value)
                    } else {
                        (best, best_value)
                    }
                })
                .0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let targets = array![1.0, 2.0, 3.0];

        let dataset = Dataset::from_targets(features, targets).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        assert_eq!(dataset.labels.shape(), &[3, 1]);
    }

    #[test]
    fn test_dataset_row_mismatch() {
        let features = array![[1.0], [2.0]];
        let labels = array![[1.0], [2.0], [3.0]];
        assert!(matches!(
            Dataset::new(features, labels),
            Err(MlError::ShapeMismatch { expected: 2, got: 3, .. })
        ));
    }

    #[test]
    fn test_train_test_split() {
        let features = Matrix::zeros((100, 5));
        let targets = Vector::zeros(100);
        let dataset = Dataset::from_targets(features, targets).unwrap();

        let (train, test) = dataset.train_test_split(0.2).unwrap();
        assert_eq!(train.n_samples(), 80);
        assert_eq!(test.n_samples(), 20);
    }

    #[test]
    fn test_shuffle_split_keeps_rows_paired() {
        let features = Matrix::from_shape_fn((20, 1), |(i, _)| i as f64);
        let targets = Vector::from_shape_fn(20, |i| i as f64 * 10.0);
        let dataset = Dataset::from_targets(features, targets).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let (test, train) = dataset.shuffle_split(5, &mut rng).unwrap();
        assert_eq!(test.n_samples(), 5);
        assert_eq!(train.n_samples(), 15);

        for part in [&test, &train] {
            for (x, y) in part.features.column(0).iter().zip(part.labels.column(0)) {
                assert_eq!(*y, *x * 10.0);
            }
        }

        let mut seen: Vec<f64> = test
            .features
            .column(0)
            .iter()
            .chain(train.features.column(0).iter())
            .copied()
            .collect();
        seen.sort_by(f64::total_cmp);
        assert_eq!(seen, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_split_rejects_bad_count() {
        let dataset = Dataset::from_targets(Matrix::zeros((4, 1)), Vector::zeros(4)).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(dataset.shuffle_split(0, &mut rng).is_err());
        assert!(dataset.shuffle_split(4, &mut rng).is_err());
    }

    #[test]
    fn test_one_hot_and_argmax() {
        let encoded = one_hot(&[0, 2, 1], 3).unwrap();
        assert_eq!(encoded, array![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
        assert_eq!(argmax_rows(&encoded), vec![0, 2, 1]);
        assert!(one_hot(&[3], 3).is_err());
    }

    #[test]
    fn test_argmax_tie_takes_first() {
        let values = array![[0.5, 0.5, 0.0]];
        assert_eq!(argmax_rows(&values), vec![0]);
    }
}
