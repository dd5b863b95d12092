use super::{Fitted, GradientDescent, Objective, fitted_accessors};
use crate::error::Result;
use crate::{Matrix, Vector};
use ndarray::Axis;

/// Least-squares regression trained by batch gradient descent.
#[derive(Clone, Debug)]
pub struct LinearRegression {
    optimizer: GradientDescent,
    fitted: Option<Fitted>,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self {
            optimizer: GradientDescent::new(),
            fitted: None,
        }
    }

    pub fn with_params(learning_rate: f64, iterations: usize) -> Self {
        Self::new().learning_rate(learning_rate).iterations(iterations)
    }

    fitted_accessors!("LinearRegression");

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        let labels = y.view().insert_axis(Axis(1)).to_owned();
        self.fitted = Some(Fitted::train(
            &self.optimizer,
            x,
            &labels,
            Objective::LeastSquares,
        )?);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        let predictions = self.fitted()?.forward(x, Objective::LeastSquares)?;
        Ok(predictions.column(0).to_owned())
    }

    /// R² of the predictions on `x` against `y`.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let y_pred = self.predict(x)?;
        crate::metrics::r2_score(y, &y_pred)
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MlError;
    use ndarray::array;

    #[test]
    fn test_linear_regression_simple() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = x.column(0).mapv(|v| 2.0 * v + 3.0);

        let mut model = LinearRegression::with_params(0.1, 200);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        for (pred, actual) in predictions.iter().zip(y.iter()) {
            assert!((pred - actual).abs() < 1e-6);
        }
        assert!(model.score(&x, &y).unwrap() > 0.99);
    }

    #[test]
    fn test_linear_regression_multivariate() {
        let x = array![[1.0, 2.0], [2.0, 1.0], [3.0, 4.0], [4.0, 3.0], [5.0, 7.0]];
        let y = array![8.0, 7.0, 15.0, 14.0, 24.0]; // 1 + x1 + 3 x2

        let mut model = LinearRegression::new().iterations(500);
        model.fit(&x, &y).unwrap();

        let score = model.score(&x, &y).unwrap();
        assert!(score > 0.99);
        assert_eq!(model.weights().unwrap().shape(), &[3, 1]);
    }

    #[test]
    fn test_loss_history_and_learning_rate_tracked() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = LinearRegression::new().iterations(25);
        assert!(model.loss_history().is_empty());
        model.fit(&x, &y).unwrap();

        let history = model.loss_history();
        assert_eq!(history.len(), 25);
        assert!(history[24] < history[0]);
        assert!(model.final_learning_rate().unwrap() > 0.0);
    }

    #[test]
    fn test_test_data_uses_training_statistics() {
        let x_train = array![[0.0], [10.0], [20.0]];
        let y_train = array![1.0, 21.0, 41.0];

        let mut model = LinearRegression::new().iterations(300);
        model.fit(&x_train, &y_train).unwrap();
        let stats = model.feature_processor().unwrap().clone();

        let x_test = array![[30.0], [40.0]];
        let predictions = model.predict(&x_test).unwrap();

        assert_eq!(model.feature_processor().unwrap(), &stats);
        assert!((predictions[0] - 61.0).abs() < 1e-3);
        assert!((predictions[1] - 81.0).abs() < 1e-3);
    }

    #[test]
    fn test_predict_without_fit() {
        let x = array![[1.0], [2.0]];
        let model = LinearRegression::new();

        assert_eq!(
            model.predict(&x),
            Err(MlError::NotFitted("LinearRegression"))
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0, 3.0];

        let mut model = LinearRegression::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_feature_count_mismatch_at_predict() {
        let mut model = LinearRegression::new().iterations(5);
        model.fit(&array![[1.0, 2.0], [2.0, 0.0]], &array![1.0, 2.0]).unwrap();
        assert!(matches!(
            model.predict(&array![[1.0]]),
            Err(MlError::ShapeMismatch { .. })
        ));
    }
}
