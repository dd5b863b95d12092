use super::{Fitted, GradientDescent, Objective, fitted_accessors};
use crate::Matrix;
use crate::dataset::argmax_rows;
use crate::error::{MlError, Result};

/// Multinomial logistic regression over one-hot encoded labels.
///
/// The weight matrix has one column per class; predictions are the argmax of
/// the row-wise softmax.
#[derive(Clone, Debug)]
pub struct SoftmaxRegression {
    optimizer: GradientDescent,
    fitted: Option<Fitted>,
}

impl SoftmaxRegression {
    pub fn new() -> Self {
        Self {
            optimizer: GradientDescent::new(),
            fitted: None,
        }
    }

    pub fn with_params(learning_rate: f64, iterations: usize, batch_size: usize) -> Self {
        Self::new()
            .learning_rate(learning_rate)
            .iterations(iterations)
            .batch_size(batch_size)
    }

    fitted_accessors!("SoftmaxRegression");

    pub fn n_classes(&self) -> Option<usize> {
        self.weights().map(|w| w.ncols())
    }

    /// `y` must hold exactly one 1 per row, zeros elsewhere.
    pub fn fit(&mut self, x: &Matrix, y: &Matrix) -> Result<()> {
        Self::validate_one_hot(y)?;

        self.fitted = Some(Fitted::train(
            &self.optimizer,
            x,
            y,
            Objective::CategoricalCrossEntropy,
        )?);
        Ok(())
    }

    /// Class probabilities, one row per sample.
    pub fn predict_proba(&self, x: &Matrix) -> Result<Matrix> {
        self.fitted()?.forward(x, Objective::CategoricalCrossEntropy)
    }

    /// Most probable class index for each row.
    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        Ok(argmax_rows(&self.predict_proba(x)?))
    }

    /// Fraction of rows whose predicted class matches the one-hot label.
    pub fn score(&self, x: &Matrix, y: &Matrix) -> Result<f64> {
        let probabilities = self.predict_proba(x)?;
        crate::metrics::categorical_accuracy(y, &probabilities)
    }

    fn validate_one_hot(y: &Matrix) -> Result<()> {
        if y.ncols() < 2 {
            return Err(MlError::InvalidLabels(format!(
                "one-hot labels need at least 2 classes, got {}",
                y.ncols()
            )));
        }

        for (i, row) in y.rows().into_iter().enumerate() {
            let ones = row.iter().filter(|&&v| v == 1.0).count();
            let zeros = row.iter().filter(|&&v| v == 0.0).count();
            if ones != 1 || ones + zeros != row.len() {
                return Err(MlError::InvalidLabels(format!(
                    "row {i} is not one-hot: {row}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SoftmaxRegression {
    fn default() -> Self {
        Self::new()
    }
}
