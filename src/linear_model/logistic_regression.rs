use super::{Fitted, GradientDescent, Objective, fitted_accessors};
use crate::error::{MlError, Result};
use crate::{Matrix, Vector};
use ndarray::Axis;

#[derive(Clone, Debug)]
pub struct LogisticRegression {
    optimizer: GradientDescent,
    decision_boundary: f64,
    fitted: Option<Fitted>,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            optimizer: GradientDescent::new(),
            decision_boundary: 0.5,
            fitted: None,
        }
    }

    pub fn with_params(learning_rate: f64, iterations: usize, batch_size: usize) -> Self {
        Self::new()
            .learning_rate(learning_rate)
            .iterations(iterations)
            .batch_size(batch_size)
    }

    /// Probability above which a row is classified as 1. Must lie in `[0, 1]`.
    pub fn decision_boundary(mut self, decision_boundary: f64) -> Self {
        self.decision_boundary = decision_boundary;
        self
    }

    fitted_accessors!("LogisticRegression");

    pub fn fit(&mut self, x: &Matrix, y: &Vector) -> Result<()> {
        self.check_boundary()?;
        Self::validate_labels(y)?;

        let labels = y.view().insert_axis(Axis(1)).to_owned();
        self.fitted = Some(Fitted::train(
            &self.optimizer,
            x,
            &labels,
            Objective::BinaryCrossEntropy,
        )?);
        Ok(())
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        self.check_boundary()?;
        let probabilities = self.predict_proba(x)?;
        let boundary = self.decision_boundary;
        Ok(probabilities.mapv(|p| if p > boundary { 1.0 } else { 0.0 }))
    }

    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let probabilities = self.fitted()?.forward(x, Objective::BinaryCrossEntropy)?;
        Ok(probabilities.column(0).to_owned())
    }

    /// Fraction of rows whose thresholded prediction matches the label.
    pub fn score(&self, x: &Matrix, y: &Vector) -> Result<f64> {
        let predictions = self.predict(x)?;
        crate::metrics::accuracy_score(y, &predictions)
    }

    fn check_boundary(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.decision_boundary) {
            return Err(MlError::InvalidParameter(format!(
                "decision_boundary must be in [0, 1], got {}",
                self.decision_boundary
            )));
        }
        Ok(())
    }

    fn validate_labels(y: &Vector) -> Result<()> {
        match y.iter().find(|&&label| label != 0.0 && label != 1.0) {
            Some(label) => Err(MlError::InvalidLabels(format!(
                "binary labels must be 0 or 1, found {label}"
            ))),
            None => Ok(()),
        }
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}
