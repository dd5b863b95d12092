use thiserror::Error;

/// Errors produced when fitting, transforming or scoring.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MlError {
    /// A shape invariant was violated (e.g. features and labels disagree on row count).
    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{0} must contain at least one sample")]
    EmptyInput(&'static str),

    #[error("{0} not fitted, call fit() first")]
    NotFitted(&'static str),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid labels: {0}")]
    InvalidLabels(String),

    /// The loss became NaN or infinite.
    #[error("gradient descent diverged at epoch {epoch} (loss = {loss})")]
    Diverged { epoch: usize, loss: f64 },
}

pub type Result<T> = std::result::Result<T, MlError>;

impl MlError {
    pub(crate) fn shape(what: &'static str, expected: usize, got: usize) -> Self {
        MlError::ShapeMismatch {
            what,
            expected,
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MlError::shape("labels", 4, 3);
        assert_eq!(err.to_string(), "shape mismatch for labels: expected 4, got 3");

        let err = MlError::NotFitted("LinearRegression");
        assert_eq!(err.to_string(), "LinearRegression not fitted, call fit() first");
    }
}
