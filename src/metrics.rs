use crate::dataset::argmax_rows;
use crate::error::{MlError, Result};
use crate::{Matrix, Vector};

fn check_lengths(y_true: &Vector, y_pred: &Vector) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(MlError::shape("predictions", y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(MlError::EmptyInput("y_true"));
    }
    Ok(())
}

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(|x| x * x).sum() / y_true.len() as f64)
}

pub fn mean_absolute_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let diff = y_true - y_pred;
    Ok(diff.mapv(f64::abs).sum() / y_true.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Negative when the predictions are worse than always predicting the mean.
pub fn r2_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res = (y_true - y_pred).mapv(|x| x * x).sum();
    let ss_tot = y_true.mapv(|x| (x - y_mean) * (x - y_mean)).sum();

    if ss_tot == 0.0 {
        // constant targets: only an exact fit explains them
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Fraction of positions where prediction and label are equal.
pub fn accuracy_score(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, pred)| (*actual - *pred).abs() < 1e-10)
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Fraction of rows whose argmax column agrees, e.g. one-hot labels against
/// class probabilities.
pub fn categorical_accuracy(y_true: &Matrix, y_pred: &Matrix) -> Result<f64> {
    if y_true.nrows() != y_pred.nrows() {
        return Err(MlError::shape("prediction rows", y_true.nrows(), y_pred.nrows()));
    }
    if y_true.ncols() != y_pred.ncols() {
        return Err(MlError::shape("prediction columns", y_true.ncols(), y_pred.ncols()));
    }
    if y_true.nrows() == 0 {
        return Err(MlError::EmptyInput("y_true"));
    }

    let correct = argmax_rows(y_true)
        .into_iter()
        .zip(argmax_rows(y_pred))
        .filter(|(actual, pred)| actual == pred)
        .count();
    Ok(correct as f64 / y_true.nrows() as f64)
}

/// Signed error relative to the actual value, `(actual - predicted) / actual`.
pub fn relative_error(actual: f64, predicted: f64) -> f64 {
    (actual - predicted) / actual
}
