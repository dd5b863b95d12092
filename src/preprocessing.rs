//! Feature standardisation and design-matrix construction.
//!
//! Statistics are computed once by `fit` and frozen; every later `transform`
//! (test or prediction inputs) reuses them. A scaler can only be obtained by
//! fitting, so there is no way to transform with missing statistics.

use crate::error::{MlError, Result};
use crate::{Matrix, Vector};
use ndarray::{Axis, s};

/// Per-column mean and variance learned from training features.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScaler {
    mean: Vector,
    variance: Vector,
}

impl StandardScaler {
    /// Computes population mean and variance per column.
    ///
    /// Columns with zero variance store a variance of 1 so that they map to
    /// `x - mean` instead of dividing by zero.
    pub fn fit(data: &Matrix) -> Result<Self> {
        if data.nrows() == 0 {
            return Err(MlError::EmptyInput("features"));
        }

        let mean = data
            .mean_axis(Axis(0))
            .ok_or(MlError::EmptyInput("features"))?;
        let variance = data
            .var_axis(Axis(0), 0.0)
            .mapv(|v| if v == 0.0 { 1.0 } else { v });

        Ok(Self { mean, variance })
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        if data.ncols() != self.mean.len() {
            return Err(MlError::shape("feature columns", self.mean.len(), data.ncols()));
        }

        let std = self.variance.mapv(f64::sqrt);
        Ok((data - &self.mean) / &std)
    }

    pub fn mean(&self) -> &Vector {
        &self.mean
    }

    pub fn variance(&self) -> &Vector {
        &self.variance
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

/// Prepends a column of ones for the intercept term.
pub fn add_bias_column(x: &Matrix) -> Matrix {
    let mut with_bias = Matrix::ones((x.nrows(), x.ncols() + 1));
    with_bias.slice_mut(s![.., 1..]).assign(x);
    with_bias
}

/// Standardisation followed by a bias column; produces the design matrix the
/// gradient-descent models train and predict on.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureProcessor {
    scaler: StandardScaler,
}

impl FeatureProcessor {
    /// Fits the scaler on training features and returns it together with the
    /// training design matrix.
    pub fn fit(features: &Matrix) -> Result<(Self, Matrix)> {
        let scaler = StandardScaler::fit(features)?;
        let processor = Self { scaler };
        let design = processor.transform(features)?;
        Ok((processor, design))
    }

    pub fn transform(&self, features: &Matrix) -> Result<Matrix> {
        let standardized = self.scaler.transform(features)?;
        Ok(add_bias_column(&standardized))
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}
