//! Gradient-descent regression and nearest-neighbour models on `ndarray`.
//!
//! The crate covers four classic supervised learners:
//! - `LinearRegression`: batch gradient descent on mean squared error
//! - `LogisticRegression`: binary classification with a sigmoid link
//! - `SoftmaxRegression`: multinomial classification over one-hot labels
//! - `KNeighborsRegressor` / `KNeighborsClassifier`: k-nearest-neighbour prediction
//!
//! The regressions share one feature processor (standardisation plus a bias
//! column) and one trainer with an adaptive learning rate.

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod dataset;
pub mod error;
pub mod linear_model;
pub mod metrics;
pub mod neighbors;
pub mod preprocessing;

pub use dataset::Dataset;
pub use error::{MlError, Result};
pub use linear_model::{
    AdaptiveLearningRate, GradientDescent, LinearRegression, LogisticRegression, Objective,
    RemainderPolicy, SoftmaxRegression, TrainOutcome, TrainState,
};
pub use neighbors::{KNeighborsClassifier, KNeighborsRegressor, ObservationLog};
pub use preprocessing::{FeatureProcessor, StandardScaler};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_types_work() {
        let vec = Vector::zeros(5);
        let mat = Matrix::zeros((3, 4));
        assert_eq!(vec.len(), 5);
        assert_eq!(mat.shape(), &[3, 4]);
    }
}
