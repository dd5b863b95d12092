//! Gradient-descent linear models.
//!
//! All three models standardise their features with statistics frozen at
//! `fit` time, prepend a bias column, and train a zero-initialised weight
//! matrix with [`GradientDescent`]:
//! - `LinearRegression`: identity activation, scored with R²
//! - `LogisticRegression`: sigmoid activation, thresholded at a decision boundary
//! - `SoftmaxRegression`: row-wise softmax over one-hot labels
//!
//! # Examples
//!
//! ## Linear Regression
//! ```rust
//! use gradfit::LinearRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![5.0, 7.0, 9.0, 11.0];
//!
//! let mut model = LinearRegression::new().iterations(200);
//! model.fit(&x, &y).unwrap();
//! assert!(model.score(&x, &y).unwrap() > 0.99);
//! ```
//!
//! ## Logistic Regression
//! ```rust
//! use gradfit::LogisticRegression;
//! use ndarray::array;
//!
//! let x = array![[1.0], [2.0], [3.0], [4.0]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut model = LogisticRegression::new();
//! model.fit(&x, &y).unwrap();
//! let predictions = model.predict(&x).unwrap();
//! let probabilities = model.predict_proba(&x).unwrap();
//! ```

mod gradient_descent;
mod learning_rate;
mod linear_regression;
mod logistic_regression;
mod softmax_regression;

pub use gradient_descent::{
    GradientDescent, LOG_EPSILON, Objective, RemainderPolicy, TrainOutcome, TrainState, sigmoid,
    softmax_rows,
};
pub use learning_rate::AdaptiveLearningRate;
pub use linear_regression::LinearRegression;
pub use logistic_regression::LogisticRegression;
pub use softmax_regression::SoftmaxRegression;

use crate::Matrix;
use crate::error::{MlError, Result};
use crate::preprocessing::FeatureProcessor;

/// Feature statistics and trained weights owned by one model instance.
#[derive(Clone, Debug)]
struct Fitted {
    processor: FeatureProcessor,
    outcome: TrainOutcome,
}

impl Fitted {
    fn train(
        optimizer: &GradientDescent,
        x: &Matrix,
        y: &Matrix,
        objective: Objective,
    ) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(MlError::shape("labels", x.nrows(), y.nrows()));
        }

        let (processor, design) = FeatureProcessor::fit(x)?;
        let outcome = optimizer.fit(&design, y, objective)?;
        Ok(Self { processor, outcome })
    }

    fn forward(&self, x: &Matrix, objective: Objective) -> Result<Matrix> {
        let design = self.processor.transform(x)?;
        Ok(objective.forward(design.view(), &self.outcome.weights))
    }
}

/// Shared accessors for models holding an `Option<Fitted>`.
macro_rules! fitted_accessors {
    ($model:literal) => {
        fn fitted(&self) -> crate::error::Result<&super::Fitted> {
            self.fitted
                .as_ref()
                .ok_or(crate::error::MlError::NotFitted($model))
        }

        /// Trained weights, bias row first, in standardised feature space.
        pub fn weights(&self) -> Option<&crate::Matrix> {
            self.fitted.as_ref().map(|f| &f.outcome.weights)
        }

        /// Loss after each epoch, oldest first. Empty before `fit`.
        pub fn loss_history(&self) -> &[f64] {
            self.fitted
                .as_ref()
                .map(|f| f.outcome.loss_history.as_slice())
                .unwrap_or(&[])
        }

        /// Learning rate after the last adaptive adjustment.
        pub fn final_learning_rate(&self) -> Option<f64> {
            self.fitted.as_ref().map(|f| f.outcome.learning_rate)
        }

        pub fn feature_processor(&self) -> Option<&crate::preprocessing::FeatureProcessor> {
            self.fitted.as_ref().map(|f| &f.processor)
        }

        pub fn learning_rate(mut self, learning_rate: f64) -> Self {
            self.optimizer = self.optimizer.learning_rate(learning_rate);
            self
        }

        pub fn iterations(mut self, iterations: usize) -> Self {
            self.optimizer = self.optimizer.iterations(iterations);
            self
        }

        pub fn batch_size(mut self, batch_size: usize) -> Self {
            self.optimizer = self.optimizer.batch_size(batch_size);
            self
        }

        pub fn optimizer(mut self, optimizer: super::GradientDescent) -> Self {
            self.optimizer = optimizer;
            self
        }
    };
}

pub(crate) use fitted_accessors;
