use super::learning_rate::AdaptiveLearningRate;
use crate::Matrix;
use crate::error::{MlError, Result};
use log::{debug, info, warn};
use ndarray::{ArrayView2, s};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Added to every logarithm argument so saturated predictions never hit `ln(0)`.
pub const LOG_EPSILON: f64 = 1e-7;

/// Link function and loss minimised by the trainer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    /// Identity activation, mean squared error.
    LeastSquares,
    /// Sigmoid activation, binary log-loss.
    BinaryCrossEntropy,
    /// Row-wise softmax activation, categorical cross-entropy over one-hot labels.
    CategoricalCrossEntropy,
}

impl Objective {
    pub fn activate(&self, z: Matrix) -> Matrix {
        match self {
            Objective::LeastSquares => z,
            Objective::BinaryCrossEntropy => z.mapv_into(sigmoid),
            Objective::CategoricalCrossEntropy => softmax_rows(z),
        }
    }

    /// Activated predictions for a design matrix.
    pub fn forward(&self, x: ArrayView2<f64>, weights: &Matrix) -> Matrix {
        self.activate(x.dot(weights))
    }

    /// Mean loss of activated `predictions` against `labels`.
    pub fn loss(&self, predictions: &Matrix, labels: &Matrix) -> f64 {
        let n_samples = predictions.nrows() as f64;
        let total = match self {
            Objective::LeastSquares => (predictions - labels).mapv(|d| d * d).sum(),
            Objective::BinaryCrossEntropy => -predictions
                .iter()
                .zip(labels.iter())
                .map(|(&p, &y)| {
                    y * (p + LOG_EPSILON).ln() + (1.0 - y) * (1.0 - p + LOG_EPSILON).ln()
                })
                .sum::<f64>(),
            Objective::CategoricalCrossEntropy => -predictions
                .iter()
                .zip(labels.iter())
                .map(|(&p, &y)| y * (p + LOG_EPSILON).ln())
                .sum::<f64>(),
        };
        total / n_samples
    }
}

pub fn sigmoid(z: f64) -> f64 {
    if z > 500.0 {
        1.0
    } else if z < -500.0 {
        0.0
    } else {
        1.0 / (1.0 + (-z).exp())
    }
}

/// Softmax over each row, shifted by the row maximum to keep `exp` finite.
pub fn softmax_rows(mut z: Matrix) -> Matrix {
    for mut row in z.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
    z
}

/// What to do with the rows left over when the batch size does not divide
/// the number of samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Skip the trailing rows every epoch.
    #[default]
    Drop,
    /// Train on the trailing rows as a final, shorter batch.
    Include,
}

/// Weights and learning rate carried from one gradient step to the next.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainState {
    pub weights: Matrix,
    pub learning_rate: f64,
}

/// Result of a full training run.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainOutcome {
    pub weights: Matrix,
    /// One loss per epoch, oldest first.
    pub loss_history: Vec<f64>,
    pub learning_rate: f64,
}

/// Mini-batch gradient descent with an adaptive learning rate.
///
/// Each epoch takes one step per batch in order, then records the loss on
/// the full training set and adjusts the learning rate. There is no early
/// stopping: training always runs for `iterations` epochs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescent {
    learning_rate: f64,
    iterations: usize,
    batch_size: Option<usize>,
    remainder: RemainderPolicy,
    learning_rate_bounds: Option<(f64, f64)>,
}

impl GradientDescent {
    pub fn new() -> Self {
        Self {
            learning_rate: 0.1,
            iterations: 1000,
            batch_size: None,
            remainder: RemainderPolicy::Drop,
            learning_rate_bounds: None,
        }
    }

    /// Checked at `fit`: must be positive and finite.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Rows per gradient step. Without a batch size every step uses the full training set.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    pub fn learning_rate_bounds(mut self, min: f64, max: f64) -> Self {
        self.learning_rate_bounds = Some((min, max));
        self
    }

    pub fn initial_learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn n_iterations(&self) -> usize {
        self.iterations
    }

    /// One update `W <- W - lr * X^T (activation(X W) - Y) / n` on a single batch.
    pub fn step(
        state: TrainState,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        objective: Objective,
    ) -> TrainState {
        let n_samples = x.nrows() as f64;
        let error = objective.forward(x, &state.weights) - &y;
        let gradient = x.t().dot(&error) / n_samples;

        TrainState {
            weights: state.weights - gradient * state.learning_rate,
            learning_rate: state.learning_rate,
        }
    }

    /// Trains zero-initialised weights of shape `(x.ncols(), y.ncols())`.
    pub fn fit(&self, x: &Matrix, y: &Matrix, objective: Objective) -> Result<TrainOutcome> {
        if x.nrows() != y.nrows() {
            return Err(MlError::shape("labels", x.nrows(), y.nrows()));
        }
        if x.nrows() == 0 {
            return Err(MlError::EmptyInput("training set"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(MlError::InvalidParameter(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }

        let batches = self.batches(x.nrows())?;
        let mut schedule = AdaptiveLearningRate::new(self.learning_rate);
        if let Some((min, max)) = self.learning_rate_bounds {
            schedule = schedule.clamp(min, max)?;
        }

        let mut state = TrainState {
            weights: Matrix::zeros((x.ncols(), y.ncols())),
            learning_rate: schedule.rate(),
        };
        let mut loss_history = Vec::with_capacity(self.iterations);

        for epoch in 0..self.iterations {
            for batch in &batches {
                let x_batch = x.slice(s![batch.clone(), ..]);
                let y_batch = y.slice(s![batch.clone(), ..]);
                state = Self::step(state, x_batch, y_batch, objective);
            }

            let loss = objective.loss(&objective.forward(x.view(), &state.weights), y);
            if !loss.is_finite() {
                return Err(MlError::Diverged {
                    epoch: epoch + 1,
                    loss,
                });
            }
            loss_history.push(loss);

            state.learning_rate = schedule.update(&loss_history);
            if !state.learning_rate.is_normal() {
                warn!(
                    "learning rate degenerated to {} at epoch {}",
                    state.learning_rate,
                    epoch + 1
                );
            }
            debug!(
                "epoch {}: loss={:.6} learning_rate={:.6}",
                epoch + 1,
                loss,
                state.learning_rate
            );
        }

        info!(
            "trained {:?} for {} epochs over {} batches, final loss {:?}",
            objective,
            self.iterations,
            batches.len(),
            loss_history.last()
        );

        Ok(TrainOutcome {
            weights: state.weights,
            loss_history,
            learning_rate: state.learning_rate,
        })
    }

    /// Contiguous row ranges visited in order each epoch.
    pub fn batches(&self, n_samples: usize) -> Result<Vec<Range<usize>>> {
        let batch_size = match self.batch_size {
            None => return Ok(vec![0..n_samples]),
            Some(0) => {
                return Err(MlError::InvalidParameter("batch_size must be > 0".to_string()));
            }
            Some(b) if b > n_samples => {
                return Err(MlError::InvalidParameter(format!(
                    "batch_size={b} exceeds n_samples={n_samples}"
                )));
            }
            Some(b) => b,
        };

        let n_full = n_samples / batch_size;
        let mut batches: Vec<Range<usize>> = (0..n_full)
            .map(|j| j * batch_size..(j + 1) * batch_size)
            .collect();

        let leftover = n_samples % batch_size;
        if leftover > 0 {
            match self.remainder {
                RemainderPolicy::Drop => warn!(
                    "batch_size={} does not divide n_samples={}, dropping the last {} rows each epoch",
                    batch_size, n_samples, leftover
                ),
                RemainderPolicy::Include => batches.push(n_full * batch_size..n_samples),
            }
        }

        Ok(batches)
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}
