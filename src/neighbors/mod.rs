//! k-nearest-neighbour prediction.
//!
//! - `knn_regress` / `KNeighborsRegressor`: mean label of the k closest rows
//! - `knn_classify` / `KNeighborsClassifier`: majority vote, ties to the smallest label
//! - `k_accuracy_sweep`: held-out accuracy for a range of k
//! - `ObservationLog`: caller-owned buffer of plinko drops feeding `run_analysis`
//!
//! # Examples
//!
//! ```rust
//! use gradfit::neighbors::knn_regress;
//! use ndarray::array;
//!
//! let features = array![[0.0], [1.0], [2.0], [3.0]];
//! let labels = array![0.0, 1.0, 2.0, 3.0];
//!
//! let prediction = knn_regress(&features, &labels, array![1.1].view(), 1).unwrap();
//! assert_eq!(prediction, 1.0);
//! ```

mod knn;
mod observations;

pub use knn::{
    KNeighborsClassifier, KNeighborsRegressor, euclidean_distance, k_accuracy_sweep, knn_classify,
    knn_regress,
};
pub use observations::{Feature, Observation, ObservationLog, run_analysis};
