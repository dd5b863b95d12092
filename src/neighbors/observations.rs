use super::knn::k_accuracy_sweep;
use crate::dataset::Dataset;
use crate::error::{MlError, Result};
use crate::{Matrix, Vector};
use rand::Rng;

/// One ball dropped on the plinko board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub drop_position: f64,
    pub bounciness: f64,
    pub size: f64,
    pub bucket: u32,
}

/// Measured attribute usable as a KNN feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    DropPosition,
    Bounciness,
    Size,
}

impl Observation {
    fn feature(&self, feature: Feature) -> f64 {
        match feature {
            Feature::DropPosition => self.drop_position,
            Feature::Bounciness => self.bounciness,
            Feature::Size => self.size,
        }
    }
}

/// Append-only record of drops, owned by the caller for the length of a session.
#[derive(Clone, Debug, Default)]
pub struct ObservationLog {
    observations: Vec<Observation>,
}

impl ObservationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, drop_position: f64, bounciness: f64, size: f64, bucket: u32) {
        self.observations.push(Observation {
            drop_position,
            bounciness,
            size,
            bucket,
        });
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Selected feature columns, labelled by bucket.
    pub fn to_dataset(&self, features: &[Feature]) -> Result<Dataset> {
        if features.is_empty() {
            return Err(MlError::InvalidParameter(
                "at least one feature column is required".to_string(),
            ));
        }

        let x = Matrix::from_shape_fn((self.len(), features.len()), |(i, j)| {
            self.observations[i].feature(features[j])
        });
        let y = Vector::from_iter(self.observations.iter().map(|o| f64::from(o.bucket)));
        Dataset::from_targets(x, y)
    }
}

/// Sweeps `ks` using drop position alone as the feature, holding out
/// `test_count` random drops.
pub fn run_analysis<R, I>(
    log: &ObservationLog,
    test_count: usize,
    ks: I,
    rng: &mut R,
) -> Result<Vec<(usize, f64)>>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let dataset = log.to_dataset(&[Feature::DropPosition])?;
    k_accuracy_sweep(&dataset, test_count, ks, rng)
}
