use crate::error::{MlError, Result};

/// Loss-driven learning-rate schedule.
///
/// After each epoch the two most recent losses are compared: a worse loss
/// halves the rate, an equal or better one grows it by 5%. The rate is
/// unbounded unless `clamp` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveLearningRate {
    rate: f64,
    bounds: Option<(f64, f64)>,
}

impl AdaptiveLearningRate {
    pub const GROWTH: f64 = 1.05;
    pub const DECAY: f64 = 0.5;

    pub fn new(rate: f64) -> Self {
        Self { rate, bounds: None }
    }

    /// Keeps the rate inside `[min, max]` after every adjustment.
    pub fn clamp(mut self, min: f64, max: f64) -> Result<Self> {
        if !(min > 0.0 && min <= max) {
            return Err(MlError::InvalidParameter(format!(
                "learning rate bounds must satisfy 0 < min <= max, got [{min}, {max}]"
            )));
        }
        self.bounds = Some((min, max));
        self.rate = self.rate.clamp(min, max);
        Ok(self)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Adjusts the rate from a loss history ordered oldest to newest.
    /// Does nothing until at least two losses have been recorded.
    pub fn update(&mut self, history: &[f64]) -> f64 {
        if let [.., previous, latest] = history {
            if latest > previous {
                self.rate *= Self::DECAY;
            } else {
                self.rate *= Self::GROWTH;
            }

            if let Some((min, max)) = self.bounds {
                self.rate = self.rate.clamp(min, max);
            }
        }
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(losses: &[f64], rate: f64) -> Vec<f64> {
        let mut schedule = AdaptiveLearningRate::new(rate);
        (1..=losses.len())
            .map(|n| schedule.update(&losses[..n]))
            .collect()
    }

    #[test]
    fn test_decreasing_loss_grows_rate() {
        let rates = replay(&[10.0, 8.0, 6.0, 4.0], 0.1);

        assert_eq!(rates[0], 0.1);
        for pair in rates[1..].windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!((rates[3] - 0.1 * 1.05f64.powi(3)).abs() < 1e-12);
    }

    #[test]
    fn test_increasing_loss_halves_rate() {
        let rates = replay(&[4.0, 6.0, 8.0, 10.0], 0.8);
        assert_eq!(rates, vec![0.8, 0.4, 0.2, 0.1]);
    }

    #[test]
    fn test_equal_loss_counts_as_improving() {
        let mut schedule = AdaptiveLearningRate::new(1.0);
        assert!((schedule.update(&[3.0, 3.0]) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_single_loss_is_noop() {
        let mut schedule = AdaptiveLearningRate::new(0.3);
        assert_eq!(schedule.update(&[]), 0.3);
        assert_eq!(schedule.update(&[5.0]), 0.3);
    }

    #[test]
    fn test_clamp_bounds_rate() {
        let mut schedule = AdaptiveLearningRate::new(1.0).clamp(0.25, 1.1).unwrap();
        schedule.update(&[1.0, 2.0]);
        schedule.update(&[2.0, 3.0]);
        schedule.update(&[3.0, 4.0]);
        assert_eq!(schedule.rate(), 0.25);

        for _ in 0..40 {
            schedule.update(&[4.0, 1.0]);
        }
        assert_eq!(schedule.rate(), 1.1);
    }

    #[test]
    fn test_clamp_rejects_inverted_bounds() {
        assert!(matches!(
            AdaptiveLearningRate::new(1.0).clamp(2.0, 1.0),
            Err(MlError::InvalidParameter(_))
        ));
        assert!(AdaptiveLearningRate::new(1.0).clamp(0.0, 1.0).is_err());
    }
}
