//! Traffic target selection for the synthetic load generator.
//!
//! Each iteration draws a uniform sample in [0, 1) and routes to the
//! failing endpoint when the sample falls below the error ratio.
//! The long-run share of failing requests therefore converges on the
//! configured ratio.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default share of generated requests sent to the failing endpoint.
pub const DEFAULT_ERROR_RATIO: f64 = 0.2;

/// Endpoint a generated request is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrafficTarget {
    /// `/ping`, always 200.
    Healthy,
    /// `/error`, always 500.
    Failing,
}

impl TrafficTarget {
    /// Request path for this target.
    pub fn path(self) -> &'static str {
        match self {
            TrafficTarget::Healthy => "/ping",
            TrafficTarget::Failing => "/error",
        }
    }

    /// Map a uniform sample in [0, 1) to a target.
    pub fn from_sample(sample: f64, error_ratio: f64) -> Self {
        if sample < error_ratio {
            TrafficTarget::Failing
        } else {
            TrafficTarget::Healthy
        }
    }
}

/// Random target picker.
///
/// Owns its RNG so tests can seed it and get a reproducible sequence.
#[derive(Debug, Clone)]
pub struct TargetSelector {
    rng: StdRng,
    error_ratio: f64,
}

impl TargetSelector {
    /// Selector seeded from OS entropy.
    pub fn from_entropy(error_ratio: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), error_ratio)
    }

    /// Deterministic selector for a fixed seed.
    pub fn seeded(seed: u64, error_ratio: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), error_ratio)
    }

    fn with_rng(rng: StdRng, error_ratio: f64) -> Self {
        Self {
            rng,
            error_ratio: error_ratio.clamp(0.0, 1.0),
        }
    }

    /// Configured error ratio.
    pub fn error_ratio(&self) -> f64 {
        self.error_ratio
    }

    /// Draw the next target.
    pub fn next_target(&mut self) -> TrafficTarget {
        let sample: f64 = self.rng.gen_range(0.0..1.0);
        TrafficTarget::from_sample(sample, self.error_ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_paths() {
        assert_eq!(TrafficTarget::Healthy.path(), "/ping");
        assert_eq!(TrafficTarget::Failing.path(), "/error");
    }

    #[test]
    fn test_from_sample_threshold() {
        assert_eq!(TrafficTarget::from_sample(0.0, 0.2), TrafficTarget::Failing);
        assert_eq!(TrafficTarget::from_sample(0.1999, 0.2), TrafficTarget::Failing);
        assert_eq!(TrafficTarget::from_sample(0.2, 0.2), TrafficTarget::Healthy);
        assert_eq!(TrafficTarget::from_sample(0.999, 0.2), TrafficTarget::Healthy);
    }

    #[test]
    fn test_degenerate_ratios() {
        let mut never = TargetSelector::seeded(7, 0.0);
        let mut always = TargetSelector::seeded(7, 1.0);
        for _ in 0..1_000 {
            assert_eq!(never.next_target(), TrafficTarget::Healthy);
            assert_eq!(always.next_target(), TrafficTarget::Failing);
        }
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let mut a = TargetSelector::seeded(42, DEFAULT_ERROR_RATIO);
        let mut b = TargetSelector::seeded(42, DEFAULT_ERROR_RATIO);
        let seq_a: Vec<_> = (0..100).map(|_| a.next_target()).collect();
        let seq_b: Vec<_> = (0..100).map(|_| b.next_target()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_ratio_is_clamped() {
        assert_eq!(TargetSelector::seeded(1, 1.5).error_ratio(), 1.0);
        assert_eq!(TargetSelector::seeded(1, -0.5).error_ratio(), 0.0);
    }
}
