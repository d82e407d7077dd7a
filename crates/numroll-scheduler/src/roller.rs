//! Random number source for a round.

use numroll_core::RollConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::round::Round;

/// Inclusive bounds for a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollBounds {
    pub min: i64,
    pub max: i64,
}

impl RollBounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl From<&RollConfig> for RollBounds {
    fn from(config: &RollConfig) -> Self {
        Self::new(config.min_number, config.max_number)
    }
}

/// Rolls uniform numbers in `[min, max]`.
pub struct Roller<R = StdRng> {
    bounds: RollBounds,
    rng: R,
}

impl Roller<StdRng> {
    pub fn new(bounds: RollBounds) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Reproducible rolls, for dry runs and tests.
    pub fn seeded(bounds: RollBounds, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Roller<R> {
    pub fn with_rng(bounds: RollBounds, rng: R) -> Self {
        Self { bounds, rng }
    }

    pub fn bounds(&self) -> RollBounds {
        self.bounds
    }

    pub fn roll(&mut self) -> i64 {
        // Settings checks guarantee min <= max; fall back to min otherwise.
        if self.bounds.min >= self.bounds.max {
            return self.bounds.min;
        }
        self.rng.gen_range(self.bounds.min..=self.bounds.max)
    }

    /// Roll once for every user, in order.
    pub fn roll_round(&mut self, users: &[u64]) -> Round {
        let rolls: Vec<(u64, i64)> = users.iter().map(|&user| (user, self.roll())).collect();
        tracing::debug!("Rolled {} numbers in {}..={}", rolls.len(), self.bounds.min, self.bounds.max);
        Round::new(rolls)
    }
}
