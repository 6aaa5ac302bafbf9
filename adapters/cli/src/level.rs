//! Deterministic level simulation used to exercise the last-stand flow.

use std::num::NonZeroU32;

use last_stand_core::{Currency, RoundMetrics};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Smallest value a generated collectible can carry, in whole dollars.
const MIN_COLLECTIBLE_VALUE: f32 = 40.0;
/// Largest value a generated collectible can carry, in whole dollars.
const MAX_COLLECTIBLE_VALUE: f32 = 120.0;

/// Simulated level holding the loot the crew has not yet secured.
#[derive(Debug)]
pub(crate) struct Level {
    haul_goal: u32,
    extraction_points: NonZeroU32,
    completed: u32,
    collectibles: Vec<Currency>,
    rng: ChaCha8Rng,
}

impl Level {
    /// Generates a level with randomly valued collectibles.
    pub(crate) fn generate(
        haul_goal: u32,
        extraction_points: NonZeroU32,
        collectible_count: usize,
        mut rng: ChaCha8Rng,
    ) -> Self {
        let collectibles = (0..collectible_count)
            .map(|_| {
                Currency::new(
                    rng.gen_range(MIN_COLLECTIBLE_VALUE..=MAX_COLLECTIBLE_VALUE)
                        .round(),
                )
            })
            .collect();
        Self {
            haul_goal,
            extraction_points,
            completed: 0,
            collectibles,
            rng,
        }
    }

    /// Total value still sitting in the level.
    pub(crate) fn in_level_value(&self) -> Currency {
        self.collectibles
            .iter()
            .fold(Currency::ZERO, |total, value| total + *value)
    }

    /// Number of collectibles still standing.
    pub(crate) fn remaining(&self) -> usize {
        self.collectibles.len()
    }

    /// Metrics snapshot describing the level as it stands right now.
    pub(crate) fn metrics(&self) -> RoundMetrics {
        RoundMetrics::new(
            self.haul_goal,
            self.extraction_points,
            self.completed,
            self.in_level_value(),
        )
    }

    /// Banks one extraction point by securing collectibles worth the
    /// per-point quota.
    ///
    /// Returns `false` when every point is already banked or the level
    /// cannot fill the quota, leaving the level untouched.
    pub(crate) fn bank_point(&mut self) -> bool {
        if self.completed >= self.extraction_points.get() {
            return false;
        }
        let quota = self.metrics().per_point_goal() as f32;
        if self.in_level_value().get() < quota {
            return false;
        }

        let mut secured = 0.0_f32;
        while secured < quota {
            match self.collectibles.pop() {
                Some(value) => secured += value.get(),
                None => break,
            }
        }
        self.completed += 1;
        true
    }

    /// Destroys one randomly chosen collectible.
    ///
    /// The returned metrics are sampled before removal, so the smashed
    /// value is still part of `in_level_value`.
    pub(crate) fn smash_random(&mut self) -> Option<(Currency, RoundMetrics)> {
        if self.collectibles.is_empty() {
            return None;
        }
        let metrics = self.metrics();
        let index = self.rng.gen_range(0..self.collectibles.len());
        let value = self.collectibles.swap_remove(index);
        Some((value, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fixed_level(collectibles: Vec<f32>) -> Level {
        Level {
            haul_goal: 400,
            extraction_points: NonZeroU32::new(4).expect("positive extraction point count"),
            completed: 0,
            collectibles: collectibles.into_iter().map(Currency::new).collect(),
            rng: ChaCha8Rng::seed_from_u64(1),
        }
    }

    #[test]
    fn smash_metrics_still_include_the_victim() {
        let mut level = fixed_level(vec![100.0, 50.0, 25.0]);

        let (value, metrics) = level.smash_random().expect("level holds collectibles");

        assert!(
            ((metrics.in_level_value() - value).get() - level.in_level_value().get()).abs()
                < f32::EPSILON,
            "the snapshot must predate the removal"
        );
        assert_eq!(level.remaining(), 2);
    }

    #[test]
    fn bank_point_secures_the_per_point_quota() {
        let mut level = fixed_level(vec![100.0, 100.0, 50.0]);

        assert!(level.bank_point(), "quota of 100 is coverable");
        assert_eq!(level.completed, 1);
        assert!(
            (level.in_level_value().get() - 100.0).abs() < f32::EPSILON,
            "securing pops 50 then 100, leaving the first collectible"
        );
    }

    #[test]
    fn bank_point_refuses_an_unfillable_quota() {
        let mut level = fixed_level(vec![30.0]);

        assert!(!level.bank_point());
        assert_eq!(level.completed, 0);
        assert_eq!(level.remaining(), 1, "a refused bank leaves the level alone");
    }

    #[test]
    fn empty_level_has_nothing_to_smash() {
        let mut level = fixed_level(Vec::new());
        assert!(level.smash_random().is_none());
    }

    #[test]
    fn generation_honours_the_requested_count() {
        let level = Level::generate(
            400,
            NonZeroU32::new(4).expect("positive extraction point count"),
            12,
            ChaCha8Rng::seed_from_u64(7),
        );

        assert_eq!(level.remaining(), 12);
        assert!(level.in_level_value().get() >= 12.0 * MIN_COLLECTIBLE_VALUE);
        assert!(level.in_level_value().get() <= 12.0 * MAX_COLLECTIBLE_VALUE);
    }
}
