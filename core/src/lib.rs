#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Last Stand engine.
//!
//! This crate defines the message surface that connects the host adapter, the
//! authoritative round state, and pure systems. The host submits [`Command`]
//! values describing round happenings, the round state executes those commands
//! via its `apply` entry point, and then broadcasts [`Event`] values for
//! systems to react to deterministically. Systems consume event streams, read
//! immutable snapshots, and respond exclusively with new command batches plus
//! host-effect directives.

use std::num::NonZeroU32;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Commands that express everything the host may feed into the round state.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reports that the host started a new round.
    BeginRound {
        /// Seed the host assigned to the round, carried for logging and replay.
        seed: RoundSeed,
    },
    /// Reports that every extraction point in the round has been completed.
    CompleteHaul,
    /// Reports that a collectible broke before leaving the live set.
    DestroyCollectible {
        /// Dollar value the collectible carried at the moment it broke.
        value: Currency,
        /// Round progress snapshot taken before the collectible was removed.
        metrics: RoundMetrics,
    },
    /// Requests the terminal last-stand transition for the current round.
    ActivateLastStand,
}

/// Events broadcast by the round state after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new round began and prior stand state was cleared.
    RoundStarted {
        /// Seed the host assigned to the round.
        seed: RoundSeed,
    },
    /// Announces that every extraction point was completed.
    HaulCompleted,
    /// Relays a collectible destruction for systems to evaluate.
    CollectibleDestroyed {
        /// Dollar value the collectible carried at the moment it broke.
        value: Currency,
        /// Round progress snapshot taken before the collectible was removed.
        metrics: RoundMetrics,
    },
    /// Confirms the round entered last stand. Emitted once per round.
    LastStandActivated,
}

/// Dollar value carried by collectibles and haul arithmetic.
///
/// Backed by `f32` because the host sums live collectible values in
/// single-precision floats. Arithmetic never clamps; intermediate results may
/// dip below zero.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Currency(f32);

impl Currency {
    /// Zero dollars.
    pub const ZERO: Currency = Currency(0.0);

    /// Creates a currency value from a raw dollar amount.
    #[must_use]
    pub const fn new(dollars: f32) -> Self {
        Self(dollars)
    }

    /// Retrieves the raw dollar amount.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency(self.0 + rhs.0)
    }
}

impl Sub for Currency {
    type Output = Currency;

    fn sub(self, rhs: Currency) -> Currency {
        Currency(self.0 - rhs.0)
    }
}

/// Relative likelihood assigned to a reward candidate.
///
/// Candidate construction validates non-negativity and finiteness; the
/// selection walk itself tolerates arbitrary values.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Weight(f64);

impl Weight {
    /// Creates a weight from a raw likelihood value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Retrieves the raw likelihood value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

/// Seed the host assigned to a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundSeed(u64);

impl RoundSeed {
    /// Creates a new round seed wrapper.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the underlying seed value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Opaque locator the host resolves to a spawnable object.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnRef(String);

impl SpawnRef {
    /// Creates a spawn reference from an asset locator path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrows the asset locator path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One entry in the ordered reward table, immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardCandidate {
    name: String,
    spawn_ref: SpawnRef,
    weight: Weight,
}

impl RewardCandidate {
    /// Creates a reward candidate with an explicit name, locator, and weight.
    #[must_use]
    pub fn new(name: impl Into<String>, spawn_ref: SpawnRef, weight: Weight) -> Self {
        Self {
            name: name.into(),
            spawn_ref,
            weight,
        }
    }

    /// Display name of the reward.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locator the host resolves when spawning the reward.
    #[must_use]
    pub const fn spawn_ref(&self) -> &SpawnRef {
        &self.spawn_ref
    }

    /// Relative likelihood of this candidate being granted.
    #[must_use]
    pub const fn weight(&self) -> Weight {
        self.weight
    }
}

/// Read-only round progress snapshot supplied by the host per destruction.
///
/// Sampled before the destroyed collectible leaves the live set, so
/// [`RoundMetrics::in_level_value`] still includes the destroyed value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundMetrics {
    haul_goal: u32,
    extraction_point_count: NonZeroU32,
    extraction_points_completed: u32,
    in_level_value: Currency,
}

impl RoundMetrics {
    /// Creates a metrics snapshot.
    ///
    /// Debug builds assert that the completed count never exceeds the number
    /// of extraction points; the host guarantees this during an active round.
    #[must_use]
    pub fn new(
        haul_goal: u32,
        extraction_point_count: NonZeroU32,
        extraction_points_completed: u32,
        in_level_value: Currency,
    ) -> Self {
        debug_assert!(
            extraction_points_completed <= extraction_point_count.get(),
            "completed extraction points exceed the extraction point count"
        );
        Self {
            haul_goal,
            extraction_point_count,
            extraction_points_completed,
            in_level_value,
        }
    }

    /// Total dollar value required to clear the round.
    #[must_use]
    pub const fn haul_goal(&self) -> u32 {
        self.haul_goal
    }

    /// Number of extraction points in the round.
    #[must_use]
    pub const fn extraction_point_count(&self) -> NonZeroU32 {
        self.extraction_point_count
    }

    /// Number of extraction points already completed.
    #[must_use]
    pub const fn extraction_points_completed(&self) -> u32 {
        self.extraction_points_completed
    }

    /// Summed dollar value of all collectibles still in the level.
    #[must_use]
    pub const fn in_level_value(&self) -> Currency {
        self.in_level_value
    }

    /// Share of the haul goal each extraction point contributes.
    ///
    /// Unsigned integer division, so the share rounds down.
    #[must_use]
    pub const fn per_point_goal(&self) -> u32 {
        self.haul_goal / self.extraction_point_count.get()
    }

    /// Dollar value already banked through completed extraction points.
    #[must_use]
    pub fn extracted_value(&self) -> Currency {
        let banked =
            u64::from(self.extraction_points_completed) * u64::from(self.per_point_goal());
        Currency::new(banked as f32)
    }

    /// The haul goal expressed as a currency amount for comparisons.
    #[must_use]
    pub fn goal_value(&self) -> Currency {
        Currency::new(self.haul_goal as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::{Currency, NonZeroU32, RewardCandidate, RoundMetrics, RoundSeed, SpawnRef, Weight};
    use serde::{de::DeserializeOwned, Serialize};

    fn points(count: u32) -> NonZeroU32 {
        NonZeroU32::new(count).expect("extraction point count must be positive")
    }

    #[test]
    fn per_point_goal_rounds_down() {
        let metrics = RoundMetrics::new(100, points(3), 0, Currency::ZERO);
        assert_eq!(metrics.per_point_goal(), 33);
    }

    #[test]
    fn extracted_value_scales_with_completed_points() {
        let metrics = RoundMetrics::new(100, points(2), 1, Currency::new(60.0));
        assert_eq!(metrics.per_point_goal(), 50);
        assert_eq!(metrics.extracted_value(), Currency::new(50.0));
    }

    #[test]
    fn extracted_value_is_zero_before_any_completion() {
        let metrics = RoundMetrics::new(1_400, points(4), 0, Currency::new(2_000.0));
        assert_eq!(metrics.extracted_value(), Currency::ZERO);
    }

    #[test]
    fn currency_arithmetic_matches_expectation() {
        let projected = Currency::new(50.0) + Currency::new(49.0);
        assert_eq!(projected, Currency::new(99.0));
        assert!(projected < Currency::new(100.0));

        let remaining = Currency::new(60.0) - Currency::new(11.0);
        assert_eq!(remaining, Currency::new(49.0));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn round_seed_round_trips_through_bincode() {
        assert_round_trip(&RoundSeed::new(0x5eed));
    }

    #[test]
    fn reward_candidate_round_trips_through_bincode() {
        let candidate = RewardCandidate::new(
            "Handgun",
            SpawnRef::new("items/Item Gun Handgun"),
            Weight::new(0.15),
        );
        assert_round_trip(&candidate);
    }

    #[test]
    fn round_metrics_round_trip_through_bincode() {
        let metrics = RoundMetrics::new(1_400, points(2), 1, Currency::new(612.5));
        assert_round_trip(&metrics);
    }
}
