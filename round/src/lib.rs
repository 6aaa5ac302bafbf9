#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative round state management for the Last Stand engine.

mod armory;

pub use armory::{RewardConfig, RewardConfigError, RewardEntry};

use armory::Armory;
use last_stand_core::{Command, Event, RoundSeed};

/// Represents the authoritative state of the last-stand track.
#[derive(Debug)]
pub struct RoundState {
    last_stand_active: bool,
    seed: Option<RoundSeed>,
    armory: Armory,
}

impl RoundState {
    /// Builds the round state, materialising the reward armory from the
    /// provided configuration in a single pass.
    ///
    /// Constructed once at process start; rounds reuse the same candidates.
    pub fn new(config: &RewardConfig) -> Result<Self, RewardConfigError> {
        Ok(Self {
            last_stand_active: false,
            seed: None,
            armory: Armory::from_config(config)?,
        })
    }
}

/// Applies the provided command to the round state, mutating it deterministically.
pub fn apply(state: &mut RoundState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BeginRound { seed } => {
            state.last_stand_active = false;
            state.seed = Some(seed);
            out_events.push(Event::RoundStarted { seed });
        }
        Command::CompleteHaul => {
            state.last_stand_active = false;
            out_events.push(Event::HaulCompleted);
        }
        Command::DestroyCollectible { value, metrics } => {
            // The store is the single event source; destruction facts pass
            // through unchanged for systems to evaluate.
            out_events.push(Event::CollectibleDestroyed { value, metrics });
        }
        Command::ActivateLastStand => {
            if !state.last_stand_active {
                state.last_stand_active = true;
                out_events.push(Event::LastStandActivated);
            }
        }
    }
}

/// Read-only queries over the authoritative round state.
pub mod query {
    use super::RoundState;
    use last_stand_core::{RewardCandidate, RoundSeed};

    /// Reports whether the current round is in last stand.
    #[must_use]
    pub fn last_stand_active(state: &RoundState) -> bool {
        state.last_stand_active
    }

    /// Provides the ordered reward candidates available to the pity grant.
    #[must_use]
    pub fn reward_candidates(state: &RoundState) -> &[RewardCandidate] {
        state.armory.candidates()
    }

    /// Seed of the round currently in progress, if one has started.
    #[must_use]
    pub fn round_seed(state: &RoundState) -> Option<RoundSeed> {
        state.seed
    }
}
