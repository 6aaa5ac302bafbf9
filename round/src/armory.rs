//! Reward armory construction from startup configuration.

use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use last_stand_core::{RewardCandidate, SpawnRef, Weight};
use serde::{Deserialize, Serialize};

/// Reward table granted when no configuration file overrides it.
const DEFAULT_REWARDS: [(&str, &str, f64); 13] = [
    ("Handgun", "items/Item Gun Handgun", 0.15),
    ("Tranq Gun", "items/Item Gun Tranq", 0.3),
    ("Duct Taped Grenade", "items/Item Grenade Duct Taped", 0.4),
    ("Grenade", "items/Item Grenade Explosive", 0.5),
    ("Shotgun", "items/Item Gun Shotgun", 0.05),
    ("Baseball Bat", "items/Item Melee Baseball Bat", 0.5),
    ("Frying Pan", "items/Item Melee Frying Pan", 0.5),
    ("Inflatable Hammer", "items/Item Melee Inflatable Hammer", 0.4),
    ("Sledge Hammer", "items/Item Melee Sledge Hammer", 0.3),
    ("Sword", "items/Item Melee Sword", 0.3),
    ("Mine", "items/Item Mine Explosive", 0.5),
    ("Rubber Duck", "items/Item Rubber Duck", 0.01),
    ("Valuable Clown", "valuables/03 medium/Valuable Clown", 0.1),
];

/// One configurable reward row: display name, spawn path, and weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    name: String,
    path: String,
    weight: f64,
}

impl RewardEntry {
    /// Creates a reward entry with explicit field values.
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            weight,
        }
    }

    /// Display name of the reward.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Locator path the host resolves when spawning the reward.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Relative likelihood assigned to the reward.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

/// Ordered reward table, read exactly once while building the armory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    rewards: Vec<RewardEntry>,
}

impl RewardConfig {
    /// Creates a configuration from an explicit entry list.
    #[must_use]
    pub fn new(rewards: Vec<RewardEntry>) -> Self {
        Self { rewards }
    }

    /// Entries in author order.
    #[must_use]
    pub fn rewards(&self) -> &[RewardEntry] {
        &self.rewards
    }
}

impl Default for RewardConfig {
    fn default() -> Self {
        let rewards = DEFAULT_REWARDS
            .iter()
            .map(|(name, path, weight)| RewardEntry::new(*name, *path, *weight))
            .collect();
        Self { rewards }
    }
}

/// Reasons a reward configuration fails validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RewardConfigError {
    /// An entry carried an empty name.
    MissingName,
    /// An entry carried an empty spawn path.
    MissingPath {
        /// Name of the offending entry.
        name: String,
    },
    /// An entry's weight was NaN or infinite.
    NonFiniteWeight {
        /// Name of the offending entry.
        name: String,
    },
    /// An entry's weight was below zero.
    NegativeWeight {
        /// Name of the offending entry.
        name: String,
    },
    /// Two entries shared one name.
    DuplicateName {
        /// Name that appeared more than once.
        name: String,
    },
}

impl fmt::Display for RewardConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "a reward entry is missing its name"),
            Self::MissingPath { name } => {
                write!(f, "reward '{name}' is missing its spawn path")
            }
            Self::NonFiniteWeight { name } => {
                write!(f, "reward '{name}' has a non-finite weight")
            }
            Self::NegativeWeight { name } => {
                write!(f, "reward '{name}' has a negative weight")
            }
            Self::DuplicateName { name } => {
                write!(f, "reward '{name}' is configured more than once")
            }
        }
    }
}

impl Error for RewardConfigError {}

/// Validated, ordered reward candidates owned by the round state.
#[derive(Debug)]
pub(crate) struct Armory {
    candidates: Vec<RewardCandidate>,
}

impl Armory {
    /// Builds the candidate list from configuration in a single pass.
    ///
    /// Zero weights are legal (the candidate exists but is never selected);
    /// negative and non-finite weights are configuration mistakes.
    pub(crate) fn from_config(config: &RewardConfig) -> Result<Self, RewardConfigError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut candidates = Vec::with_capacity(config.rewards().len());

        for entry in config.rewards() {
            if entry.name().is_empty() {
                return Err(RewardConfigError::MissingName);
            }
            if entry.path().is_empty() {
                return Err(RewardConfigError::MissingPath {
                    name: entry.name().to_owned(),
                });
            }
            if !entry.weight().is_finite() {
                return Err(RewardConfigError::NonFiniteWeight {
                    name: entry.name().to_owned(),
                });
            }
            if entry.weight() < 0.0 {
                return Err(RewardConfigError::NegativeWeight {
                    name: entry.name().to_owned(),
                });
            }
            if !seen.insert(entry.name()) {
                return Err(RewardConfigError::DuplicateName {
                    name: entry.name().to_owned(),
                });
            }
            candidates.push(RewardCandidate::new(
                entry.name(),
                SpawnRef::new(entry.path()),
                Weight::new(entry.weight()),
            ));
        }

        Ok(Self { candidates })
    }

    /// Candidates in configuration order.
    pub(crate) fn candidates(&self) -> &[RewardCandidate] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_the_shipped_loadout() {
        let config = RewardConfig::default();
        assert_eq!(config.rewards().len(), 13);

        let first = &config.rewards()[0];
        assert_eq!(first.name(), "Handgun");
        assert_eq!(first.path(), "items/Item Gun Handgun");
        assert!((first.weight() - 0.15).abs() < f64::EPSILON);

        let last = &config.rewards()[12];
        assert_eq!(last.name(), "Valuable Clown");
        assert_eq!(last.path(), "valuables/03 medium/Valuable Clown");
    }

    #[test]
    fn armory_preserves_configuration_order() {
        let armory = Armory::from_config(&RewardConfig::default()).expect("valid default table");
        let names: Vec<&str> = armory
            .candidates()
            .iter()
            .map(|candidate| candidate.name())
            .collect();
        assert_eq!(names[0], "Handgun");
        assert_eq!(names[1], "Tranq Gun");
        assert_eq!(names[12], "Valuable Clown");
    }

    #[test]
    fn zero_weight_entries_are_accepted() {
        let config = RewardConfig::new(vec![RewardEntry::new("Dud", "items/Item Dud", 0.0)]);
        let armory = Armory::from_config(&config).expect("zero weights are legal");
        assert_eq!(armory.candidates().len(), 1);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let config = RewardConfig::new(vec![RewardEntry::new("Broken", "items/Item Broken", -0.5)]);
        assert_eq!(
            Armory::from_config(&config).err(),
            Some(RewardConfigError::NegativeWeight {
                name: "Broken".to_owned(),
            })
        );
    }

    #[test]
    fn non_finite_weight_is_rejected() {
        let config =
            RewardConfig::new(vec![RewardEntry::new("Cursed", "items/Item Cursed", f64::NAN)]);
        assert_eq!(
            Armory::from_config(&config).err(),
            Some(RewardConfigError::NonFiniteWeight {
                name: "Cursed".to_owned(),
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let config = RewardConfig::new(vec![
            RewardEntry::new("Handgun", "items/Item Gun Handgun", 0.15),
            RewardEntry::new("Handgun", "items/Item Gun Handgun", 0.3),
        ]);
        assert_eq!(
            Armory::from_config(&config).err(),
            Some(RewardConfigError::DuplicateName {
                name: "Handgun".to_owned(),
            })
        );
    }

    #[test]
    fn empty_name_and_path_are_rejected() {
        let nameless = RewardConfig::new(vec![RewardEntry::new("", "items/Item Gun Handgun", 0.1)]);
        assert_eq!(
            Armory::from_config(&nameless).err(),
            Some(RewardConfigError::MissingName)
        );

        let pathless = RewardConfig::new(vec![RewardEntry::new("Handgun", "", 0.1)]);
        assert_eq!(
            Armory::from_config(&pathless).err(),
            Some(RewardConfigError::MissingPath {
                name: "Handgun".to_owned(),
            })
        );
    }

    #[test]
    fn display_messages_name_the_offender() {
        let error = RewardConfigError::NegativeWeight {
            name: "Rubber Duck".to_owned(),
        };
        assert_eq!(error.to_string(), "reward 'Rubber Duck' has a negative weight");
    }
}
