//! Error types for the HORDE simulation.

use thiserror::Error;

use crate::enums::GamePhase;
use crate::types::{EntityHandle, WeaponId};

/// Result type for configuration loading and table construction.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Malformed configuration. Fatal at initialization.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A seed table that must have at least one entry is empty.
    #[error("{table}: seed table is empty")]
    EmptySeed { table: String },

    /// The level curve seed goes down somewhere.
    #[error("{table}: seed entry {index} is lower than the one before it")]
    DecreasingSeed { table: String, index: usize },

    /// A generated table was asked for zero levels.
    #[error("{table}: level count must be positive")]
    NonPositiveLevelCount { table: String },

    /// A weapon was configured without any level entries.
    #[error("weapon `{weapon}` has no level entries")]
    EmptyWeaponLevels { weapon: String },

    /// A periodic task was configured with a non-positive interval or batch.
    #[error("{setting} must be positive")]
    NonPositiveSetting { setting: &'static str },

    /// The configuration document could not be parsed.
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A purchase or level-up was attempted at the top tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("already at max level {level}")]
pub struct MaxLevelError {
    pub level: usize,
}

/// A player command that was rejected by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The command does not apply in the current phase.
    #[error("command not valid in phase {phase:?}")]
    WrongPhase { phase: GamePhase },

    /// The selected weapon was not among the offered upgrades.
    #[error("weapon {0:?} was not offered")]
    ChoiceNotOffered(WeaponId),

    /// The stat purchase costs more than the current balance.
    #[error("need {cost} coins, have {balance}")]
    InsufficientCoins { cost: u32, balance: i64 },

    #[error(transparent)]
    MaxLevel(#[from] MaxLevelError),

    /// The handle does not refer to a live entity.
    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityHandle),

    /// The boss was reported killed before the countdown ran out.
    #[error("no boss encounter in progress")]
    NoBossEncounter,
}
