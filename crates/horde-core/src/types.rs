//! Fundamental identifiers and simulation time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a simulated entity, shared with the presentation layer.
///
/// The simulation hands these out in `SpawnEntity` requests and expects them
/// back in commands that refer to a specific entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityHandle(pub u64);

/// Identifier of an enemy kind (e.g. `"bat"`). Resolved to a behaviour
/// profile by the AI crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyKind(pub String);

impl EnemyKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EnemyKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Index of a weapon in the player's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(pub u32);

/// Simulation time tracking.
///
/// `elapsed_secs` is scaled time: it only moves while the simulation is
/// running and is multiplied by the current time scale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks in which the scaled clock advanced.
    pub tick: u64,
    /// Elapsed scaled time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` scaled seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
