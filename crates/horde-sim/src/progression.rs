//! Experience curve and the player's level progression.
//!
//! The curve is indexed by level: `curve[L]` is the experience needed to go
//! from level `L - 1` to level `L`. Index 0 is unused by gameplay (a run
//! starts at level 1) but keeps the indexing aligned with level numbers.

use tracing::debug;

use horde_core::constants::{LEVEL_CURVE_GROWTH_DEN, LEVEL_CURVE_GROWTH_NUM, STARTING_LEVEL};
use horde_core::error::{ConfigError, ConfigResult};

const CURVE_TABLE: &str = "level_curve";

/// Monotonically non-decreasing experience thresholds, one per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCurve {
    thresholds: Vec<u32>,
}

impl LevelCurve {
    /// Build a curve of exactly `level_count` entries.
    ///
    /// The seed is used as-is (truncated if longer than `level_count`); each
    /// further entry is `ceil(previous × 1.1)`.
    pub fn generate(seed: &[u32], level_count: usize) -> ConfigResult<Self> {
        if seed.is_empty() {
            return Err(ConfigError::EmptySeed {
                table: CURVE_TABLE.into(),
            });
        }
        if level_count == 0 {
            return Err(ConfigError::NonPositiveLevelCount {
                table: CURVE_TABLE.into(),
            });
        }
        if let Some(index) = seed.windows(2).position(|pair| pair[1] < pair[0]) {
            return Err(ConfigError::DecreasingSeed {
                table: CURVE_TABLE.into(),
                index: index + 1,
            });
        }

        let mut thresholds: Vec<u32> = seed.iter().copied().take(level_count).collect();
        let mut previous = thresholds[thresholds.len() - 1];
        while thresholds.len() < level_count {
            previous = grow(previous);
            thresholds.push(previous);
        }

        Ok(Self { thresholds })
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Always false; a curve holds at least one entry.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Highest reachable level.
    pub fn max_level(&self) -> usize {
        self.thresholds.len() - 1
    }

    /// Experience needed to reach `level`, if the curve has that level.
    pub fn required_for(&self, level: usize) -> Option<u32> {
        self.thresholds.get(level).copied()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.thresholds
    }
}

/// `ceil(previous × 1.1)` in integer arithmetic, saturating at `u32::MAX`.
fn grow(previous: u32) -> u32 {
    let grown = (u64::from(previous) * LEVEL_CURVE_GROWTH_NUM).div_ceil(LEVEL_CURVE_GROWTH_DEN);
    u32::try_from(grown).unwrap_or(u32::MAX)
}

/// Reported when an experience gain crosses a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: usize,
}

/// Current level and experience against a [`LevelCurve`].
#[derive(Debug, Clone)]
pub struct ProgressionTable {
    curve: LevelCurve,
    current_experience: u32,
    current_level: usize,
}

impl ProgressionTable {
    /// Fresh progression at the starting level with no experience.
    pub fn new(curve: LevelCurve) -> Self {
        Self::with_state(curve, STARTING_LEVEL, 0)
    }

    /// Progression at an explicit level, clamped to the curve.
    pub fn with_state(curve: LevelCurve, level: usize, experience: u32) -> Self {
        let current_level = level.min(curve.max_level());
        Self {
            curve,
            current_experience: experience,
            current_level,
        }
    }

    /// Add experience and check once for a level-up.
    ///
    /// At most one level is gained per call; surplus beyond the next
    /// threshold carries over and is checked on the next gain. At the
    /// terminal level experience keeps accumulating but never levels.
    pub fn get_exp(&mut self, amount: u32) -> Option<LevelUp> {
        self.current_experience = self.current_experience.saturating_add(amount);

        let required = self.curve.required_for(self.current_level + 1)?;
        if self.current_experience < required {
            return None;
        }

        self.current_experience -= required;
        self.current_level = (self.current_level + 1).min(self.curve.max_level());
        debug!(
            level = self.current_level,
            carried = self.current_experience,
            "level up"
        );
        Some(LevelUp {
            new_level: self.current_level,
        })
    }

    /// Threshold for the next level. At the terminal level this is the last
    /// curve entry, so the HUD bar stays meaningful.
    pub fn required_for_next(&self) -> u32 {
        self.curve
            .required_for(self.current_level + 1)
            .unwrap_or_else(|| self.curve.thresholds[self.curve.max_level()])
    }

    pub fn is_max_level(&self) -> bool {
        self.current_level >= self.curve.max_level()
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn current_experience(&self) -> u32 {
        self.current_experience
    }

    pub fn curve(&self) -> &LevelCurve {
        &self.curve
    }
}
