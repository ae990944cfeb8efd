//! Purchasable player stats.
//!
//! Each stat is a tiered table of `(cost, value)` entries plus the level the
//! player has bought up to. Tables can be extrapolated past their seed by
//! repeating the step between the first two entries.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use horde_core::enums::StatKind;
use horde_core::error::{ConfigError, ConfigResult, MaxLevelError};

use crate::config::StatsConfig;

/// One tier of a stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatLevelEntry {
    /// Coins needed to buy this tier.
    pub cost: u32,
    pub value: f32,
}

impl StatLevelEntry {
    pub fn new(cost: u32, value: f32) -> Self {
        Self { cost, value }
    }
}

/// Ordered tiers for one stat. Grows, never shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTable {
    name: String,
    entries: Vec<StatLevelEntry>,
}

impl StatTable {
    pub fn new(name: impl Into<String>, entries: Vec<StatLevelEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Append extrapolated tiers until the table holds `target_len` entries.
    ///
    /// The increments are taken from entries 0 and 1. With fewer than two
    /// entries there is nothing to extrapolate from; the table is left as is.
    pub fn extend_to(&mut self, target_len: usize) {
        if self.entries.len() >= target_len {
            return;
        }
        if self.entries.len() < 2 {
            warn!(
                stat = %self.name,
                entries = self.entries.len(),
                "need at least two seed entries to extend a stat table"
            );
            return;
        }

        let cost_step = self.entries[1].cost;
        let value_step = self.entries[1].value - self.entries[0].value;
        let mut last = self.entries[self.entries.len() - 1];
        while self.entries.len() < target_len {
            last = StatLevelEntry {
                cost: last.cost.saturating_add(cost_step),
                value: last.value + value_step,
            };
            self.entries.push(last);
        }
        debug!(stat = %self.name, len = target_len, "stat table extended");
    }

    /// Buy the tier after `level`.
    ///
    /// Increments `level`, debits that tier's cost from `balance` and returns
    /// the new value. The balance is not checked here and may go negative;
    /// callers that need affordability check [`StatTable::next_cost`] first.
    pub fn purchase(&self, level: &mut usize, balance: &mut i64) -> Result<f32, MaxLevelError> {
        let entry = self
            .entries
            .get(*level + 1)
            .ok_or(MaxLevelError { level: *level })?;
        *level += 1;
        *balance -= i64::from(entry.cost);
        Ok(entry.value)
    }

    /// Cost of the tier after `level`, or `None` at the top tier.
    pub fn next_cost(&self, level: usize) -> Option<u32> {
        self.entries.get(level + 1).map(|e| e.cost)
    }

    pub fn value_at(&self, level: usize) -> Option<f32> {
        self.entries.get(level).map(|e| e.value)
    }

    pub fn is_max(&self, level: usize) -> bool {
        level + 1 >= self.entries.len()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StatLevelEntry] {
        &self.entries
    }
}

/// A stat table and how far up it the player has bought.
#[derive(Debug, Clone)]
pub struct StatTrack {
    pub table: StatTable,
    pub level: usize,
}

impl StatTrack {
    pub fn value(&self) -> f32 {
        // level only ever moves through `purchase`, which bounds it
        self.table.value_at(self.level).unwrap_or_default()
    }
}

/// All four purchasable stats.
#[derive(Debug, Clone)]
pub struct PlayerStats {
    tracks: [StatTrack; 4],
}

impl PlayerStats {
    /// Build every stat table from config, extending those with a level count.
    pub fn from_config(config: &StatsConfig) -> ConfigResult<Self> {
        let build = |kind: StatKind| -> ConfigResult<StatTrack> {
            let table_config = config.get(kind);
            if table_config.seed.is_empty() {
                return Err(ConfigError::EmptySeed {
                    table: kind.as_str().into(),
                });
            }
            let mut table = StatTable::new(kind.as_str(), table_config.seed.clone());
            if let Some(count) = table_config.level_count {
                if count == 0 {
                    return Err(ConfigError::NonPositiveLevelCount {
                        table: kind.as_str().into(),
                    });
                }
                table.extend_to(count);
            }
            Ok(StatTrack { table, level: 0 })
        };

        Ok(Self {
            tracks: [
                build(StatKind::MoveSpeed)?,
                build(StatKind::Health)?,
                build(StatKind::PickupRange)?,
                build(StatKind::MaxWeapons)?,
            ],
        })
    }

    pub fn track(&self, kind: StatKind) -> &StatTrack {
        &self.tracks[slot(kind)]
    }

    /// Current value of a stat.
    pub fn value(&self, kind: StatKind) -> f32 {
        self.track(kind).value()
    }

    pub fn next_cost(&self, kind: StatKind) -> Option<u32> {
        let track = self.track(kind);
        track.table.next_cost(track.level)
    }

    /// Buy the next tier of `kind`, debiting `balance`.
    pub fn purchase(&mut self, kind: StatKind, balance: &mut i64) -> Result<f32, MaxLevelError> {
        let track = &mut self.tracks[slot(kind)];
        track.table.purchase(&mut track.level, balance)
    }

    /// Levels in `StatKind::ALL` order.
    pub fn levels(&self) -> [usize; 4] {
        [
            self.tracks[0].level,
            self.tracks[1].level,
            self.tracks[2].level,
            self.tracks[3].level,
        ]
    }

    /// Back to tier 0 for a new run. Tables keep their length.
    pub fn reset(&mut self) {
        for track in &mut self.tracks {
            track.level = 0;
        }
    }
}

fn slot(kind: StatKind) -> usize {
    match kind {
        StatKind::MoveSpeed => 0,
        StatKind::Health => 1,
        StatKind::PickupRange => 2,
        StatKind::MaxWeapons => 3,
    }
}
