//! Weapon definitions and the player's arsenal.
//!
//! A weapon owns a table of per-level stats and a current level. The arsenal
//! sorts every configured weapon into exactly one of three collections:
//! inactive (not acquired), active (owned and upgradable) and fully leveled.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use horde_core::constants::UPGRADE_CHOICE_COUNT;
use horde_core::enums::WeaponStatus;
use horde_core::error::{ConfigError, ConfigResult};
use horde_core::state::{UpgradeChoiceView, WeaponView};
use horde_core::types::WeaponId;

use crate::config::WeaponConfig;

/// Stats for one weapon level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponLevelEntry {
    pub speed: f32,
    pub damage: f32,
    pub size: f32,
    pub range: f32,
    /// Seconds between attacks.
    pub attack_interval: f32,
    pub projectile_count: f32,
    pub duration: f32,
    /// Shown on the level-up panel when this level is current.
    pub upgrade_description: String,
}

impl Default for WeaponLevelEntry {
    fn default() -> Self {
        Self {
            speed: 1.0,
            damage: 1.0,
            size: 1.0,
            range: 1.0,
            attack_interval: 1.0,
            projectile_count: 1.0,
            duration: 1.0,
            upgrade_description: String::new(),
        }
    }
}

/// What a level-up request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUpOutcome {
    /// Moved up one level, still upgradable.
    Upgraded { level: usize },
    /// Moved up to the last level.
    FullyLeveled { level: usize },
    /// Already at the last level; nothing changed.
    AtCap,
}

#[derive(Debug, Clone)]
pub struct WeaponDefinition {
    id: WeaponId,
    name: String,
    stats: Vec<WeaponLevelEntry>,
    current_level: usize,
    /// Set when the current level's stats have not been applied yet.
    stats_dirty: bool,
}

impl WeaponDefinition {
    pub fn new(id: WeaponId, name: impl Into<String>, stats: Vec<WeaponLevelEntry>) -> ConfigResult<Self> {
        let name = name.into();
        if stats.is_empty() {
            return Err(ConfigError::EmptyWeaponLevels { weapon: name });
        }
        Ok(Self {
            id,
            name,
            stats,
            current_level: 0,
            stats_dirty: true,
        })
    }

    /// Advance one level, capped at the last stats entry.
    pub fn level_up(&mut self) -> LevelUpOutcome {
        if self.is_fully_leveled() {
            return LevelUpOutcome::AtCap;
        }
        self.current_level += 1;
        self.stats_dirty = true;
        if self.is_fully_leveled() {
            LevelUpOutcome::FullyLeveled {
                level: self.current_level,
            }
        } else {
            LevelUpOutcome::Upgraded {
                level: self.current_level,
            }
        }
    }

    pub fn is_fully_leveled(&self) -> bool {
        self.current_level + 1 >= self.stats.len()
    }

    pub fn current_stats(&self) -> &WeaponLevelEntry {
        &self.stats[self.current_level]
    }

    /// Current stats if they changed since the last call.
    pub fn take_dirty_stats(&mut self) -> Option<&WeaponLevelEntry> {
        if !self.stats_dirty {
            return None;
        }
        self.stats_dirty = false;
        Some(&self.stats[self.current_level])
    }

    pub fn id(&self) -> WeaponId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn max_level(&self) -> usize {
        self.stats.len() - 1
    }

    fn reset(&mut self) {
        self.current_level = 0;
        self.stats_dirty = true;
    }
}

/// Every configured weapon, partitioned by ownership.
#[derive(Debug, Clone)]
pub struct Arsenal {
    weapons: Vec<WeaponDefinition>,
    active: Vec<WeaponId>,
    inactive: Vec<WeaponId>,
    fully_leveled: Vec<WeaponId>,
}

impl Arsenal {
    /// Weapon ids are their position in the config list.
    pub fn from_config(configs: &[WeaponConfig]) -> ConfigResult<Self> {
        let weapons = configs
            .iter()
            .enumerate()
            .map(|(i, c)| WeaponDefinition::new(WeaponId(i as u32), c.name.clone(), c.levels.clone()))
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self::new(weapons))
    }

    /// All weapons start inactive.
    pub fn new(weapons: Vec<WeaponDefinition>) -> Self {
        let inactive = weapons.iter().map(|w| w.id).collect();
        Self {
            weapons,
            active: Vec::new(),
            inactive,
            fully_leveled: Vec::new(),
        }
    }

    pub fn get(&self, id: WeaponId) -> Option<&WeaponDefinition> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WeaponId) -> Option<&mut WeaponDefinition> {
        self.weapons.iter_mut().find(|w| w.id == id)
    }

    pub fn status(&self, id: WeaponId) -> WeaponStatus {
        if self.active.contains(&id) {
            WeaponStatus::Active
        } else if self.fully_leveled.contains(&id) {
            WeaponStatus::FullyLeveled
        } else {
            WeaponStatus::Inactive
        }
    }

    pub fn active(&self) -> &[WeaponId] {
        &self.active
    }

    pub fn inactive(&self) -> &[WeaponId] {
        &self.inactive
    }

    pub fn fully_leveled(&self) -> &[WeaponId] {
        &self.fully_leveled
    }

    /// Weapons the player holds, upgradable ones first.
    pub fn owned(&self) -> Vec<WeaponId> {
        self.active
            .iter()
            .chain(self.fully_leveled.iter())
            .copied()
            .collect()
    }

    pub fn owned_count(&self) -> usize {
        self.active.len() + self.fully_leveled.len()
    }

    /// Move an inactive weapon into the player's hands. Returns false if it
    /// was not inactive.
    pub fn acquire(&mut self, id: WeaponId) -> bool {
        let Some(slot) = self.inactive.iter().position(|&w| w == id) else {
            return false;
        };
        self.inactive.remove(slot);

        let single_level = self.get(id).is_some_and(|w| w.is_fully_leveled());
        if single_level {
            self.fully_leveled.push(id);
        } else {
            self.active.push(id);
        }
        info!(weapon = ?id, "weapon acquired");
        true
    }

    /// Acquire a random inactive weapon (the run's starting weapon).
    pub fn acquire_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<WeaponId> {
        let id = *self.inactive.choose(rng)?;
        self.acquire(id);
        Some(id)
    }

    /// Level up an owned weapon, moving it to the fully-leveled set when it
    /// reaches its last level. `None` if the weapon is not owned.
    pub fn level_up(&mut self, id: WeaponId) -> Option<LevelUpOutcome> {
        match self.status(id) {
            WeaponStatus::Inactive => None,
            WeaponStatus::FullyLeveled => Some(LevelUpOutcome::AtCap),
            WeaponStatus::Active => {
                let outcome = self.get_mut(id)?.level_up();
                if let LevelUpOutcome::FullyLeveled { level } = outcome {
                    self.active.retain(|&w| w != id);
                    self.fully_leveled.push(id);
                    debug!(weapon = ?id, level, "weapon fully leveled");
                }
                Some(outcome)
            }
        }
    }

    /// Pick up to three distinct upgrade choices.
    ///
    /// The pool is one random active weapon plus, while the player has room
    /// for another weapon, every inactive weapon.
    pub fn choose_upgrades<R: Rng + ?Sized>(&self, rng: &mut R, max_weapons: usize) -> Vec<WeaponId> {
        let mut pool = Vec::with_capacity(self.inactive.len() + 1);
        if let Some(&upgrade) = self.active.choose(rng) {
            pool.push(upgrade);
        }
        if self.owned_count() < max_weapons {
            pool.extend(self.inactive.iter().copied());
        }
        let (drawn, _) = pool.partial_shuffle(rng, UPGRADE_CHOICE_COUNT);
        drawn.to_vec()
    }

    /// How a choice is presented on the level-up panel.
    pub fn choice_view(&self, id: WeaponId) -> Option<UpgradeChoiceView> {
        let weapon = self.get(id)?;
        let unlock = self.status(id) == WeaponStatus::Inactive;
        let description = if unlock {
            format!("Unlock {}", weapon.name)
        } else {
            weapon.current_stats().upgrade_description.clone()
        };
        Some(UpgradeChoiceView {
            weapon: id,
            name: weapon.name.clone(),
            level: if unlock { 0 } else { weapon.current_level },
            description,
            unlock,
        })
    }

    pub fn views(&self) -> Vec<WeaponView> {
        self.weapons
            .iter()
            .map(|w| WeaponView {
                id: w.id,
                name: w.name.clone(),
                level: w.current_level,
                max_level: w.max_level(),
                status: self.status(w.id),
            })
            .collect()
    }

    /// Everything inactive and back to level 0, for a new run.
    pub fn reset(&mut self) {
        for weapon in &mut self.weapons {
            weapon.reset();
        }
        self.active.clear();
        self.fully_leveled.clear();
        self.inactive = self.weapons.iter().map(|w| w.id).collect();
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
