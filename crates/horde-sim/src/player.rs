//! Player attributes derived from the purchased stats.

use glam::Vec2;

use horde_core::enums::StatKind;

use crate::stats::PlayerStats;

#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub move_speed: f32,
    pub pickup_range: f32,
    pub max_weapons: u32,
    pub coins: i64,
}

impl PlayerState {
    /// Full health at the origin, attributes taken from the current tiers.
    pub fn from_stats(stats: &PlayerStats) -> Self {
        let max_health = stats.value(StatKind::Health);
        Self {
            position: Vec2::ZERO,
            health: max_health,
            max_health,
            move_speed: stats.value(StatKind::MoveSpeed),
            pickup_range: stats.value(StatKind::PickupRange),
            max_weapons: weapon_slots(stats.value(StatKind::MaxWeapons)),
            coins: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Apply damage. Returns true only on the hit that kills.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount.max(0.0)).max(0.0);
        !self.is_alive()
    }

    /// Apply a freshly purchased stat value. A health purchase also heals by
    /// the amount the maximum grew.
    pub fn apply_stat(&mut self, kind: StatKind, previous: f32, value: f32) {
        match kind {
            StatKind::MoveSpeed => self.move_speed = value,
            StatKind::Health => {
                self.max_health = value;
                self.health = (self.health + value - previous).min(value);
            }
            StatKind::PickupRange => self.pickup_range = value,
            StatKind::MaxWeapons => self.max_weapons = weapon_slots(value),
        }
    }
}

fn weapon_slots(value: f32) -> u32 {
    value.max(0.0).round() as u32
}
