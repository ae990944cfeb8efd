//! Weapon cooldowns.
//!
//! Every owned weapon, fully leveled ones included, attacks once per attack
//! interval. Firing is reported to the presentation, which owns projectiles
//! and hit detection. A weapon whose stats changed fires at once, in the
//! first tick that sees the change.

use std::collections::HashMap;

use horde_core::events::PresentationRequest;
use horde_core::types::WeaponId;

use crate::weapon::Arsenal;

pub fn run(
    arsenal: &mut Arsenal,
    cooldowns: &mut HashMap<WeaponId, f32>,
    dt: f32,
    requests: &mut Vec<PresentationRequest>,
) {
    for id in arsenal.owned() {
        let Some(weapon) = arsenal.get_mut(id) else {
            continue;
        };
        let timer = cooldowns.entry(id).or_insert(0.0);
        if weapon.take_dirty_stats().is_some() {
            *timer = 0.0;
        }

        *timer -= dt;
        if *timer > 0.0 {
            continue;
        }

        let stats = weapon.current_stats();
        *timer = stats.attack_interval;
        requests.push(PresentationRequest::WeaponFired {
            weapon: id,
            damage: stats.damage,
            speed: stats.speed,
            size: stats.size,
            range: stats.range,
            projectile_count: stats.projectile_count.max(0.0).round() as u32,
            duration: stats.duration,
        });
    }
}
