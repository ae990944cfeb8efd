//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at time scale 1.0.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// Upper bound accepted by `SetTimeScale`.
pub const MAX_TIME_SCALE: f32 = 4.0;

/// Survival countdown before the boss encounter.
pub const RUN_DURATION_SECS: f32 = 300.0;

// --- Progression ---

/// Growth factor between generated level-curve entries, as a ratio
/// (11 / 10 = ×1.1). Integer form keeps the ceiling exact.
pub const LEVEL_CURVE_GROWTH_NUM: u64 = 11;
pub const LEVEL_CURVE_GROWTH_DEN: u64 = 10;

/// Level a fresh run starts at.
pub const STARTING_LEVEL: usize = 1;

/// Maximum number of upgrade choices offered on level-up.
pub const UPGRADE_CHOICE_COUNT: usize = 3;

// --- Culling ---

/// Seconds of scaled time between culling sweeps.
pub const CULL_INTERVAL_SECS: f32 = 1.0;

/// Entities examined per sweep.
pub const CULL_BATCH_SIZE: usize = 20;

/// Extra distance beyond the spawn rectangle's far corner before an enemy is culled.
pub const DESPAWN_MARGIN: f32 = 4.0;

// --- Pickups ---

/// Seconds between an idle orb's pickup-range checks.
pub const PICKUP_CHECK_INTERVAL_SECS: f32 = 0.2;

/// Distance at which a homing orb counts as collected.
pub const PICKUP_COLLECT_RADIUS: f32 = 0.2;

/// Base homing speed of an orb before the player's move speed is added.
pub const PICKUP_BASE_SPEED: f32 = 2.0;

// --- Enemies ---

/// Speed multiplier applied while an enemy is knocked back.
pub const KNOCKBACK_SPEED_FACTOR: f32 = 2.0;

/// Fallback enemy stats for kinds without a configured profile.
pub const DEFAULT_ENEMY_MOVE_SPEED: f32 = 0.3;
pub const DEFAULT_ENEMY_DAMAGE: f32 = 10.0;
pub const DEFAULT_ENEMY_HEALTH: f32 = 5.0;
pub const DEFAULT_ENEMY_HIT_WAIT_SECS: f32 = 1.0;
pub const DEFAULT_ENEMY_KNOCKBACK_SECS: f32 = 0.5;
pub const DEFAULT_ENEMY_EXP: u32 = 1;
