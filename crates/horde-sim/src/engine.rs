//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and all run state, processes
//! player commands, runs the systems on the scaled clock, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use horde_ai::fsm::begin_knockback;
use horde_ai::profiles::get_profile;
use horde_core::commands::PlayerCommand;
use horde_core::components::{Enemy, EnemyBrain, Health, Position};
use horde_core::constants::{DT, MAX_TIME_SCALE};
use horde_core::enums::{EnemyPhase, GamePhase, LevelOutcome, StatKind, WeaponStatus};
use horde_core::error::{CommandError, ConfigResult, MaxLevelError};
use horde_core::events::{PresentationRequest, SpawnedEntity};
use horde_core::state::GameStateSnapshot;
use horde_core::types::{EnemyKind, EntityHandle, SimTime, WeaponId};

use crate::config::GameConfig;
use crate::player::PlayerState;
use crate::progression::{LevelCurve, ProgressionTable};
use crate::stats::PlayerStats;
use crate::systems;
use crate::systems::cleanup::{CullSchedule, EntityCullingSweep};
use crate::systems::pickups::PickupContext;
use crate::systems::run_timer::RunTimer;
use crate::systems::snapshot::SnapshotSources;
use crate::systems::wave_spawner::WaveScheduler;
use crate::weapon::Arsenal;
use crate::world_setup::{self, entity_of, handle_of};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    /// Phase to return to on resume.
    paused_from: GamePhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    requests: Vec<PresentationRequest>,
    config: GameConfig,

    // --- Progression ---
    curve: LevelCurve,
    progression: ProgressionTable,
    /// Level-ups earned while a panel was already open.
    queued_level_ups: u32,
    pending_choices: Vec<WeaponId>,

    // --- Player ---
    stats: PlayerStats,
    player: PlayerState,
    arsenal: Arsenal,
    weapon_cooldowns: HashMap<WeaponId, f32>,

    // --- Spawning and culling ---
    run_timer: RunTimer,
    waves: WaveScheduler,
    culling: EntityCullingSweep<Entity>,
    cull_schedule: CullSchedule,
    despawn_distance: f32,
}

impl SimulationEngine {
    /// Create a new simulation engine. Fails if the game config is malformed.
    pub fn new(config: SimConfig) -> ConfigResult<Self> {
        let game = config.game;
        game.validate()?;

        let curve = LevelCurve::generate(&game.level_curve.seed, game.level_curve.level_count)?;
        let stats = PlayerStats::from_config(&game.stats)?;
        let arsenal = Arsenal::from_config(&game.weapons)?;
        let player = PlayerState::from_stats(&stats);

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            paused_from: GamePhase::Active,
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            requests: Vec::new(),
            progression: ProgressionTable::new(curve.clone()),
            curve,
            queued_level_ups: 0,
            pending_choices: Vec::new(),
            stats,
            player,
            arsenal,
            weapon_cooldowns: HashMap::new(),
            run_timer: RunTimer::new(game.run_duration_secs),
            waves: WaveScheduler::new(game.waves.clone(), game.spawn_boundary),
            culling: EntityCullingSweep::new(),
            cull_schedule: CullSchedule::new(game.culling.interval_secs),
            despawn_distance: game.despawn_distance(),
            config: game,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Commands are always processed; systems only run while `Active`, on a
    /// clock scaled by the time scale.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        let dt = DT * self.time_scale;
        if !self.phase.is_frozen() && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let requests = std::mem::take(&mut self.requests);
        systems::snapshot::build_snapshot(
            &SnapshotSources {
                time: self.time,
                phase: self.phase,
                player: &self.player,
                stats: &self.stats,
                progression: &self.progression,
                arsenal: &self.arsenal,
                waves: &self.waves,
                run_timer: &self.run_timer,
                tracked_enemies: self.culling.len(),
                pending_choices: &self.pending_choices,
            },
            requests,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn progression(&self) -> &ProgressionTable {
        &self.progression
    }

    pub fn arsenal(&self) -> &Arsenal {
        &self.arsenal
    }

    pub fn waves(&self) -> &WaveScheduler {
        &self.waves
    }

    pub fn run_timer(&self) -> &RunTimer {
        &self.run_timer
    }

    pub fn culling(&self) -> &EntityCullingSweep<Entity> {
        &self.culling
    }

    /// Choices on the open level-up panel.
    pub fn pending_choices(&self) -> &[WeaponId] {
        &self.pending_choices
    }

    pub fn despawn_distance(&self) -> f32 {
        self.despawn_distance
    }

    /// Spawn an enemy directly, bypassing the wave scheduler (for testing).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: &str, position: Vec2) -> EntityHandle {
        self.spawn_enemy(&EnemyKind::new(kind), position)
    }

    /// Grant experience as if an orb was collected (for testing).
    #[cfg(test)]
    pub fn grant_exp(&mut self, amount: u32) {
        self.gain_exp(amount);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(error) = self.handle_command(command) {
                warn!(%error, phase = ?self.phase, "command rejected");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), CommandError> {
        match command {
            PlayerCommand::StartRun => {
                self.require(&[
                    GamePhase::MainMenu,
                    GamePhase::GameOver,
                    GamePhase::LevelComplete,
                ])?;
                self.start_run();
            }
            PlayerCommand::Pause => {
                self.require(&[GamePhase::Active, GamePhase::LevelUpSelection])?;
                self.paused_from = self.phase;
                self.phase = GamePhase::Paused;
                self.requests
                    .push(PresentationRequest::FreezeSimulation { frozen: true });
            }
            PlayerCommand::Resume => {
                self.require(&[GamePhase::Paused])?;
                self.phase = self.paused_from;
                // The level-up panel keeps the simulation frozen.
                if self.phase == GamePhase::Active {
                    self.requests
                        .push(PresentationRequest::FreezeSimulation { frozen: false });
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = if scale.is_nan() {
                    0.0
                } else {
                    scale.clamp(0.0, MAX_TIME_SCALE)
                };
            }
            PlayerCommand::PlayerMoved { position } => {
                self.player.position = position;
            }
            PlayerCommand::PlayerDamaged { amount } => {
                self.require(&[GamePhase::Active])?;
                self.damage_player(amount);
            }
            PlayerCommand::EnemyHit {
                entity,
                damage,
                knockback,
            } => {
                self.require(&[GamePhase::Active])?;
                self.hit_enemy(entity, damage, knockback)?;
            }
            PlayerCommand::EnemyContact { entity } => {
                self.require(&[GamePhase::Active])?;
                self.enemy_contact(entity)?;
            }
            PlayerCommand::EnemyDefeated {
                entity,
                position,
                exp_value,
            } => {
                self.require(&[GamePhase::Active])?;
                // Already gone is fine; the orb still drops.
                if let Some(live) = entity.and_then(|h| self.live_entity(h)) {
                    if self.world.get::<&Enemy>(live).is_err() {
                        return Err(CommandError::UnknownEntity(handle_of(live)));
                    }
                    self.despawn(live);
                }
                self.drop_exp_orb(position, exp_value);
            }
            PlayerCommand::BossDefeated => {
                self.require(&[GamePhase::Active])?;
                if !self.run_timer.is_expired() {
                    return Err(CommandError::NoBossEncounter);
                }
                self.end_level(LevelOutcome::BossDefeated);
            }
            PlayerCommand::CurrencyEarned { amount } => {
                self.player.coins += i64::from(amount);
                self.requests.push(PresentationRequest::UpdateCoins {
                    balance: self.player.coins,
                });
            }
            PlayerCommand::PurchaseStat { stat } => {
                self.require(&[
                    GamePhase::Active,
                    GamePhase::LevelUpSelection,
                    GamePhase::Paused,
                ])?;
                self.purchase_stat(stat)?;
            }
            PlayerCommand::SelectUpgrade { weapon } => {
                self.require(&[GamePhase::LevelUpSelection])?;
                self.select_upgrade(weapon)?;
            }
            PlayerCommand::SkipUpgrade => {
                self.require(&[GamePhase::LevelUpSelection])?;
                self.close_level_up();
            }
        }
        Ok(())
    }

    fn require(&self, phases: &[GamePhase]) -> Result<(), CommandError> {
        if phases.contains(&self.phase) {
            Ok(())
        } else {
            Err(CommandError::WrongPhase { phase: self.phase })
        }
    }

    /// Reset all run state and begin the first wave.
    fn start_run(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.progression = ProgressionTable::new(self.curve.clone());
        self.queued_level_ups = 0;
        self.pending_choices.clear();

        self.stats.reset();
        self.player = PlayerState::from_stats(&self.stats);
        self.arsenal.reset();
        self.weapon_cooldowns.clear();
        let starting_weapon = self.arsenal.acquire_random(&mut self.rng);

        self.waves.reset();
        self.waves.recenter(self.player.position);
        self.waves.start();
        self.culling.clear();
        self.cull_schedule.reset();
        self.run_timer.reset();

        self.phase = GamePhase::Active;
        info!(seed_weapon = ?starting_weapon, "run started");

        self.push_hud();
        self.requests.push(PresentationRequest::UpdateCoins {
            balance: self.player.coins,
        });
        self.push_health();
        self.push_timer();
    }

    /// Run all systems in order. A system that freezes the game ends the
    /// tick early; later systems wait for the next Active tick.
    fn run_systems(&mut self, dt: f32) {
        // 1. Survival countdown
        if self.run_timer.tick(dt) {
            self.begin_boss_encounter();
            return;
        }
        if !self.run_timer.is_expired() {
            self.push_timer();
        }
        // 2. Wave spawning
        if let Some(request) = self
            .waves
            .tick(dt, self.player.position, &mut self.rng)
        {
            self.spawn_enemy(&request.enemy_kind, request.position);
        }
        // 3. Enemy AI
        systems::enemy_ai::run(
            &mut self.world,
            &self.config.enemies,
            self.player.position,
            self.player.is_alive(),
            dt,
        );
        // 4. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 5. Experience pickups
        let collected = systems::pickups::run(
            &mut self.world,
            &PickupContext {
                player_position: self.player.position,
                pickup_range: self.player.pickup_range,
                player_move_speed: self.player.move_speed,
                check_interval: self.config.pickups.check_interval_secs,
                collect_radius: self.config.pickups.collect_radius,
                dt,
            },
            &mut self.despawn_buffer,
            &mut self.requests,
        );
        for value in collected {
            self.gain_exp(value);
        }
        if self.phase.is_frozen() {
            return;
        }
        // 6. Weapon cooldowns
        systems::weapons::run(
            &mut self.arsenal,
            &mut self.weapon_cooldowns,
            dt,
            &mut self.requests,
        );
        // 7. Distance culling
        if self.cull_schedule.advance(dt) {
            systems::cleanup::run(
                &mut self.world,
                &mut self.culling,
                self.config.culling.batch_size,
                self.player.position,
                self.despawn_distance,
                &mut self.requests,
            );
        }
    }

    fn spawn_enemy(&mut self, kind: &EnemyKind, position: Vec2) -> EntityHandle {
        let profile = get_profile(&self.config.enemies, kind);
        let entity = world_setup::spawn_enemy(&mut self.world, kind, &profile, position);
        self.culling.register(entity);
        let handle = handle_of(entity);
        debug!(?handle, %kind, "enemy spawned");
        self.requests.push(PresentationRequest::SpawnEntity {
            handle,
            entity: SpawnedEntity::Enemy {
                enemy_kind: kind.clone(),
            },
            position,
            rotation: 0.0,
        });
        handle
    }

    fn drop_exp_orb(&mut self, position: Vec2, value: u32) {
        let entity = world_setup::spawn_exp_orb(
            &mut self.world,
            position,
            value,
            self.config.pickups.base_speed,
            self.config.pickups.check_interval_secs,
        );
        self.requests.push(PresentationRequest::SpawnEntity {
            handle: handle_of(entity),
            entity: SpawnedEntity::ExpOrb { value },
            position,
            rotation: 0.0,
        });
    }

    fn despawn(&mut self, entity: Entity) {
        if self.world.despawn(entity).is_ok() {
            self.requests.push(PresentationRequest::DespawnEntity {
                handle: handle_of(entity),
            });
        }
    }

    /// Resolve a handle to any entity still in the world.
    fn live_entity(&self, handle: EntityHandle) -> Option<Entity> {
        entity_of(handle).filter(|&e| self.world.contains(e))
    }

    /// Resolve a handle to a live enemy entity.
    fn live_enemy(&self, handle: EntityHandle) -> Result<Entity, CommandError> {
        entity_of(handle)
            .filter(|&e| self.world.get::<&Enemy>(e).is_ok())
            .ok_or(CommandError::UnknownEntity(handle))
    }

    fn hit_enemy(&mut self, handle: EntityHandle, damage: f32, knockback: bool) -> Result<(), CommandError> {
        let entity = self.live_enemy(handle)?;
        let (pos, enemy, health, brain) = self
            .world
            .query_one_mut::<(&Position, &Enemy, &mut Health, &mut EnemyBrain)>(entity)
            .map_err(|_| CommandError::UnknownEntity(handle))?;

        let profile = get_profile(&self.config.enemies, &enemy.kind);
        health.current -= damage;
        if knockback {
            let (phase, remaining) = begin_knockback(brain.phase, profile.knockback_time);
            brain.phase = phase;
            brain.knockback_remaining = remaining;
        }
        let killed = health.current <= 0.0;
        if killed {
            brain.phase = EnemyPhase::Dead;
        }
        let position = pos.0;

        self.requests.push(PresentationRequest::DamageNumber {
            position,
            amount: damage,
        });
        if killed {
            debug!(?handle, "enemy killed");
            self.despawn(entity);
            self.drop_exp_orb(position, profile.exp_to_give);
        }
        Ok(())
    }

    /// An enemy touching the player hurts it at most once per hit wait time.
    fn enemy_contact(&mut self, handle: EntityHandle) -> Result<(), CommandError> {
        let entity = self.live_enemy(handle)?;
        let (enemy, brain) = self
            .world
            .query_one_mut::<(&Enemy, &mut EnemyBrain)>(entity)
            .map_err(|_| CommandError::UnknownEntity(handle))?;
        if brain.hit_cooldown > 0.0 || brain.phase == EnemyPhase::Dead {
            return Ok(());
        }
        let profile = get_profile(&self.config.enemies, &enemy.kind);
        brain.hit_cooldown = profile.hit_wait_time;
        self.damage_player(profile.damage);
        Ok(())
    }

    fn damage_player(&mut self, amount: f32) {
        let died = self.player.take_damage(amount);
        self.push_health();
        if died {
            info!(elapsed = self.time.elapsed_secs, level = self.progression.current_level(), "player died");
            self.phase = GamePhase::GameOver;
            self.pending_choices.clear();
            self.queued_level_ups = 0;
            self.requests.push(PresentationRequest::PlayerDied);
            let outcome = if self.run_timer.is_expired() {
                LevelOutcome::SlainByBoss
            } else {
                LevelOutcome::Overwhelmed
            };
            self.requests.push(PresentationRequest::LevelEnded { outcome });
        }
    }

    /// The countdown ran out. Freeze for the boss intro; the presentation
    /// spawns the boss and resumes.
    fn begin_boss_encounter(&mut self) {
        info!(elapsed = self.time.elapsed_secs, "countdown finished, boss incoming");
        self.paused_from = GamePhase::Active;
        self.phase = GamePhase::Paused;
        self.push_timer();
        self.requests
            .push(PresentationRequest::FreezeSimulation { frozen: true });
        self.requests.push(PresentationRequest::BeginBossEncounter);
    }

    fn end_level(&mut self, outcome: LevelOutcome) {
        info!(?outcome, elapsed = self.time.elapsed_secs, level = self.progression.current_level(), "level ended");
        self.phase = GamePhase::LevelComplete;
        self.pending_choices.clear();
        self.queued_level_ups = 0;
        self.requests
            .push(PresentationRequest::FreezeSimulation { frozen: true });
        self.requests.push(PresentationRequest::LevelEnded { outcome });
    }

    fn gain_exp(&mut self, amount: u32) {
        if let Some(level_up) = self.progression.get_exp(amount) {
            info!(level = level_up.new_level, "player levelled up");
            self.requests.push(PresentationRequest::NotifyLevelUp {
                new_level: level_up.new_level,
            });
            self.queued_level_ups += 1;
            if self.phase == GamePhase::Active {
                self.open_next_level_up();
            }
        }
        self.push_hud();
    }

    /// Offer choices for the next queued level-up, freezing the simulation.
    /// Level-ups with nothing to offer are consumed without a panel.
    fn open_next_level_up(&mut self) {
        while self.queued_level_ups > 0 {
            self.queued_level_ups -= 1;
            let choices = self
                .arsenal
                .choose_upgrades(&mut self.rng, self.player.max_weapons as usize);
            if choices.is_empty() {
                debug!("nothing to offer for level-up");
                continue;
            }

            let views = choices
                .iter()
                .filter_map(|&id| self.arsenal.choice_view(id))
                .collect();
            self.pending_choices = choices;
            self.phase = GamePhase::LevelUpSelection;
            self.requests
                .push(PresentationRequest::FreezeSimulation { frozen: true });
            self.requests
                .push(PresentationRequest::ShowLevelUpChoices { choices: views });
            return;
        }
    }

    fn close_level_up(&mut self) {
        self.pending_choices.clear();
        self.phase = GamePhase::Active;
        self.requests
            .push(PresentationRequest::FreezeSimulation { frozen: false });
        self.open_next_level_up();
    }

    fn select_upgrade(&mut self, weapon: WeaponId) -> Result<(), CommandError> {
        if !self.pending_choices.contains(&weapon) {
            return Err(CommandError::ChoiceNotOffered(weapon));
        }
        match self.arsenal.status(weapon) {
            WeaponStatus::Inactive => {
                self.arsenal.acquire(weapon);
            }
            _ => {
                self.arsenal.level_up(weapon);
            }
        }
        self.close_level_up();
        Ok(())
    }

    /// Buy the next tier of a stat. Unlike the raw table purchase this
    /// refuses when the player cannot afford it. Buying from the level-up
    /// panel closes the panel.
    fn purchase_stat(&mut self, stat: StatKind) -> Result<(), CommandError> {
        let level = self.stats.track(stat).level;
        let cost = self
            .stats
            .next_cost(stat)
            .ok_or(MaxLevelError { level })?;
        if self.player.coins < i64::from(cost) {
            return Err(CommandError::InsufficientCoins {
                cost,
                balance: self.player.coins,
            });
        }

        let previous = self.stats.value(stat);
        let value = self.stats.purchase(stat, &mut self.player.coins)?;
        self.player.apply_stat(stat, previous, value);
        info!(stat = stat.as_str(), value, coins = self.player.coins, "stat purchased");

        self.requests.push(PresentationRequest::UpdateCoins {
            balance: self.player.coins,
        });
        if stat == StatKind::Health {
            self.push_health();
        }
        if self.phase == GamePhase::LevelUpSelection {
            self.close_level_up();
        }
        Ok(())
    }

    fn push_hud(&mut self) {
        self.requests.push(PresentationRequest::UpdateHud {
            current_exp: self.progression.current_experience(),
            required_exp: self.progression.required_for_next(),
            level: self.progression.current_level(),
        });
    }

    fn push_timer(&mut self) {
        self.requests.push(PresentationRequest::UpdateTimer {
            remaining_secs: self.run_timer.remaining(),
        });
    }

    fn push_health(&mut self) {
        self.requests.push(PresentationRequest::UpdatePlayerHealth {
            current: self.player.health,
            max: self.player.max_health,
        });
    }
}
