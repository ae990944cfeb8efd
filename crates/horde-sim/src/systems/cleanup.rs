//! Cleanup system: culls enemies that have fallen too far behind the player.
//!
//! Every spawned enemy is registered with an [`EntityCullingSweep`]. On a
//! fixed schedule the sweep checks a batch of registered handles against the
//! player's position, resuming where the last batch stopped, so the cost per
//! check is bounded no matter how many enemies are alive.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::{debug, trace};

use horde_core::components::Position;
use horde_core::events::PresentationRequest;

use crate::world_setup::handle_of;

/// Resolves a registered handle to a position. `None` means the handle no
/// longer refers to a live entity.
pub trait EntityLocator {
    type Handle: Copy;

    fn locate(&self, handle: Self::Handle) -> Option<Vec2>;
}

impl EntityLocator for World {
    type Handle = Entity;

    fn locate(&self, handle: Entity) -> Option<Vec2> {
        self.get::<&Position>(handle).ok().map(|p| p.0)
    }
}

/// Result of one batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport<H> {
    /// Handles checked this batch.
    pub visited: usize,
    /// Live entities that were too far away; the caller despawns them.
    pub culled: Vec<H>,
    /// Handles dropped because they no longer resolved.
    pub stale: usize,
}

/// Round-robin registry of handles to check for distance culling.
#[derive(Debug, Clone)]
pub struct EntityCullingSweep<H> {
    registry: Vec<H>,
    next_check_index: usize,
    marked: Vec<usize>,
}

impl<H> Default for EntityCullingSweep<H> {
    fn default() -> Self {
        Self {
            registry: Vec::new(),
            next_check_index: 0,
            marked: Vec::new(),
        }
    }
}

impl<H: Copy> EntityCullingSweep<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: H) {
        self.registry.push(handle);
    }

    /// Check up to `batch_size` handles starting at the cursor.
    ///
    /// Handles farther than `max_distance` from `origin` are reported as
    /// culled; handles that no longer resolve are dropped silently. Both are
    /// removed from the registry after the whole batch has been visited.
    pub fn sweep_batch<L>(&mut self, locator: &L, batch_size: usize, origin: Vec2, max_distance: f32) -> SweepReport<H>
    where
        L: EntityLocator<Handle = H> + ?Sized,
    {
        let mut report = SweepReport {
            visited: 0,
            culled: Vec::new(),
            stale: 0,
        };
        if self.registry.is_empty() {
            self.next_check_index = 0;
            return report;
        }

        self.marked.clear();
        let to_check = batch_size.min(self.registry.len());
        for _ in 0..to_check {
            let index = self.next_check_index % self.registry.len();
            let handle = self.registry[index];
            match locator.locate(handle) {
                None => {
                    report.stale += 1;
                    self.marked.push(index);
                }
                Some(position) if position.distance(origin) > max_distance => {
                    report.culled.push(handle);
                    self.marked.push(index);
                }
                Some(_) => {}
            }
            self.next_check_index += 1;
            report.visited += 1;
        }

        // Highest index first so swap_remove never moves an unprocessed mark.
        self.marked.sort_unstable_by(|a, b| b.cmp(a));
        for &index in &self.marked {
            self.registry.swap_remove(index);
        }

        self.next_check_index = if self.registry.is_empty() {
            0
        } else {
            self.next_check_index % self.registry.len()
        };
        report
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn next_check_index(&self) -> usize {
        self.next_check_index
    }

    pub fn handles(&self) -> &[H] {
        &self.registry
    }

    pub fn clear(&mut self) {
        self.registry.clear();
        self.next_check_index = 0;
    }
}

/// Fires once per interval of scaled time.
#[derive(Debug, Clone, Copy)]
pub struct CullSchedule {
    interval: f32,
    remaining: f32,
}

impl CullSchedule {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    /// Advance by `dt`; true when a sweep is due.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = self.interval;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.interval;
    }
}

/// Run one batch against the world and despawn what it culls.
pub fn run(
    world: &mut World,
    sweep: &mut EntityCullingSweep<Entity>,
    batch_size: usize,
    origin: Vec2,
    max_distance: f32,
    requests: &mut Vec<PresentationRequest>,
) -> SweepReport<Entity> {
    let report = sweep.sweep_batch(&*world, batch_size, origin, max_distance);
    for &entity in &report.culled {
        if world.despawn(entity).is_ok() {
            requests.push(PresentationRequest::DespawnEntity {
                handle: handle_of(entity),
            });
        }
    }
    if report.stale > 0 {
        trace!(stale = report.stale, "dropped stale handles");
    }
    if !report.culled.is_empty() {
        debug!(culled = report.culled.len(), tracked = sweep.len(), "culled distant enemies");
    }
    report
}
