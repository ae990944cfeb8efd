//! Game loop thread: runs the simulation engine at 30Hz and forwards its
//! presentation requests.
//!
//! Commands arrive via an `mpsc` channel. Each tick's requests are sent on
//! a second channel to whoever presents the game; the snapshot itself is
//! stored in shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use horde_core::constants::TICK_RATE;
use horde_core::events::PresentationRequest;
use horde_core::state::GameStateSnapshot;
use horde_sim::engine::SimulationEngine;

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Channels and thread handle of a running game loop.
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub requests: mpsc::Receiver<PresentationRequest>,
    pub thread: JoinHandle<()>,
}

/// Spawns the game loop for `engine` in a new thread.
pub fn spawn_game_loop(
    engine: SimulationEngine,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let (req_tx, req_rx) = mpsc::channel::<PresentationRequest>();

    let thread = std::thread::Builder::new()
        .name("horde-game-loop".into())
        .spawn(move || {
            run_game_loop(engine, cmd_rx, &req_tx, &latest_snapshot);
        })?;

    Ok(GameLoopHandle {
        commands: cmd_tx,
        requests: req_rx,
        thread,
    })
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    req_tx: &mpsc::Sender<PresentationRequest>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!("game loop started");
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            info!(tick = engine.time().tick, "game loop stopped");
            return;
        }

        // 2. Advance one tick (engine handles phase freezing internally)
        let mut snapshot = engine.tick();

        // 3. Forward side effects; a dropped receiver just means nobody is watching
        for request in std::mem::take(&mut snapshot.requests) {
            let _ = req_tx.send(request);
        }

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick. Wall-clock pacing stays at 30Hz; the time
        // scale acts on the simulated clock instead.
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Queue every pending command. Returns false when the loop should stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                debug!(?cmd, "command received");
                engine.queue_command(cmd);
            }
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}
