//! Host command handlers.
//!
//! The presentation layer drives the simulation through these functions.
//! They bridge its requests to the game loop thread via channels.

use std::sync::mpsc;

use tracing::info;

use horde_core::commands::PlayerCommand;
use horde_core::events::PresentationRequest;
use horde_core::state::GameStateSnapshot;
use horde_sim::engine::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

/// Start the simulation. Spawns the game loop thread if not already running.
///
/// Returns the receiver the presentation reads its requests from.
pub fn start_simulation(state: &AppState, config: SimConfig) -> Result<mpsc::Receiver<PresentationRequest>, AppError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    if tx_lock.is_some() {
        return Err(AppError::AlreadyRunning);
    }

    let engine = SimulationEngine::new(config)?;
    let handle = game_loop::spawn_game_loop(engine, state.latest_snapshot.clone())?;

    *tx_lock = Some(handle.commands);
    *state.loop_handle.lock().map_err(|_| AppError::LockPoisoned)? = Some(handle.thread);
    Ok(handle.requests)
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::LockPoisoned)?;
    let tx = tx_lock.as_ref().ok_or(AppError::NotStarted)?;
    tx.send(GameLoopCommand::PlayerCommand(command))
        .map_err(|_| AppError::Disconnected)
}

/// Get the latest snapshot synchronously (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), AppError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| AppError::LockPoisoned)?
        .take()
        .ok_or(AppError::NotStarted)?;
    // A loop that already exited has nothing to stop.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let thread = state.loop_handle.lock().map_err(|_| AppError::LockPoisoned)?.take();
    if let Some(thread) = thread {
        thread.join().map_err(|_| AppError::Disconnected)?;
    }
    info!("simulation stopped");
    Ok(())
}
