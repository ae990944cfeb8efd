//! Application state shared between the host API and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use horde_core::commands::PlayerCommand;
use horde_core::state::GameStateSnapshot;

/// Commands sent from the host API to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// Everything is behind a `Mutex` so the state can be shared across
/// threads:
/// - `mpsc::Sender` is Send but not Sync
/// - `Option` fields are empty until `start_simulation`
/// - the latest snapshot is an `Arc` shared with the game loop thread
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous `get_snapshot` queries, with its
    /// requests already forwarded.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.command_tx.lock().map(|tx| tx.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(state.loop_handle.lock().unwrap().is_none());
        assert!(!state.is_running());
    }
}
