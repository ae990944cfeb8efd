//! HORDE host application.
//!
//! Runs the simulation on its own thread at the fixed tick rate and exposes
//! it to a presentation layer through a command channel, a request channel
//! and a shared latest snapshot.

pub mod error;
pub mod game_loop;
pub mod ipc;
pub mod state;

pub use horde_core as core;
