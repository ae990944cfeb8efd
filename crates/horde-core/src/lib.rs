//! Core types and definitions for the HORDE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, presentation requests, state snapshots, errors
//! and constants. It has no dependency on any engine or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
