//! Enemy AI for HORDE.
//!
//! Implements the enemy behaviour state machine and the per-kind
//! profiles that parameterize it.

pub mod fsm;
pub mod profiles;

pub use horde_core as core;
