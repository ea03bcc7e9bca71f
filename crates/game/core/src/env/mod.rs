//! Capabilities the engine borrows from its environment.
//!
//! The only one today is randomness: the d20 roll behind every action.
mod rng;

pub use rng::{FixedRoll, PcgRng, RngOracle, ScriptedRolls};
