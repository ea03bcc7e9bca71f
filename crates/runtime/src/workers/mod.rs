//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the scenario and executes gameplay commands.

mod simulation;

pub use simulation::{Command, SimulationWorker};
