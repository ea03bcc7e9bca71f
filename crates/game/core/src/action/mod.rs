//! Action domain: resolved effects, raw intents and collaborator results.
//!
//! - `types`: [`Action`], its [`ActionType`] and [`ActionKind`], and [`ProposedAction`]
//! - `phase`: [`ActionPhase`] and [`ScenarioDescription`] as returned by the
//!   language-generation service

pub mod phase;
pub mod types;

pub use phase::{ActionPhase, ScenarioDescription};
pub use types::{Action, ActionKind, ActionType, ProposedAction};
