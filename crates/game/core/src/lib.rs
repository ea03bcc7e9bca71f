//! Deterministic scenario state and action resolution for a turn-based
//! text adventure.
//!
//! `adventure-core` defines the canonical rules (entities, actions, turn
//! order, scenario aggregate) and exposes pure APIs with no I/O. All state
//! mutation of an initialized [`Scenario`] flows through
//! [`engine::GameEngine`]; randomness is injected through [`env::RngOracle`].
//!
//! The language-generation service that produces scenarios and actions is an
//! external collaborator: this crate only defines the data it exchanges
//! ([`ProposedAction`], [`ActionPhase`], [`ScenarioDescription`]).
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{Action, ActionKind, ActionPhase, ActionType, ProposedAction, ScenarioDescription};
pub use combat::{ActionOutcome, attack_modifier, calculate_magnitude};
pub use config::GameConfig;
pub use engine::{EntityRole, ExecuteError, GameEngine, TurnError};
pub use env::{FixedRoll, PcgRng, RngOracle, ScriptedRolls};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Ability, AbilityError, EntityId, GameEntity, GameStatus, Scenario, ScenarioError, Trait,
    TurnState,
};
