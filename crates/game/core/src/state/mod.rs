//! Authoritative scenario state representation.
//!
//! This module owns the data structures that describe entities, traits and
//! abilities, turn bookkeeping, and the [`Scenario`] aggregate. Runtime layers
//! clone or query this state but mutate it exclusively through the engine.
pub mod error;
pub mod scenario;
pub mod types;

pub use error::{AbilityError, ScenarioError};
pub use scenario::{GameStatus, Scenario};
pub use types::{
    Ability, BASE_ABILITIES, EntityId, GameEntity, Trait, TurnState, derive_abilities,
};
