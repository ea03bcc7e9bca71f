//! State management errors.
//!
//! Errors related to roster construction, scenario lifecycle and ability derivation.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors raised while deriving abilities for a single entity.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityError {
    /// Abilities were already derived for this entity.
    #[error("abilities for entity {entity} have already been generated")]
    AlreadyGenerated { entity: EntityId },
}

impl GameError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            AbilityError::AlreadyGenerated { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AbilityError::AlreadyGenerated { .. } => "ABILITY_ALREADY_GENERATED",
        }
    }
}

/// Errors that occur while building or initializing a scenario.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScenarioError {
    /// Entity ids must be positive.
    #[error("entity '{name}' has no assigned id")]
    InvalidEntityId { name: String },

    /// The same id appears twice across player characters and monsters.
    #[error("entity id {entity} is used more than once")]
    DuplicateEntityId { entity: EntityId },

    /// `initialize` was already run on this scenario.
    #[error("scenario has already been initialized")]
    AlreadyInitialized,

    /// Ability derivation failed for one of the entities.
    #[error(transparent)]
    Ability(#[from] AbilityError),
}

impl GameError for ScenarioError {
    fn severity(&self) -> ErrorSeverity {
        use ScenarioError::*;
        match self {
            InvalidEntityId { .. } | DuplicateEntityId { .. } => ErrorSeverity::Validation,
            AlreadyInitialized => ErrorSeverity::Precondition,
            Ability(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ScenarioError::*;
        match self {
            InvalidEntityId { .. } => "SCENARIO_INVALID_ENTITY_ID",
            DuplicateEntityId { .. } => "SCENARIO_DUPLICATE_ENTITY_ID",
            AlreadyInitialized => "SCENARIO_ALREADY_INITIALIZED",
            Ability(inner) => inner.error_code(),
        }
    }
}
