//! Error types for the action resolution pipeline.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Which side of an action an entity id was supplied for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum EntityRole {
    Source,
    Target,
}

/// Errors surfaced while applying an action through the game engine.
///
/// Every variant is returned before any state is mutated: no health change,
/// no defensive bonus change, no history entry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("scenario must be initialized before actions are applied")]
    NotInitialized,

    #[error("no {role} entity found with id {entity}")]
    EntityNotFound { role: EntityRole, entity: EntityId },
}

impl ExecuteError {
    pub fn entity_not_found(role: EntityRole, entity: EntityId) -> Self {
        Self::EntityNotFound { role, entity }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ExecuteError::NotInitialized => ErrorSeverity::Precondition,
            ExecuteError::EntityNotFound { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::NotInitialized => "EXECUTE_NOT_INITIALIZED",
            ExecuteError::EntityNotFound {
                role: EntityRole::Source,
                ..
            } => "EXECUTE_SOURCE_NOT_FOUND",
            ExecuteError::EntityNotFound {
                role: EntityRole::Target,
                ..
            } => "EXECUTE_TARGET_NOT_FOUND",
        }
    }
}
