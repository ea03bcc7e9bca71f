//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the generation provider, response validation, the
//! core engine and worker coordination so clients can bubble them up with
//! consistent context.
use adventure_core::{EntityId, ExecuteError, GameStatus, ScenarioError, TurnError};
use thiserror::Error;
use tokio::sync::oneshot;

use crate::contract::ValidationError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failure reported by a [`GenerationProvider`](super::GenerationProvider)
/// implementation (transport error, refusal, timeout...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("generation provider not set")]
    ProviderNotSet,

    #[error("{operation} request failed: {source}")]
    Provider {
        operation: GenerationOperation,
        #[source]
        source: ProviderError,
    },

    #[error("{operation} response rejected: {source}")]
    InvalidResponse {
        operation: GenerationOperation,
        #[source]
        source: ValidationError,
    },

    #[error("{operation} gave up after {attempts} attempts")]
    RetriesExhausted {
        operation: GenerationOperation,
        attempts: u32,
        #[source]
        last: Box<RuntimeError>,
    },

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("failed to set up scenario")]
    Scenario(#[from] ScenarioError),

    #[error("scenario has no entity to act (empty turn order)")]
    NoCurrentEntity,

    #[error("game is over ({status})")]
    GameOver { status: GameStatus },

    #[error("player character {entity} needs input to act")]
    MissingPlayerInput { entity: EntityId },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// True for failures worth retrying against the generation service.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RuntimeError::Provider { .. } | RuntimeError::InvalidResponse { .. }
        )
    }
}

/// The four request kinds sent to the generation service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum GenerationOperation {
    GenerateScenario,
    ResolveAction,
    DescribeScenario,
    AnswerQuestion,
}
