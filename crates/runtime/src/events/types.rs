//! Event types for different topics.

use adventure_core::{Action, ActionOutcome, EntityId, ExecuteError, GameStatus};
use serde::Serialize;

/// Events related to game state changes.
#[derive(Debug, Clone, Serialize)]
pub enum GameStateEvent {
    /// An action resolved and was appended to the history.
    ActionResolved { outcome: ActionOutcome },

    /// An action referenced an unknown entity and was dropped unapplied.
    ActionSkipped { action: Action, error: ExecuteError },

    /// Every monster or every player character has fallen.
    GameOver { status: GameStatus },
}

/// The turn passed to another entity.
#[derive(Debug, Clone, Serialize)]
pub struct TurnEvent {
    /// Entity that acts next
    pub entity: EntityId,
    /// Index into the turn order
    pub turn_index: usize,
}

/// Prose produced by the generation service.
#[derive(Debug, Clone, Serialize)]
pub enum NarrativeEvent {
    ScenarioDescribed {
        entity: EntityId,
        story: String,
        possible_actions: Vec<String>,
    },
    QuestionAnswered { question: String, answer: String },
}
