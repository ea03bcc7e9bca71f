use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

use super::GameEngine;

/// Errors that can occur during turn operations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("turn order is empty; initialize the scenario with at least one entity")]
    EmptyTurnOrder,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Precondition
    }

    fn error_code(&self) -> &'static str {
        match self {
            TurnError::EmptyTurnOrder => "TURN_EMPTY_ORDER",
        }
    }
}

/// Turn order methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Rebuilds the turn order from the roster: player characters, then
    /// monsters, each in list order. Resets the current turn to the first entry.
    pub fn set_turn_order(&mut self) {
        self.scenario.set_turn_order();
    }

    /// Advances the current turn by one, wrapping to the start of the order.
    ///
    /// Returns the entity whose turn it now is.
    pub fn next_turn(&mut self) -> Result<EntityId, TurnError> {
        let turn = &mut self.scenario.turn;
        let len = turn.turn_order.len();
        if len == 0 {
            return Err(TurnError::EmptyTurnOrder);
        }
        turn.current_turn = (turn.current_turn + 1) % len;
        Ok(turn.turn_order[turn.current_turn])
    }

    /// Returns the entity taking its turn, if a turn order exists.
    pub fn current_entity(&self) -> Option<EntityId> {
        self.scenario.turn.current_entity()
    }
}
