//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! resolving actions, advancing turns, or streaming events from specific
//! topics.
use adventure_core::{Action, ActionOutcome, EntityId, ExecuteError, Scenario};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the simulation worker
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Resolve one action against the authoritative scenario.
    ///
    /// The outer result reports worker failures; the inner one reports an
    /// action that was skipped because it named an unknown entity.
    pub async fn apply_action(
        &self,
        action: Action,
    ) -> Result<std::result::Result<ActionOutcome, ExecuteError>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ApplyAction {
                action,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance to the next entity in turn order.
    pub async fn next_turn(&self) -> Result<EntityId> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::NextTurn { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current scenario (read-only snapshot)
    pub async fn query_scenario(&self) -> Result<Scenario> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryScenario { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Resolved and skipped actions, game over
    /// - `Topic::Turn` - Turn advancement
    /// - `Topic::Narrative` - Scenario narration and answered questions
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use adventure_runtime::Topic;
    ///
    /// let mut game_rx = handle.subscribe(Topic::GameState);
    /// while let Ok(event) = game_rx.recv().await {
    ///     // Handle game state events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
