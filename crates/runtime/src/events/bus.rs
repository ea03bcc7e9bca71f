//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;

use super::types::{GameStateEvent, NarrativeEvent, TurnEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Resolved and skipped actions, game over
    GameState,
    /// Turn advancement
    Turn,
    /// Generated prose (narration, answers)
    Narrative,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize)]
pub enum Event {
    GameState(GameStateEvent),
    Turn(TurnEvent),
    Narrative(NarrativeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Turn(_) => Topic::Turn,
            Event::Narrative(_) => Topic::Narrative,
        }
    }
}

/// Topic-based event bus
///
/// Each topic owns a broadcast channel created up front, so publishing and
/// subscribing never need a lock. Cloning shares the same channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

struct Channels {
    game_state: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
    narrative: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Turn => &self.turn,
            Topic::Narrative => &self.narrative,
        }
    }
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                game_state: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                narrative: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Events are best-effort: with no subscribers they are dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            tracing::trace!(%topic, "no subscribers for topic");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
