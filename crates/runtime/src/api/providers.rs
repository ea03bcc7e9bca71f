//! Asynchronous abstraction over the language-generation service.
//!
//! The runtime never talks to a model directly. Embedders plug in a
//! [`GenerationProvider`] (an HTTP client, a local model, a scripted
//! fixture) and the runtime validates whatever it returns.
use std::collections::VecDeque;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::errors::ProviderError;
use crate::contract::{ActionRequest, NarrationRequest, QuestionRequest};

/// Source of generated scenarios, action resolutions and narration.
///
/// Structured responses are returned as raw JSON and go through
/// [`contract`](crate::contract) validation before use.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Produce a fresh scenario: `location_and_story_description`,
    /// `player_characters` and `monsters`.
    async fn generate_scenario(&self) -> Result<Value, ProviderError>;

    /// Turn a proposed action into an action phase: `actions`,
    /// `is_question` and `question_for_ai`.
    async fn resolve_action(&self, request: &ActionRequest) -> Result<Value, ProviderError>;

    /// Narrate the scenario for one entity: `story` and `possible_actions`.
    async fn describe_scenario(&self, request: &NarrationRequest)
    -> Result<Value, ProviderError>;

    /// Answer a question about the scenario in plain text.
    async fn answer_question(&self, request: &QuestionRequest) -> Result<String, ProviderError>;
}

/// Provider that replays queued responses in order.
///
/// An exhausted queue is reported as a [`ProviderError`]. Useful for tests
/// and for replaying recorded sessions.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    scenarios: Mutex<VecDeque<Result<Value, ProviderError>>>,
    action_phases: Mutex<VecDeque<Result<Value, ProviderError>>>,
    descriptions: Mutex<VecDeque<Result<Value, ProviderError>>>,
    answers: Mutex<VecDeque<Result<String, ProviderError>>>,
    intents: Mutex<Vec<ActionRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_scenario(&self, response: Result<Value, ProviderError>) {
        self.scenarios.lock().await.push_back(response);
    }

    pub async fn push_action_phase(&self, response: Result<Value, ProviderError>) {
        self.action_phases.lock().await.push_back(response);
    }

    pub async fn push_description(&self, response: Result<Value, ProviderError>) {
        self.descriptions.lock().await.push_back(response);
    }

    pub async fn push_answer(&self, response: Result<String, ProviderError>) {
        self.answers.lock().await.push_back(response);
    }

    /// Every action request received so far, oldest first.
    pub async fn received_intents(&self) -> Vec<ActionRequest> {
        self.intents.lock().await.clone()
    }
}

async fn next<T>(
    queue: &Mutex<VecDeque<Result<T, ProviderError>>>,
    what: &str,
) -> Result<T, ProviderError> {
    queue
        .lock()
        .await
        .pop_front()
        .unwrap_or_else(|| Err(ProviderError::new(format!("no scripted {what} left"))))
}

#[async_trait]
impl GenerationProvider for ScriptedProvider {
    async fn generate_scenario(&self) -> Result<Value, ProviderError> {
        next(&self.scenarios, "scenario").await
    }

    async fn resolve_action(&self, request: &ActionRequest) -> Result<Value, ProviderError> {
        self.intents.lock().await.push(request.clone());
        next(&self.action_phases, "action phase").await
    }

    async fn describe_scenario(
        &self,
        _request: &NarrationRequest,
    ) -> Result<Value, ProviderError> {
        next(&self.descriptions, "description").await
    }

    async fn answer_question(&self, _request: &QuestionRequest) -> Result<String, ProviderError> {
        next(&self.answers, "answer").await
    }
}
