//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and drives the game session: it asks the generation provider to turn
//! intents into actions, feeds them through the worker, and decides when the
//! turn advances.

use std::sync::Arc;

use adventure_core::{
    Action, ActionOutcome, ActionPhase, EntityId, ExecuteError, GameStatus, PcgRng,
    ProposedAction, RngOracle, Scenario, ScenarioDescription,
};
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{
    GenerationOperation, GenerationProvider, ProviderError, Result, RuntimeError, RuntimeHandle,
};
use crate::config::RuntimeConfig;
use crate::contract::{self, ActionRequest, NarrationRequest, QuestionRequest, ValidationError};
use crate::events::{Event, EventBus, NarrativeEvent, Topic};
use crate::retry::with_retries;
use crate::workers::{Command, SimulationWorker};

/// Intent submitted on behalf of a monster.
pub const MONSTER_INTENT: &str = "Attack";

/// Player input that ends the session.
pub const QUIT_COMMAND: &str = "quit";

/// What a single call to [`Runtime::play_turn`] did.
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// The player asked to leave. Nothing was sent to the provider.
    Quit,
    /// The input was a question; it was answered and the turn did not advance.
    Answered { question: String, answer: String },
    /// The intent was resolved into actions and applied.
    Resolved {
        entity: EntityId,
        reports: Vec<ActionReport>,
        status: GameStatus,
        /// Entity acting next, or `None` once the game is over.
        next_entity: Option<EntityId>,
    },
}

/// Result of one action inside a resolved turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReport {
    Applied(ActionOutcome),
    /// The action named an unknown entity and was dropped.
    Skipped { action: Action, error: ExecuteError },
}

impl ActionReport {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionReport::Applied(_))
    }
}

/// Main runtime that orchestrates a game session
///
/// Runtime owns the worker and the provider; [`RuntimeHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    provider: Arc<dyn GenerationProvider>,
    config: RuntimeConfig,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Snapshot of the authoritative scenario.
    pub async fn scenario(&self) -> Result<Scenario> {
        self.handle.query_scenario().await
    }

    /// Narrates the scenario for the entity whose turn it is.
    pub async fn describe_current(&self) -> Result<ScenarioDescription> {
        let scenario = self.handle.query_scenario().await?;
        let entity = current_entity_id(&scenario)?;
        let request = NarrationRequest::new(scenario, entity);

        let operation = GenerationOperation::DescribeScenario;
        let description = self
            .generate(operation, || async {
                let value = self.provider.describe_scenario(&request).await;
                validated(operation, value, contract::parse_description)
            })
            .await?;

        self.handle
            .event_bus()
            .publish(Event::Narrative(NarrativeEvent::ScenarioDescribed {
                entity,
                story: description.story.clone(),
                possible_actions: description.possible_actions.clone(),
            }));
        Ok(description)
    }

    /// Answers a free-text question about the scenario.
    pub async fn ask(&self, question: &str) -> Result<String> {
        let scenario = self.handle.query_scenario().await?;
        let request = QuestionRequest::new(scenario, question);

        let operation = GenerationOperation::AnswerQuestion;
        let answer = self
            .generate(operation, || async {
                self.provider
                    .answer_question(&request)
                    .await
                    .map_err(|source| RuntimeError::Provider { operation, source })
            })
            .await?;

        self.handle
            .event_bus()
            .publish(Event::Narrative(NarrativeEvent::QuestionAnswered {
                question: question.to_owned(),
                answer: answer.clone(),
            }));
        Ok(answer)
    }

    /// Asks the provider to turn an intent into an action phase.
    pub async fn resolve_intent(&self, proposed: ProposedAction) -> Result<ActionPhase> {
        let scenario = self.handle.query_scenario().await?;
        let request = ActionRequest::new(scenario, proposed);
        debug!(target: "runtime", intent = %request.summary(), "resolving intent");

        let operation = GenerationOperation::ResolveAction;
        self.generate(operation, || async {
            let value = self.provider.resolve_action(&request).await;
            validated(operation, value, contract::parse_action_phase)
        })
        .await
    }

    /// Plays the current entity's turn.
    ///
    /// Player characters act on `input`; monsters always act on
    /// [`MONSTER_INTENT`] and ignore it. A pure question is answered without
    /// advancing the turn. Otherwise every returned action is applied in
    /// order and, while the game is still ongoing, the turn advances.
    ///
    /// Once the game has ended every call fails with
    /// [`RuntimeError::GameOver`] and leaves the scenario untouched.
    pub async fn play_turn(&self, input: Option<&str>) -> Result<TurnOutcome> {
        let scenario = self.handle.query_scenario().await?;
        let status = scenario.status();
        if status != GameStatus::Ongoing {
            warn!(target: "runtime", %status, "turn requested after game over");
            return Err(RuntimeError::GameOver { status });
        }
        let entity = current_entity_id(&scenario)?;

        let intent = if scenario.is_player_character(entity) {
            let input = input.ok_or(RuntimeError::MissingPlayerInput { entity })?;
            if input.trim().eq_ignore_ascii_case(QUIT_COMMAND) {
                info!(target: "runtime", %entity, "player quit");
                return Ok(TurnOutcome::Quit);
            }
            input.to_owned()
        } else {
            MONSTER_INTENT.to_owned()
        };

        let phase = self
            .resolve_intent(ProposedAction::new(intent.clone(), entity))
            .await?;

        if phase.is_pure_question() {
            let question = phase.question_for_ai.unwrap_or(intent);
            let answer = self.ask(&question).await?;
            return Ok(TurnOutcome::Answered { question, answer });
        }

        let mut reports = Vec::with_capacity(phase.actions.len());
        for action in phase.actions {
            let report = match self.handle.apply_action(action.clone()).await? {
                Ok(outcome) => ActionReport::Applied(outcome),
                Err(error) => ActionReport::Skipped { action, error },
            };
            reports.push(report);
        }

        let status = self.handle.query_scenario().await?.status();
        let next_entity = match status {
            GameStatus::Ongoing => Some(self.handle.next_turn().await?),
            GameStatus::Victory | GameStatus::Defeat => None,
        };

        info!(
            target: "runtime",
            %entity,
            applied = reports.iter().filter(|r| r.is_applied()).count(),
            skipped = reports.iter().filter(|r| !r.is_applied()).count(),
            %status,
            "turn resolved"
        );

        Ok(TurnOutcome::Resolved {
            entity,
            reports,
            status,
            next_entity,
        })
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain. Clones of the handle held elsewhere
    /// keep the worker alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }

    async fn generate<T, F, Fut>(&self, operation: GenerationOperation, attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        with_retries(
            operation,
            self.config.max_generation_attempts,
            self.config.retry_backoff,
            attempt,
        )
        .await
    }
}

fn current_entity_id(scenario: &Scenario) -> Result<EntityId> {
    scenario
        .turn()
        .current_entity()
        .ok_or(RuntimeError::NoCurrentEntity)
}

fn validated<T>(
    operation: GenerationOperation,
    response: std::result::Result<Value, ProviderError>,
    parse: impl FnOnce(Value) -> std::result::Result<T, ValidationError>,
) -> Result<T> {
    let value = response.map_err(|source| RuntimeError::Provider { operation, source })?;
    parse(value).map_err(|source| {
        warn!(target: "runtime", %operation, error = %source, "response rejected");
        RuntimeError::InvalidResponse { operation, source }
    })
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    scenario: Option<Scenario>,
    provider: Option<Arc<dyn GenerationProvider>>,
    rng: Option<Box<dyn RngOracle>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            scenario: None,
            provider: None,
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Play a prepared scenario instead of requesting one from the provider.
    ///
    /// The scenario may or may not be initialized yet.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Set the generation provider (required)
    pub fn provider(self, provider: impl GenerationProvider + 'static) -> Self {
        self.shared_provider(Arc::new(provider))
    }

    /// Set a provider the caller keeps a handle to
    pub fn shared_provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Override the roll source. Defaults to a [`PcgRng`] seeded from
    /// `config.rng_seed` or from entropy.
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let provider = self.provider.ok_or(RuntimeError::ProviderNotSet)?;
        let config = self.config;

        let mut scenario = match self.scenario {
            Some(scenario) => scenario,
            None => {
                let operation = GenerationOperation::GenerateScenario;
                with_retries(
                    operation,
                    config.max_generation_attempts,
                    config.retry_backoff,
                    || async {
                        let value = provider.generate_scenario().await;
                        validated(operation, value, contract::parse_scenario)
                    },
                )
                .await?
            }
        };
        if !scenario.is_initialized() {
            scenario.initialize()?;
        }

        let rng = match self.rng {
            Some(rng) => rng,
            None => {
                let seed = config.rng_seed.unwrap_or_else(rand::random);
                debug!(target: "runtime", seed, "seeding roll source");
                Box::new(PcgRng::new(seed)) as Box<dyn RngOracle>
            }
        };

        info!(
            target: "runtime",
            entities = scenario.turn_order().len(),
            "starting session: {}",
            scenario.location_and_story_description()
        );

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            scenario,
            config.game_config.clone(),
            rng,
            command_rx,
            event_bus,
        );
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            provider,
            config,
            sim_worker_handle,
        })
    }
}
