//! Simulation worker that owns the authoritative [`adventure_core::Scenario`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! actions via [`adventure_core::GameEngine`], and publishes events to the
//! [`EventBus`].

use adventure_core::{
    Action, ActionOutcome, EntityId, ExecuteError, GameConfig, GameEngine, GameError,
    GameStatus, RngOracle, Scenario,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::api::Result;
use crate::events::{Event, EventBus, GameStateEvent, TurnEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resolve one action against the scenario.
    ApplyAction {
        action: Action,
        reply: oneshot::Sender<std::result::Result<ActionOutcome, ExecuteError>>,
    },
    /// Advance the turn order and return the entity that acts next.
    NextTurn {
        reply: oneshot::Sender<Result<EntityId>>,
    },
    /// Query the current scenario (read-only snapshot).
    QueryScenario { reply: oneshot::Sender<Scenario> },
}

/// Background task that processes gameplay commands.
///
/// The worker is the only owner of the scenario and the roll source, so
/// actions are resolved strictly in the order their commands arrive.
pub struct SimulationWorker {
    scenario: Scenario,
    config: GameConfig,
    rng: Box<dyn RngOracle>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(
        scenario: Scenario,
        config: GameConfig,
        rng: Box<dyn RngOracle>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            player_characters = scenario.player_characters().len(),
            monsters = scenario.monsters().len(),
            "SimulationWorker initialized"
        );

        Self {
            scenario,
            config,
            rng,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Exits once every command sender is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "command channel closed, worker stopping");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::ApplyAction { action, reply } => {
                let result = self.apply_action(action);
                if reply.send(result).is_err() {
                    debug!("ApplyAction reply channel closed (caller dropped)");
                }
            }
            Command::NextTurn { reply } => {
                let result = self.next_turn();
                if reply.send(result).is_err() {
                    debug!("NextTurn reply channel closed (caller dropped)");
                }
            }
            Command::QueryScenario { reply } => {
                if reply.send(self.scenario.clone()).is_err() {
                    debug!("QueryScenario reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn apply_action(&mut self, action: Action) -> std::result::Result<ActionOutcome, ExecuteError> {
        let status_before = self.scenario.status();
        let mut engine = GameEngine::with_config(&mut self.scenario, self.config.clone());

        match engine.apply_action(&action, self.rng.as_mut()) {
            Ok(outcome) => {
                debug!(
                    target: "runtime::worker",
                    action = %outcome.action_type,
                    source = %outcome.source,
                    target_entity = %outcome.target,
                    roll = outcome.roll,
                    magnitude = outcome.magnitude,
                    "action resolved"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionResolved {
                        outcome: outcome.clone(),
                    }));

                let status = self.scenario.status();
                if status != GameStatus::Ongoing && status != status_before {
                    info!(target: "runtime::worker", %status, "game over");
                    self.event_bus
                        .publish(Event::GameState(GameStateEvent::GameOver { status }));
                }
                Ok(outcome)
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    source = %action.source_entity_id,
                    target_entity = %action.target_entity_id,
                    code = error.error_code(),
                    severity = error.severity().as_str(),
                    %error,
                    "action skipped"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionSkipped {
                        action,
                        error: error.clone(),
                    }));
                Err(error)
            }
        }
    }

    fn next_turn(&mut self) -> Result<EntityId> {
        let entity = GameEngine::with_config(&mut self.scenario, self.config.clone()).next_turn()?;
        let turn_index = self.scenario.current_turn();

        debug!(target: "runtime::worker", %entity, turn_index, "turn advanced");
        self.event_bus
            .publish(Event::Turn(TurnEvent { entity, turn_index }));
        Ok(entity)
    }
}
