//! Requests handed to a [`GenerationProvider`](crate::api::GenerationProvider).
//!
//! Each request carries a snapshot of the scenario plus whatever the
//! provider needs to phrase its prompt: who is acting, which entities are
//! foes or friends, and which abilities are available.

use adventure_core::{Ability, EntityId, GameEntity, ProposedAction, Scenario};

/// Ask the provider to turn an intent into concrete actions.
#[derive(Clone, Debug)]
pub struct ActionRequest {
    pub scenario: Scenario,
    pub proposed: ProposedAction,
}

impl ActionRequest {
    pub fn new(scenario: Scenario, proposed: ProposedAction) -> Self {
        Self { scenario, proposed }
    }

    pub fn source(&self) -> Option<&GameEntity> {
        self.scenario
            .find_entity_by_id(self.proposed.source_entity_id)
    }

    pub fn is_player_character(&self) -> bool {
        self.scenario
            .is_player_character(self.proposed.source_entity_id)
    }

    /// Entities the source may attack.
    pub fn possible_foes(&self) -> &[GameEntity] {
        self.scenario
            .possible_foes(self.proposed.source_entity_id)
            .unwrap_or_default()
    }

    /// Entities the source may heal, besides itself.
    pub fn possible_friendlies(&self) -> Vec<&GameEntity> {
        self.scenario
            .possible_friendlies(self.proposed.source_entity_id)
    }

    pub fn abilities(&self) -> &[Ability] {
        self.source().map(GameEntity::abilities).unwrap_or_default()
    }

    /// One-line summary of the intent, e.g. `Thorn (#1): I swing my axe`.
    pub fn summary(&self) -> String {
        let name = self.source().map(GameEntity::name).unwrap_or("unknown");
        format!(
            "{name} ({}): {}",
            self.proposed.source_entity_id, self.proposed.player_input
        )
    }
}

/// Ask the provider to narrate the scenario for one entity.
#[derive(Clone, Debug)]
pub struct NarrationRequest {
    pub scenario: Scenario,
    pub entity: EntityId,
}

impl NarrationRequest {
    pub fn new(scenario: Scenario, entity: EntityId) -> Self {
        Self { scenario, entity }
    }

    pub fn entity(&self) -> Option<&GameEntity> {
        self.scenario.find_entity_by_id(self.entity)
    }
}

/// Ask the provider to answer a free-form question about the scenario.
#[derive(Clone, Debug)]
pub struct QuestionRequest {
    pub scenario: Scenario,
    pub question: String,
}

impl QuestionRequest {
    pub fn new(scenario: Scenario, question: impl Into<String>) -> Self {
        Self {
            scenario,
            question: question.into(),
        }
    }
}

/// JSON rendering of a scenario, suitable for embedding in a prompt.
pub fn scenario_snapshot(scenario: &Scenario) -> serde_json::Result<String> {
    serde_json::to_string_pretty(scenario)
}
