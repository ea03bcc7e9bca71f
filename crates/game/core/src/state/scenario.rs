use std::collections::HashSet;

use super::{EntityId, GameEntity, ScenarioError, TurnState};
use crate::action::Action;
use crate::combat::ActionOutcome;
use crate::engine::{ExecuteError, GameEngine, TurnError};
use crate::env::RngOracle;

/// Overall standing of a scenario, derived from roster health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    /// Every monster is at or below zero health.
    Victory,
    /// Every player character is at or below zero health.
    Defeat,
}

/// Aggregate root: narrative seed, both rosters, turn bookkeeping and history.
///
/// A scenario is built from a roster, then [`initialize`](Self::initialize)d
/// exactly once. After that the only mutation paths are
/// [`apply_action`](Self::apply_action) and [`next_turn`](Self::next_turn).
///
/// # Invariants
///
/// - entity ids are positive and unique across both rosters
/// - `action_history` only grows, one entry per resolved action
///
/// Scenarios serialize for snapshots but never deserialize: every scenario
/// goes through [`new`](Self::new), so decoding untrusted input is left to a
/// validating layer that calls it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    location_and_story_description: String,
    player_characters: Vec<GameEntity>,
    monsters: Vec<GameEntity>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub(crate) turn: TurnState,
    action_history: Vec<String>,
    pub(crate) initialized: bool,
}

impl Scenario {
    /// Builds an uninitialized scenario from its narrative seed and rosters.
    pub fn new(
        location_and_story_description: impl Into<String>,
        player_characters: Vec<GameEntity>,
        monsters: Vec<GameEntity>,
    ) -> Result<Self, ScenarioError> {
        let mut seen = HashSet::new();
        for entity in player_characters.iter().chain(monsters.iter()) {
            if !entity.entity_id().is_assigned() {
                return Err(ScenarioError::InvalidEntityId {
                    name: entity.name().to_owned(),
                });
            }
            if !seen.insert(entity.entity_id()) {
                return Err(ScenarioError::DuplicateEntityId {
                    entity: entity.entity_id(),
                });
            }
        }

        Ok(Self {
            location_and_story_description: location_and_story_description.into(),
            player_characters,
            monsters,
            turn: TurnState::new(),
            action_history: Vec::new(),
            initialized: false,
        })
    }

    /// One-time setup: turn order, abilities, empty history.
    pub fn initialize(&mut self) -> Result<(), ScenarioError> {
        GameEngine::new(self).initialize()
    }

    /// Resolves one action with the default [`GameConfig`](crate::GameConfig).
    ///
    /// See [`GameEngine::apply_action`] for the resolution rules.
    pub fn apply_action(
        &mut self,
        action: &Action,
        rng: &mut (impl RngOracle + ?Sized),
    ) -> Result<ActionOutcome, ExecuteError> {
        GameEngine::new(self).apply_action(action, rng)
    }

    /// Advances to the next entity in turn order, wrapping at the end.
    pub fn next_turn(&mut self) -> Result<EntityId, TurnError> {
        GameEngine::new(self).next_turn()
    }

    pub fn location_and_story_description(&self) -> &str {
        &self.location_and_story_description
    }

    pub fn player_characters(&self) -> &[GameEntity] {
        &self.player_characters
    }

    pub fn monsters(&self) -> &[GameEntity] {
        &self.monsters
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn turn_order(&self) -> &[EntityId] {
        self.turn.turn_order()
    }

    pub fn current_turn(&self) -> usize {
        self.turn.current_turn()
    }

    pub fn action_history(&self) -> &[String] {
        &self.action_history
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// All entities, player characters first, then monsters.
    pub fn entities(&self) -> impl Iterator<Item = &GameEntity> {
        self.player_characters.iter().chain(self.monsters.iter())
    }

    pub(crate) fn entities_mut(&mut self) -> impl Iterator<Item = &mut GameEntity> {
        self.player_characters
            .iter_mut()
            .chain(self.monsters.iter_mut())
    }

    /// Looks an entity up by id across both rosters.
    pub fn find_entity_by_id(&self, id: EntityId) -> Option<&GameEntity> {
        self.entities().find(|entity| entity.entity_id() == id)
    }

    pub(crate) fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut GameEntity> {
        self.entities_mut().find(|entity| entity.entity_id() == id)
    }

    /// The entity whose turn it currently is.
    pub fn current_entity(&self) -> Option<&GameEntity> {
        self.turn
            .current_entity()
            .and_then(|id| self.find_entity_by_id(id))
    }

    pub fn is_player_character(&self, id: EntityId) -> bool {
        self.player_characters
            .iter()
            .any(|entity| entity.entity_id() == id)
    }

    pub fn is_monster(&self, id: EntityId) -> bool {
        self.monsters.iter().any(|entity| entity.entity_id() == id)
    }

    /// The opposing roster of `id`, or `None` if the id is unknown.
    pub fn possible_foes(&self, id: EntityId) -> Option<&[GameEntity]> {
        if self.is_player_character(id) {
            Some(&self.monsters)
        } else if self.is_monster(id) {
            Some(&self.player_characters)
        } else {
            None
        }
    }

    /// Members of `id`'s own roster other than itself.
    pub fn possible_friendlies(&self, id: EntityId) -> Vec<&GameEntity> {
        let roster = if self.is_player_character(id) {
            &self.player_characters
        } else if self.is_monster(id) {
            &self.monsters
        } else {
            return Vec::new();
        };
        roster
            .iter()
            .filter(|entity| entity.entity_id() != id)
            .collect()
    }

    /// Victory is checked before defeat.
    pub fn status(&self) -> GameStatus {
        if self.monsters.iter().all(|m| !m.is_alive()) {
            GameStatus::Victory
        } else if self.player_characters.iter().all(|pc| !pc.is_alive()) {
            GameStatus::Defeat
        } else {
            GameStatus::Ongoing
        }
    }

    pub(crate) fn set_turn_order(&mut self) {
        self.turn.turn_order = self.entities().map(GameEntity::entity_id).collect();
        self.turn.current_turn = 0;
    }

    pub(crate) fn clear_history(&mut self) {
        self.action_history.clear();
    }

    pub(crate) fn record(&mut self, message: String) {
        self.action_history.push(message);
    }
}
