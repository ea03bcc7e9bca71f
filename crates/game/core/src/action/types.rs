//! Resolved actions and raw intents.

use crate::state::{Ability, EntityId};

/// Effect applied when an action resolves.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ActionType {
    /// Lowers the target's health.
    Attack,
    /// Raises the target's health.
    Heal,
    /// Raises the source's defensive bonus.
    Defend,
    /// Reserved for positional effects; resolves to a history entry only.
    Move,
}

/// Attribute of the source entity that scales the action's magnitude.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ActionKind {
    #[default]
    Strength,
    Dexterity,
    Intelligence,
}

/// A single effect, consumed exactly once by the engine.
///
/// `ability` is expected to be one of the source's abilities; the engine
/// does not enforce this.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub action_type: ActionType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ability: Option<Ability>,
    pub source_entity_id: EntityId,
    pub target_entity_id: EntityId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_kind: ActionKind,
    /// Past-tense narrative of what happened, copied into the history entry.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Action {
    /// Creates a strength-driven action with no ability and no description.
    pub fn new(
        action_type: ActionType,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
    ) -> Self {
        Self {
            action_type,
            ability: None,
            source_entity_id: source.into(),
            target_entity_id: target.into(),
            action_kind: ActionKind::default(),
            description: String::new(),
        }
    }

    pub fn attack(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(ActionType::Attack, source, target)
    }

    pub fn heal(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(ActionType::Heal, source, target)
    }

    pub fn defend(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(ActionType::Defend, source, target)
    }

    pub fn movement(source: impl Into<EntityId>, target: impl Into<EntityId>) -> Self {
        Self::new(ActionType::Move, source, target)
    }

    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    pub fn with_kind(mut self, kind: ActionKind) -> Self {
        self.action_kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Raw intent of a player or monster, before the generation service turns
/// it into concrete [`Action`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposedAction {
    pub player_input: String,
    pub source_entity_id: EntityId,
}

impl ProposedAction {
    pub fn new(player_input: impl Into<String>, source: impl Into<EntityId>) -> Self {
        Self {
            player_input: player_input.into(),
            source_entity_id: source.into(),
        }
    }
}
