//! Schema validation for structured responses from the generation service.
//!
//! Responses arrive as loosely typed JSON. Nothing reaches the core engine
//! until it has been checked here: required fields must be present and well
//! typed, enum values must name a known variant, and entity ids must be
//! positive. Out-of-range attributes are clamped the same way entity
//! creation clamps them.

use std::str::FromStr;

use adventure_core::{
    Ability, Action, ActionKind, ActionPhase, ActionType, EntityId, GameEntity, Scenario,
    ScenarioDescription, ScenarioError, Trait,
};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A response that cannot be turned into core data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed {context}: {message}")]
    Malformed {
        context: &'static str,
        message: String,
    },

    #[error("unknown {field} '{value}'")]
    UnknownValue { field: &'static str, value: String },

    #[error("{field} must be a positive entity id (got {value})")]
    InvalidEntityId { field: &'static str, value: i64 },

    #[error("{roster} roster must contain at least one entity")]
    EmptyRoster { roster: &'static str },

    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

#[derive(Deserialize)]
struct RawScenario {
    location_and_story_description: String,
    player_characters: Vec<RawEntity>,
    monsters: Vec<RawEntity>,
}

#[derive(Deserialize)]
struct RawEntity {
    entity_id: i64,
    name: String,
    health: Option<i64>,
    strength: Option<i64>,
    dexterity: Option<i64>,
    intelligence: Option<i64>,
    defensive_bonus: Option<i64>,
    #[serde(default)]
    traits: Vec<String>,
}

#[derive(Deserialize)]
struct RawActionPhase {
    actions: Vec<RawAction>,
    #[serde(default)]
    is_question: bool,
    #[serde(default)]
    question_for_ai: Option<String>,
}

#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default)]
    ability: Option<String>,
    source_entity_id: i64,
    target_entity_id: i64,
    #[serde(default)]
    action_kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawScenarioDescription {
    story: String,
    possible_actions: Vec<String>,
}

/// Builds an uninitialized [`Scenario`] from a generated response.
///
/// Any `abilities` the service supplied are ignored; they are derived
/// locally during initialization.
pub fn parse_scenario(value: Value) -> Result<Scenario, ValidationError> {
    let raw: RawScenario = decode("scenario", value)?;

    if raw.player_characters.is_empty() {
        return Err(ValidationError::EmptyRoster {
            roster: "player_characters",
        });
    }
    if raw.monsters.is_empty() {
        return Err(ValidationError::EmptyRoster { roster: "monsters" });
    }

    let player_characters = raw
        .player_characters
        .into_iter()
        .map(build_entity)
        .collect::<Result<Vec<_>, _>>()?;
    let monsters = raw
        .monsters
        .into_iter()
        .map(build_entity)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scenario::new(
        raw.location_and_story_description,
        player_characters,
        monsters,
    )?)
}

/// Validates an action-resolution response.
pub fn parse_action_phase(value: Value) -> Result<ActionPhase, ValidationError> {
    let raw: RawActionPhase = decode("action phase", value)?;
    let actions = raw
        .actions
        .into_iter()
        .map(build_action)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ActionPhase {
        actions,
        is_question: raw.is_question,
        question_for_ai: raw.question_for_ai.filter(|q| !q.trim().is_empty()),
    })
}

/// Validates a narration response.
pub fn parse_description(value: Value) -> Result<ScenarioDescription, ValidationError> {
    let raw: RawScenarioDescription = decode("scenario description", value)?;
    Ok(ScenarioDescription {
        story: raw.story,
        possible_actions: raw.possible_actions,
    })
}

fn decode<T>(context: &'static str, value: Value) -> Result<T, ValidationError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(value).map_err(|err| ValidationError::Malformed {
        context,
        message: err.to_string(),
    })
}

fn build_entity(raw: RawEntity) -> Result<GameEntity, ValidationError> {
    let id = entity_id("entity_id", raw.entity_id)?;
    let traits = raw
        .traits
        .iter()
        .map(|t| parse_enum::<Trait>("trait", t))
        .collect::<Result<Vec<_>, _>>()?;

    let mut entity = GameEntity::new(id, raw.name).with_traits(traits);
    if let Some(health) = raw.health {
        entity = entity.with_health(saturate(health));
    }
    if let Some(strength) = raw.strength {
        entity = entity.with_strength(saturate(strength));
    }
    if let Some(dexterity) = raw.dexterity {
        entity = entity.with_dexterity(saturate(dexterity));
    }
    if let Some(intelligence) = raw.intelligence {
        entity = entity.with_intelligence(saturate(intelligence));
    }
    if let Some(bonus) = raw.defensive_bonus {
        entity = entity.with_defensive_bonus(saturate(bonus));
    }
    Ok(entity)
}

fn build_action(raw: RawAction) -> Result<Action, ValidationError> {
    let action_type = parse_enum::<ActionType>("action type", &raw.action_type)?;
    let source = entity_id("source_entity_id", raw.source_entity_id)?;
    let target = entity_id("target_entity_id", raw.target_entity_id)?;

    let mut action = Action::new(action_type, source, target);
    if let Some(kind) = raw.action_kind {
        action = action.with_kind(parse_enum::<ActionKind>("action kind", &kind)?);
    }
    if let Some(ability) = raw.ability {
        action = action.with_ability(parse_enum::<Ability>("ability", &ability)?);
    }
    if let Some(description) = raw.description {
        action = action.with_description(description);
    }
    Ok(action)
}

fn parse_enum<T: FromStr>(field: &'static str, value: &str) -> Result<T, ValidationError> {
    T::from_str(value.trim()).map_err(|_| ValidationError::UnknownValue {
        field,
        value: value.to_owned(),
    })
}

fn entity_id(field: &'static str, value: i64) -> Result<EntityId, ValidationError> {
    match u32::try_from(value) {
        Ok(id) if id > 0 => Ok(EntityId(id)),
        _ => Err(ValidationError::InvalidEntityId { field, value }),
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
