//! Effect dispatch for resolved actions.
//!
//! Lookups and the roll happen first; the single mutation and the history
//! append happen last, so a failed lookup leaves the scenario untouched.

use crate::action::{Action, ActionType};
use crate::combat::{ActionOutcome, attack_modifier, calculate_magnitude};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{EntityId, Scenario};

use super::{EntityRole, ExecuteError};

pub(super) fn execute_transition<R>(
    action: &Action,
    scenario: &mut Scenario,
    config: &GameConfig,
    rng: &mut R,
) -> Result<ActionOutcome, ExecuteError>
where
    R: RngOracle + ?Sized,
{
    let target = scenario
        .find_entity_by_id(action.target_entity_id)
        .ok_or_else(|| {
            ExecuteError::entity_not_found(EntityRole::Target, action.target_entity_id)
        })?;
    let target_name = target.name().to_owned();

    let source = scenario
        .find_entity_by_id(action.source_entity_id)
        .ok_or_else(|| {
            ExecuteError::entity_not_found(EntityRole::Source, action.source_entity_id)
        })?;
    let source_name = source.name().to_owned();

    let modifier = attack_modifier(source, action.action_kind);
    let roll = rng.roll_die(GameConfig::ROLL_SIDES);
    let magnitude = calculate_magnitude(modifier, roll);
    let description = &action.description;

    let message = match action.action_type {
        ActionType::Attack => {
            let health = mutate(scenario, action.target_entity_id, EntityRole::Target, |e| {
                e.take_damage(magnitude, config)
            })?;
            format!(
                "{source_name} attacks {target_name} for {magnitude} damage. New health: {health}. Description: {description}"
            )
        }
        ActionType::Heal => {
            let health = mutate(scenario, action.target_entity_id, EntityRole::Target, |e| {
                e.restore_health(magnitude, config)
            })?;
            format!(
                "{source_name} heals {target_name} for {magnitude} health. New health: {health}. Description: {description}"
            )
        }
        ActionType::Defend => {
            mutate(scenario, action.source_entity_id, EntityRole::Source, |e| {
                e.raise_defensive_bonus(magnitude, config)
            })?;
            format!(
                "{source_name} gained a defensive bonus against {target_name} of {magnitude}. Description: {description}"
            )
        }
        // Positions are not modelled yet; the move is narrated only.
        ActionType::Move => format!(
            "{target_name} moves to a new position in the amount of {magnitude}. Description: {description}"
        ),
    };

    scenario.record(message.clone());

    Ok(ActionOutcome {
        action_type: action.action_type,
        source: action.source_entity_id,
        target: action.target_entity_id,
        roll,
        magnitude,
        message,
    })
}

fn mutate<T>(
    scenario: &mut Scenario,
    id: EntityId,
    role: EntityRole,
    f: impl FnOnce(&mut crate::state::GameEntity) -> T,
) -> Result<T, ExecuteError> {
    scenario
        .find_entity_mut(id)
        .map(f)
        .ok_or_else(|| ExecuteError::entity_not_found(role, id))
}
