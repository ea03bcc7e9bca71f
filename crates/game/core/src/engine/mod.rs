//! Scenario lifecycle and action resolution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`Scenario`]. It runs
//! the one-time initialization, resolves actions into state mutations plus a
//! history entry, and advances the turn order. Every state change of an
//! initialized scenario flows through it.

mod errors;
mod transition;
mod turns;

pub use errors::{EntityRole, ExecuteError};
pub use turns::TurnError;

use crate::action::Action;
use crate::combat::ActionOutcome;
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{Scenario, ScenarioError};

/// Game engine that manages initialization, action resolution and turn order.
///
/// Resolution of one action is:
/// lookup target → lookup source → select modifier → roll → clamp → apply → record
///
/// Lookups fail before anything is mutated, so an action either changes
/// exactly one attribute and appends exactly one history entry, or does
/// nothing at all.
pub struct GameEngine<'a> {
    scenario: &'a mut Scenario,
    config: GameConfig,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the default configuration.
    pub fn new(scenario: &'a mut Scenario) -> Self {
        Self::with_config(scenario, GameConfig::default())
    }

    pub fn with_config(scenario: &'a mut Scenario, config: GameConfig) -> Self {
        Self { scenario, config }
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// One-time setup: builds the turn order, derives every entity's
    /// abilities and clears the action history.
    ///
    /// Fails without touching the scenario if it was already initialized or
    /// if any entity already carries generated abilities.
    pub fn initialize(&mut self) -> Result<(), ScenarioError> {
        if self.scenario.initialized {
            return Err(ScenarioError::AlreadyInitialized);
        }
        if let Some(entity) = self.scenario.entities().find(|e| e.abilities_generated()) {
            return Err(crate::state::AbilityError::AlreadyGenerated {
                entity: entity.entity_id(),
            }
            .into());
        }

        self.set_turn_order();
        for entity in self.scenario.entities_mut() {
            entity.generate_abilities()?;
        }
        self.scenario.clear_history();
        self.scenario.initialized = true;
        Ok(())
    }

    /// Applies one action to the scenario.
    ///
    /// Resolves the target and source by id, scales a d20 roll by the source
    /// attribute chosen by `action.action_kind`, then dispatches on
    /// `action.action_type`:
    ///
    /// - Attack: target health decreases by the magnitude
    /// - Heal: target health increases by the magnitude
    /// - Defend: source defensive bonus increases by the magnitude
    /// - Move: no attribute changes
    ///
    /// On success one entry is appended to the action history and returned
    /// in [`ActionOutcome::message`]. Unknown entity ids yield
    /// [`ExecuteError::EntityNotFound`] and leave the scenario unchanged.
    pub fn apply_action<R>(
        &mut self,
        action: &Action,
        rng: &mut R,
    ) -> Result<ActionOutcome, ExecuteError>
    where
        R: RngOracle + ?Sized,
    {
        if !self.scenario.initialized {
            return Err(ExecuteError::NotInitialized);
        }
        transition::execute_transition(action, self.scenario, &self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ActionType};
    use crate::env::{FixedRoll, PcgRng, ScriptedRolls};
    use crate::state::{Ability, AbilityError, EntityId, GameEntity, Trait};

    fn thorn_vs_dreadwing() -> Scenario {
        let thorn = GameEntity::new(1, "Thorn")
            .with_attributes(10, 12, 10)
            .with_traits([Trait::Brave, Trait::Cunning]);
        let dreadwing = GameEntity::new(2, "Dreadwing")
            .with_health(80)
            .with_attributes(18, 8, 6)
            .with_traits([Trait::Aggressive, Trait::Flying]);
        let mut scenario =
            Scenario::new("A dimly lit forest clearing", vec![thorn], vec![dreadwing]).unwrap();
        scenario.initialize().unwrap();
        scenario
    }

    fn numeric_state(scenario: &Scenario) -> Vec<(EntityId, i32, i32)> {
        scenario
            .entities()
            .map(|e| (e.entity_id(), e.health(), e.defensive_bonus()))
            .collect()
    }

    #[test]
    fn initialize_sets_turn_order_and_abilities() {
        let scenario = thorn_vs_dreadwing();

        assert_eq!(scenario.turn_order(), &[EntityId(1), EntityId(2)]);
        assert_eq!(scenario.current_turn(), 0);
        assert!(scenario.action_history().is_empty());
        for entity in scenario.entities() {
            assert!(entity.has_ability(Ability::Attack));
            assert!(entity.has_ability(Ability::Defend));
            for t in entity.traits() {
                for granted in t.granted_abilities() {
                    assert!(entity.has_ability(*granted));
                }
            }
        }
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let mut scenario = thorn_vs_dreadwing();
        let before = scenario.clone();

        assert_eq!(
            scenario.initialize(),
            Err(ScenarioError::AlreadyInitialized)
        );
        assert_eq!(scenario, before);
    }

    #[test]
    fn initialize_rejects_pregenerated_abilities() {
        let mut thorn = GameEntity::new(1, "Thorn");
        thorn.generate_abilities().unwrap();
        let mut scenario =
            Scenario::new("Cave", vec![thorn], vec![GameEntity::new(2, "Rat")]).unwrap();

        let err = scenario.initialize().unwrap_err();

        assert_eq!(
            err,
            ScenarioError::Ability(AbilityError::AlreadyGenerated {
                entity: EntityId(1)
            })
        );
        assert!(!scenario.is_initialized());
        assert!(scenario.turn_order().is_empty());
        assert!(scenario.monsters()[0].abilities().is_empty());
    }

    #[test]
    fn apply_before_initialize_is_rejected() {
        let mut scenario = Scenario::new(
            "Cave",
            vec![GameEntity::new(1, "Thorn")],
            vec![GameEntity::new(2, "Rat")],
        )
        .unwrap();

        let result = scenario.apply_action(&Action::attack(1, 2), &mut FixedRoll(20));

        assert_eq!(result, Err(ExecuteError::NotInitialized));
        assert!(scenario.action_history().is_empty());
    }

    #[test]
    fn attack_with_max_roll_deals_twenty() {
        let mut scenario = thorn_vs_dreadwing();
        let action = Action::attack(1, 2).with_description("Thorn slashed at the beast.");

        let outcome = scenario.apply_action(&action, &mut FixedRoll(20)).unwrap();

        assert_eq!(outcome.roll, 20);
        assert_eq!(outcome.magnitude, 20);
        assert_eq!(scenario.find_entity_by_id(EntityId(2)).unwrap().health(), 60);
        assert_eq!(scenario.action_history().len(), 1);
        assert_eq!(
            scenario.action_history()[0],
            "Thorn attacks Dreadwing for 20 damage. New health: 60. Description: Thorn slashed at the beast."
        );
        assert_eq!(outcome.message, scenario.action_history()[0]);
    }

    #[test]
    fn attack_scales_with_selected_attribute() {
        let mut scenario = thorn_vs_dreadwing();
        let action = Action::attack(1, 2).with_kind(ActionKind::Dexterity);

        let outcome = scenario.apply_action(&action, &mut FixedRoll(10)).unwrap();

        // dexterity 12 → 1.2 × 10
        assert_eq!(outcome.magnitude, 12);
        assert_eq!(scenario.find_entity_by_id(EntityId(2)).unwrap().health(), 68);
    }

    #[test]
    fn attack_floors_health_at_zero_by_default() {
        let mut scenario = thorn_vs_dreadwing();
        let mut rng = FixedRoll(20);
        for _ in 0..5 {
            scenario.apply_action(&Action::attack(2, 1), &mut rng).unwrap();
        }
        assert_eq!(scenario.find_entity_by_id(EntityId(1)).unwrap().health(), 0);
        assert_eq!(scenario.action_history().len(), 5);
    }

    #[test]
    fn unclamped_engine_lets_health_go_negative() {
        let mut scenario = thorn_vs_dreadwing();
        let mut engine = GameEngine::with_config(&mut scenario, GameConfig::unclamped());
        let mut rng = FixedRoll(20);
        for _ in 0..6 {
            engine.apply_action(&Action::attack(2, 1), &mut rng).unwrap();
        }
        assert_eq!(scenario.find_entity_by_id(EntityId(1)).unwrap().health(), -20);
    }

    #[test]
    fn heal_raises_target_health() {
        let mut scenario = thorn_vs_dreadwing();
        let outcome = scenario
            .apply_action(
                &Action::heal(1, 2).with_description("A soothing light."),
                &mut FixedRoll(7),
            )
            .unwrap();

        assert_eq!(outcome.magnitude, 7);
        assert_eq!(scenario.find_entity_by_id(EntityId(2)).unwrap().health(), 87);
        assert_eq!(
            outcome.message,
            "Thorn heals Dreadwing for 7 health. New health: 87. Description: A soothing light."
        );
    }

    #[test]
    fn defend_raises_source_bonus_only() {
        let mut scenario = thorn_vs_dreadwing();
        let mut rng = ScriptedRolls::new([4, 9]);

        scenario.apply_action(&Action::defend(1, 2), &mut rng).unwrap();
        let outcome = scenario.apply_action(&Action::defend(1, 2), &mut rng).unwrap();

        let thorn = scenario.find_entity_by_id(EntityId(1)).unwrap();
        assert_eq!(thorn.defensive_bonus(), 13);
        assert_eq!(scenario.find_entity_by_id(EntityId(2)).unwrap().defensive_bonus(), 0);
        assert_eq!(
            outcome.message,
            "Thorn gained a defensive bonus against Dreadwing of 9. Description: "
        );
    }

    #[test]
    fn defend_never_decreases_bonus() {
        let mut scenario = thorn_vs_dreadwing();
        let mut rng = PcgRng::new(99);
        let mut previous = 0;
        for _ in 0..50 {
            let outcome = scenario.apply_action(&Action::defend(1, 2), &mut rng).unwrap();
            let bonus = scenario.find_entity_by_id(EntityId(1)).unwrap().defensive_bonus();
            assert_eq!(bonus, previous + outcome.magnitude as i32);
            previous = bonus;
        }
    }

    #[test]
    fn move_changes_no_numbers() {
        let mut scenario = thorn_vs_dreadwing();
        let before = numeric_state(&scenario);

        for roll in 1..=20 {
            let outcome = scenario
                .apply_action(&Action::movement(1, 2), &mut FixedRoll(roll))
                .unwrap();
            assert_eq!(outcome.action_type, ActionType::Move);
        }

        assert_eq!(numeric_state(&scenario), before);
        assert_eq!(scenario.action_history().len(), 20);
        assert!(scenario.action_history()[0].starts_with("Dreadwing moves to a new position"));
    }

    #[test]
    fn unknown_target_is_a_no_op() {
        let mut scenario = thorn_vs_dreadwing();
        let before = scenario.clone();

        let err = scenario
            .apply_action(&Action::attack(1, 42), &mut FixedRoll(20))
            .unwrap_err();

        assert_eq!(
            err,
            ExecuteError::EntityNotFound {
                role: EntityRole::Target,
                entity: EntityId(42)
            }
        );
        assert_eq!(scenario, before);
    }

    #[test]
    fn unknown_source_is_a_no_op() {
        let mut scenario = thorn_vs_dreadwing();
        let before = scenario.clone();

        let err = scenario
            .apply_action(&Action::defend(42, 2), &mut FixedRoll(20))
            .unwrap_err();

        assert_eq!(err, ExecuteError::entity_not_found(EntityRole::Source, EntityId(42)));
        assert_eq!(scenario, before);
    }

    #[test]
    fn target_lookup_is_reported_first() {
        let mut scenario = thorn_vs_dreadwing();
        let err = scenario
            .apply_action(&Action::attack(41, 42), &mut FixedRoll(20))
            .unwrap_err();
        assert!(matches!(
            err,
            ExecuteError::EntityNotFound {
                role: EntityRole::Target,
                ..
            }
        ));
    }

    #[test]
    fn self_targeted_heal_resolves() {
        let mut scenario = thorn_vs_dreadwing();
        scenario
            .apply_action(&Action::attack(2, 1), &mut FixedRoll(10))
            .unwrap();
        scenario
            .apply_action(&Action::heal(1, 1), &mut FixedRoll(5))
            .unwrap();
        // strength 18 → 18 damage, then strength 10 → 5 healing
        assert_eq!(scenario.find_entity_by_id(EntityId(1)).unwrap().health(), 87);
    }
}
