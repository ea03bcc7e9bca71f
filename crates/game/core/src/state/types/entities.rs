use super::{Ability, EntityId, Trait, derive_abilities};
use crate::config::GameConfig;
use crate::state::AbilityError;

/// A player character or monster taking part in a scenario.
///
/// # Invariants
///
/// - `strength`, `dexterity` and `intelligence` lie in `[0, ATTRIBUTE_MAX]` and
///   never change after creation
/// - `health` starts in `[0, HEALTH_MAX]` and `defensive_bonus` in
///   `[0, DEFENSIVE_BONUS_MAX]`; after creation they only change through the engine
/// - `abilities` is empty until [`generate_abilities`](Self::generate_abilities)
///   runs, and afterwards always starts with Attack, Defend
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameEntity {
    entity_id: EntityId,
    name: String,
    health: i32,
    strength: i32,
    dexterity: i32,
    intelligence: i32,
    traits: Vec<Trait>,
    abilities: Vec<Ability>,
    defensive_bonus: i32,
}

impl GameEntity {
    /// Creates an entity with default attributes (health 100, attributes 10,
    /// no defensive bonus, no traits).
    pub fn new(entity_id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            name: name.into(),
            health: GameConfig::DEFAULT_HEALTH,
            strength: GameConfig::DEFAULT_ATTRIBUTE,
            dexterity: GameConfig::DEFAULT_ATTRIBUTE,
            intelligence: GameConfig::DEFAULT_ATTRIBUTE,
            traits: Vec::new(),
            abilities: Vec::new(),
            defensive_bonus: 0,
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, GameConfig::HEALTH_MAX);
        self
    }

    pub fn with_attributes(mut self, strength: i32, dexterity: i32, intelligence: i32) -> Self {
        self.strength = clamp_attribute(strength);
        self.dexterity = clamp_attribute(dexterity);
        self.intelligence = clamp_attribute(intelligence);
        self
    }

    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = clamp_attribute(strength);
        self
    }

    pub fn with_dexterity(mut self, dexterity: i32) -> Self {
        self.dexterity = clamp_attribute(dexterity);
        self
    }

    pub fn with_intelligence(mut self, intelligence: i32) -> Self {
        self.intelligence = clamp_attribute(intelligence);
        self
    }

    pub fn with_defensive_bonus(mut self, bonus: i32) -> Self {
        self.defensive_bonus = bonus.clamp(0, GameConfig::DEFENSIVE_BONUS_MAX);
        self
    }

    pub fn with_traits(mut self, traits: impl IntoIterator<Item = Trait>) -> Self {
        self.traits = traits.into_iter().collect();
        self
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn dexterity(&self) -> i32 {
        self.dexterity
    }

    pub fn intelligence(&self) -> i32 {
        self.intelligence
    }

    pub fn defensive_bonus(&self) -> i32 {
        self.defensive_bonus
    }

    pub fn traits(&self) -> &[Trait] {
        &self.traits
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities.contains(&ability)
    }

    /// Returns true once abilities have been derived from traits.
    pub fn abilities_generated(&self) -> bool {
        !self.abilities.is_empty()
    }

    /// Returns true while health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Derives abilities from traits. Must be called exactly once.
    ///
    /// A second call is rejected and leaves the ability list untouched.
    pub fn generate_abilities(&mut self) -> Result<&[Ability], AbilityError> {
        if self.abilities_generated() {
            return Err(AbilityError::AlreadyGenerated {
                entity: self.entity_id,
            });
        }
        self.abilities = derive_abilities(&self.traits);
        Ok(&self.abilities)
    }

    /// Subtracts `amount` from health and returns the new value.
    pub(crate) fn take_damage(&mut self, amount: u32, config: &GameConfig) -> i32 {
        let raw = self.health.saturating_sub(to_i32(amount));
        self.health = if config.clamp_health { raw.max(0) } else { raw };
        self.health
    }

    /// Adds `amount` to health and returns the new value.
    pub(crate) fn restore_health(&mut self, amount: u32, config: &GameConfig) -> i32 {
        let raw = self.health.saturating_add(to_i32(amount));
        self.health = if config.clamp_health {
            raw.min(GameConfig::HEALTH_MAX)
        } else {
            raw
        };
        self.health
    }

    /// Adds `amount` to the defensive bonus and returns the new value.
    ///
    /// A configured cap limits the increase but never lowers an existing bonus.
    pub(crate) fn raise_defensive_bonus(&mut self, amount: u32, config: &GameConfig) -> i32 {
        let raw = self.defensive_bonus.saturating_add(to_i32(amount));
        self.defensive_bonus = match config.defensive_bonus_cap {
            Some(cap) => raw.min(cap).max(self.defensive_bonus),
            None => raw,
        };
        self.defensive_bonus
    }
}

fn clamp_attribute(value: i32) -> i32 {
    value.clamp(0, GameConfig::ATTRIBUTE_MAX)
}

fn to_i32(amount: u32) -> i32 {
    i32::try_from(amount).unwrap_or(i32::MAX)
}
