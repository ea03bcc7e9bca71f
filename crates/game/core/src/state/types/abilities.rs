//! Traits and the abilities they grant.
//!
//! Traits are flavor tags fixed at entity creation. Abilities are the
//! capabilities an entity may invoke; every entity holds the base pair
//! (Attack, Defend) plus whatever its traits grant through a fixed table.

/// Identity tag describing an entity's nature.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Trait {
    Aggressive,
    Stealthy,
    Magical,
    Brave,
    Cunning,
    Flying,
    #[strum(serialize = "Fire-breathing")]
    #[cfg_attr(feature = "serde", serde(rename = "Fire-breathing"))]
    FireBreathing,
}

/// A capability an entity may use when acting.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Ability {
    Attack,
    Defend,
    Heal,
    #[strum(serialize = "Cast Spell")]
    #[cfg_attr(feature = "serde", serde(rename = "Cast Spell"))]
    CastSpell,
    Sneak,
    Fly,
    Berserk,
    #[strum(serialize = "Breath Fire")]
    #[cfg_attr(feature = "serde", serde(rename = "Breath Fire"))]
    BreathFire,
}

/// Abilities every entity receives regardless of traits, in grant order.
pub const BASE_ABILITIES: [Ability; 2] = [Ability::Attack, Ability::Defend];

impl Trait {
    /// Abilities granted by this trait, in grant order.
    ///
    /// Brave and Cunning are pure flavor and grant nothing.
    pub const fn granted_abilities(self) -> &'static [Ability] {
        match self {
            Trait::Aggressive => &[Ability::Berserk],
            Trait::Stealthy => &[Ability::Sneak],
            Trait::Magical => &[Ability::CastSpell],
            Trait::Flying => &[Ability::Fly],
            Trait::FireBreathing => &[Ability::BreathFire],
            Trait::Brave | Trait::Cunning => &[],
        }
    }
}

/// Derives the full ability list for a set of traits.
///
/// Duplicates are kept: two traits granting the same ability yield it twice.
pub fn derive_abilities(traits: &[Trait]) -> Vec<Ability> {
    BASE_ABILITIES
        .iter()
        .copied()
        .chain(
            traits
                .iter()
                .flat_map(|t| t.granted_abilities().iter().copied()),
        )
        .collect()
}
