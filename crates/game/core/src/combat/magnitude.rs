//! Magnitude calculation.

use crate::action::ActionKind;
use crate::config::GameConfig;
use crate::state::GameEntity;

/// Select the attribute that scales an action.
pub fn attack_modifier(source: &GameEntity, kind: ActionKind) -> u32 {
    let value = match kind {
        ActionKind::Strength => source.strength(),
        ActionKind::Dexterity => source.dexterity(),
        ActionKind::Intelligence => source.intelligence(),
    };
    value.max(0).unsigned_abs()
}

/// Calculate the magnitude of an action from its modifier and roll.
///
/// # Formula
///
/// ```text
/// magnitude = clamp(round(modifier / 10 × roll), 0, 20)
/// ```
///
/// Rounding is half-to-even on the exact quotient, so a modifier of 5 with
/// a roll of 1 (0.5) yields 0 and with a roll of 3 (1.5) yields 2.
pub fn calculate_magnitude(attack_modifier: u32, roll: u32) -> u32 {
    let scaled = round_half_even(
        attack_modifier.saturating_mul(roll),
        GameConfig::MODIFIER_SCALE,
    );
    scaled.min(GameConfig::MAGNITUDE_MAX)
}

fn round_half_even(numerator: u32, denominator: u32) -> u32 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;
    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal if quotient % 2 == 0 => quotient,
        std::cmp::Ordering::Equal => quotient + 1,
    }
}
