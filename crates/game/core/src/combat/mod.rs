//! Combat arithmetic.
//!
//! Pure functions that turn an attribute and a d20 roll into the magnitude
//! of an effect, plus the outcome type reported once an effect is applied.
//!
//! - `attack_modifier`: attribute selected by the action kind
//! - `calculate_magnitude`: `round(modifier / 10 × roll)` clamped to `[0, 20]`

pub mod magnitude;
pub mod result;

pub use magnitude::{attack_modifier, calculate_magnitude};
pub use result::ActionOutcome;
