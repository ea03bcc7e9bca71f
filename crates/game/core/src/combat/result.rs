//! Result of a resolved action.

use crate::action::ActionType;
use crate::state::EntityId;

/// What happened when an action was applied.
///
/// `message` is the exact text appended to the scenario's action history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub action_type: ActionType,
    pub source: EntityId,
    pub target: EntityId,
    /// Face of the d20 that was rolled.
    pub roll: u32,
    /// Scaled and clamped roll that drove the effect.
    pub magnitude: u32,
    pub message: String,
}
