//! Structured results returned by the language-generation collaborator.

use super::Action;

/// Result of resolving a [`ProposedAction`](super::ProposedAction).
///
/// When the player asked a question instead of acting, `actions` is empty,
/// `is_question` is set and `question_for_ai` carries the question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPhase {
    pub actions: Vec<Action>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_question: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub question_for_ai: Option<String>,
}

impl ActionPhase {
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self {
            actions,
            is_question: false,
            question_for_ai: None,
        }
    }

    pub fn question(question: impl Into<String>) -> Self {
        Self {
            actions: Vec::new(),
            is_question: true,
            question_for_ai: Some(question.into()),
        }
    }

    /// True when the phase should be answered rather than applied.
    pub fn is_pure_question(&self) -> bool {
        self.is_question && self.actions.is_empty()
    }
}

/// Narration of the scenario from one entity's point of view.
///
/// `possible_actions` are advisory labels and are not checked against the
/// entity's abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioDescription {
    pub story: String,
    pub possible_actions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_phase_is_answered_not_applied() {
        let phase = ActionPhase::question("Is the dragon asleep?");

        assert!(phase.is_pure_question());
        assert!(phase.actions.is_empty());
        assert_eq!(phase.question_for_ai.as_deref(), Some("Is the dragon asleep?"));
    }

    #[test]
    fn action_phase_is_applied() {
        let phase = ActionPhase::from_actions(vec![Action::attack(1, 2)]);

        assert!(!phase.is_pure_question());
        assert!(!phase.is_question);
        assert_eq!(phase.actions, [Action::attack(1, 2)]);
    }

    #[test]
    fn question_flag_with_actions_still_applies_them() {
        let mut phase = ActionPhase::question("Can I reach the ledge?");
        phase.actions.push(Action::movement(1, 1));

        assert!(!phase.is_pure_question());
    }
}
