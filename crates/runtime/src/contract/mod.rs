//! Data exchanged with the language-generation collaborator.
//!
//! Outbound requests live in [`context`]; inbound responses are checked by
//! [`validation`] before they are allowed near the core engine.

pub mod context;
pub mod validation;

pub use context::{ActionRequest, NarrationRequest, QuestionRequest, scenario_snapshot};
pub use validation::{ValidationError, parse_action_phase, parse_description, parse_scenario};
