//! Session orchestration for the text-adventure engine.
//!
//! This crate wires the deterministic `adventure-core` rules to an external
//! language-generation service. Consumers embed [`Runtime`] to play turns,
//! subscribe to events, and query the scenario through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the session orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`contract`] validates generated responses before they reach the core
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`config`] loads runtime settings from the environment
//! - `workers` keeps the simulation task internal to the crate
pub mod api;
pub mod config;
pub mod contract;
pub mod events;
pub mod runtime;

mod retry;
mod workers;

pub use api::{
    GenerationOperation, GenerationProvider, ProviderError, Result, RuntimeError, RuntimeHandle,
    ScriptedProvider,
};
pub use config::RuntimeConfig;
pub use contract::{ActionRequest, NarrationRequest, QuestionRequest, ValidationError};
pub use events::{Event, EventBus, GameStateEvent, NarrativeEvent, Topic, TurnEvent};
pub use runtime::{
    ActionReport, MONSTER_INTENT, QUIT_COMMAND, Runtime, RuntimeBuilder, TurnOutcome,
};
