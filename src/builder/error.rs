//! Configuration errors for tables, transitions and machine config.

use thiserror::Error;

/// Errors that make a configuration unusable. No machine is ever created
/// from a configuration that produced one of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Initial state not specified. Declare one state with .initial(state)")]
    MissingInitialState,

    #[error("More than one initial state: '{first}' and '{second}'")]
    MultipleInitialStates { first: String, second: String },

    #[error("State '{state}' referenced by {referenced_by} is not declared")]
    UndeclaredState {
        state: String,
        referenced_by: String,
    },

    #[error("Transition on '{event}' originates from terminal state '{state}'")]
    TransitionFromTerminal { state: String, event: String },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("State '{state}' already has an {phase} action")]
    DuplicateAction { state: String, phase: &'static str },

    #[error("Transition source state not specified. Call .from(state)")]
    MissingSource,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTarget,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Malformed machine configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}
