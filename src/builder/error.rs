//! Errors raised while defining a state machine.

use thiserror::Error;

/// Errors that can occur when defining transitions. All of them are fatal
/// to setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("Transition '{0}' has no target state. Call .to(state)")]
    MissingTarget(String),

    #[error("Transition '{0}' has no source states. Call .from(states)")]
    NoSourceStates(String),

    #[error(
        "Transition '{transition}' references states not declared for '{field}': {}",
        .states.join(", ")
    )]
    UndeclaredStates {
        transition: String,
        field: String,
        states: Vec<String>,
    },

    #[error("Transition '{0}' is already defined")]
    DuplicateTransition(String),

    #[error("No transitions defined. Add at least one with .define(transition)")]
    NoTransitions,
}
