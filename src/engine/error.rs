//! Errors raised by the executor.

use crate::core::{label, ActionError, State};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Why a transition was classified `invalid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The state field was unset
    MissingState,
    /// The current state is not one of the transition's source states
    NotPermitted,
    /// The guard returned false
    GuardRejected,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingState => "current state is not set",
            Self::NotPermitted => "current state is not a source state",
            Self::GuardRejected => "guard rejected the transition",
        })
    }
}

/// A transition refused before anything was written.
#[derive(Clone, Debug, PartialEq, Error)]
#[error(
    "cannot {event} {entity_type} {entity_id} from {} to {}: {reason}",
    label(.from),
    .to.name()
)]
pub struct TransitionError<S: State> {
    pub entity_type: String,
    pub entity_id: String,
    pub from: Option<S>,
    pub to: S,
    pub event: String,
    pub reason: Rejection,
}

/// `execute` or `can_transition` was called with a name that was never
/// defined. Never published as an outcome.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{entity_type} has no transition named '{name}'")]
pub struct UnknownTransition {
    pub entity_type: String,
    pub name: String,
}

/// Everything `execute` can fail with.
///
/// `Persistence` and `Action` carry the store's or the post-action's error
/// exactly as it was raised.
#[derive(Debug, Error)]
pub enum Error<S: State, P: StdError + 'static> {
    #[error(transparent)]
    Unknown(#[from] UnknownTransition),

    #[error(transparent)]
    Invalid(#[from] TransitionError<S>),

    #[error("{0}")]
    Persistence(P),

    #[error("{0}")]
    Action(ActionError),

    #[error(
        "{entity_type} {entity_id} changed concurrently: expected {}, found {}",
        .expected.name(),
        label(.found)
    )]
    Conflict {
        entity_type: String,
        entity_id: String,
        expected: S,
        found: Option<S>,
    },
}

impl<S: State, P: StdError + 'static> Error<S, P> {
    /// Whether this error was published as an `invalid` outcome.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    pub fn as_transition_error(&self) -> Option<&TransitionError<S>> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}
