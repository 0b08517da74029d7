//! Post-transition actions.
//!
//! An action runs after the state write and before commit, inside the
//! store's transaction. Returning an error aborts the transition and rolls
//! the write back.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Error raised by a post-transition action.
///
/// The executor hands it back to the caller untouched, so callers can
/// downcast it to the concrete type their action produced.
pub type ActionError = Box<dyn StdError + Send + Sync>;

/// Callback executed with mutable access to the entity once its state has
/// been written.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Action;
///
/// struct Member {
///     welcome_sent: bool,
/// }
///
/// let send_welcome = Action::new(|m: &mut Member| {
///     m.welcome_sent = true;
///     Ok(())
/// });
///
/// let mut member = Member { welcome_sent: false };
/// send_welcome.run(&mut member).unwrap();
/// assert!(member.welcome_sent);
/// ```
pub enum Action<E> {
    /// A function bound to the entity, labelled for diagnostics.
    Named {
        name: &'static str,
        run: fn(&mut E) -> Result<(), ActionError>,
    },
    /// A closure run in the entity's context.
    Inline(Arc<dyn Fn(&mut E) -> Result<(), ActionError> + Send + Sync>),
}

impl<E> Action<E> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&mut E) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Action::Inline(Arc::new(action))
    }

    pub fn named(name: &'static str, run: fn(&mut E) -> Result<(), ActionError>) -> Self {
        Action::Named { name, run }
    }

    pub fn run(&self, entity: &mut E) -> Result<(), ActionError> {
        match self {
            Action::Named { run, .. } => run(entity),
            Action::Inline(action) => action(entity),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Action::Named { name, .. } => Some(*name),
            Action::Inline(_) => None,
        }
    }
}

impl<E> Clone for Action<E> {
    fn clone(&self) -> Self {
        match self {
            Action::Named { name, run } => Action::Named {
                name: *name,
                run: *run,
            },
            Action::Inline(action) => Action::Inline(Arc::clone(action)),
        }
    }
}

impl<E> fmt::Debug for Action<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Named { name, .. } => f.debug_tuple("Action::Named").field(name).finish(),
            Action::Inline(_) => f.write_str("Action::Inline"),
        }
    }
}
