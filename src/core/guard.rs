//! Guard predicates for controlling state transitions.
//!
//! Guards are read-only checks bound to the entity being transitioned. A
//! guard is either a named predicate (a plain function of the entity with a
//! label for diagnostics) or an inline closure. Both resolve to a single
//! [`Guard::check`] call.

use std::fmt;
use std::sync::Arc;

/// Predicate that decides whether a transition may proceed for an entity.
///
/// Guards only receive `&E`, so they cannot mutate the entity.
///
/// # Example
///
/// ```rust
/// use waypoint::core::Guard;
///
/// struct Member {
///     dues_paid: bool,
///     strikes: u32,
/// }
///
/// impl Member {
///     fn is_eligible(&self) -> bool {
///         self.dues_paid
///     }
/// }
///
/// let eligible = Guard::named("eligible?", Member::is_eligible);
/// let in_good_standing = Guard::new(|m: &Member| m.strikes < 3);
///
/// let member = Member { dues_paid: true, strikes: 4 };
/// assert!(eligible.check(&member));
/// assert!(!in_good_standing.check(&member));
/// assert_eq!(eligible.name(), Some("eligible?"));
/// ```
pub enum Guard<E> {
    /// A predicate function bound to the entity, labelled for diagnostics.
    Named {
        name: &'static str,
        predicate: fn(&E) -> bool,
    },
    /// A closure evaluated in the entity's context.
    Inline(Arc<dyn Fn(&E) -> bool + Send + Sync>),
}

impl<E> Guard<E> {
    /// Create a guard from an inline closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        Guard::Inline(Arc::new(predicate))
    }

    /// Create a guard from a named predicate, typically a method of `E`.
    pub fn named(name: &'static str, predicate: fn(&E) -> bool) -> Self {
        Guard::Named { name, predicate }
    }

    /// Evaluate the guard against an entity.
    pub fn check(&self, entity: &E) -> bool {
        match self {
            Guard::Named { predicate, .. } => predicate(entity),
            Guard::Inline(predicate) => predicate(entity),
        }
    }

    /// Label of a named guard. Inline guards have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Guard::Named { name, .. } => Some(*name),
            Guard::Inline(_) => None,
        }
    }
}

/// Evaluate an optional guard. No guard means the transition is allowed.
pub fn evaluate<E>(entity: &E, guard: Option<&Guard<E>>) -> bool {
    guard.is_none_or(|g| g.check(entity))
}

impl<E> Clone for Guard<E> {
    fn clone(&self) -> Self {
        match self {
            Guard::Named { name, predicate } => Guard::Named {
                name: *name,
                predicate: *predicate,
            },
            Guard::Inline(predicate) => Guard::Inline(Arc::clone(predicate)),
        }
    }
}

impl<E> fmt::Debug for Guard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Named { name, .. } => f.debug_tuple("Guard::Named").field(name).finish(),
            Guard::Inline(_) => f.write_str("Guard::Inline"),
        }
    }
}
