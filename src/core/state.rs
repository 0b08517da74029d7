//! State trait for the values stored in an entity's state field.
//!
//! States are enumerated tokens. The engine only ever compares them and
//! reads their token name, which is what ends up in timestamp field names
//! and published outcomes.

use std::fmt::Debug;

/// Trait for the values of a state field.
///
/// # Required Traits
///
/// - `Clone`: states are copied into changesets and error values
/// - `PartialEq`: membership in a transition's source set is an equality check
/// - `Debug`: states appear in error diagnostics
/// - `Send` + `Sync` + `'static`: machine specs are shared across threads
///
/// Most state types are declared with [`state_enum!`](crate::state_enum),
/// which also generates the full list of declared states.
///
/// # Example
///
/// ```rust
/// use waypoint::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum OrderStatus {
///     Placed,
///     Shipped,
/// }
///
/// impl State for OrderStatus {
///     fn name(&self) -> &str {
///         match self {
///             Self::Placed => "placed",
///             Self::Shipped => "shipped",
///         }
///     }
/// }
///
/// assert_eq!(OrderStatus::Shipped.name(), "shipped");
/// ```
pub trait State: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// The state's token, as stored and published.
    ///
    /// Tokens double as the prefix of automatically named timestamp
    /// fields, so `enrolled` stamps `enrolled_at`.
    fn name(&self) -> &str;
}

/// Display label for an optional state, `nil` when unset.
pub(crate) fn label<S: State>(state: &Option<S>) -> &str {
    state.as_ref().map_or("nil", |s| s.name())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum TestState {
        Created,
        Enrolled,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Created => "created",
                Self::Enrolled => "enrolled",
            }
        }
    }

    #[test]
    fn state_name_returns_token() {
        assert_eq!(TestState::Created.name(), "created");
        assert_eq!(TestState::Enrolled.name(), "enrolled");
    }

    #[test]
    fn label_renders_missing_state_as_nil() {
        assert_eq!(label::<TestState>(&None), "nil");
        assert_eq!(label(&Some(TestState::Enrolled)), "enrolled");
    }

    #[test]
    fn state_is_comparable() {
        assert_eq!(TestState::Created, TestState::Created);
        assert_ne!(TestState::Created, TestState::Enrolled);
    }
}
