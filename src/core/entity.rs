//! Entities whose state field is driven by a state machine.

use super::state::State;

/// A persisted record with an identity and a state field.
///
/// The engine never constructs or destroys entities. It reads the state
/// field through a [`Store`](crate::store::Store) and writes only the state
/// field and, when configured, one timestamp field.
pub trait Entity {
    /// The values the state field can hold.
    type State: State;

    /// Entity type name, used in error messages and published event names.
    const TYPE: &'static str;

    /// Stable identity of this record.
    fn id(&self) -> String;
}
