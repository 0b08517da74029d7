//! Definition API for state machines.
//!
//! This module provides fluent builders and a macro for declaring an entity
//! type's states and transitions. Everything here runs once, at setup; the
//! output is an immutable [`StateMachineSpec`](crate::engine::StateMachineSpec).

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::DefinitionError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::Entity;

/// Start a transition from `from` to `to`, with no guard, timestamp or
/// post-action until they are added.
///
/// # Example
///
/// ```
/// use waypoint::builder::{transition, StateMachineBuilder};
/// use waypoint::core::Entity;
/// use waypoint::state_enum;
///
/// state_enum! {
///     enum Light {
///         Red => "red",
///         Green => "green",
///     }
/// }
///
/// struct Crossing;
///
/// impl Entity for Crossing {
///     type State = Light;
///     const TYPE: &'static str = "crossing";
///
///     fn id(&self) -> String {
///         "main-st".to_string()
///     }
/// }
///
/// let spec = StateMachineBuilder::<Crossing>::new("light", Light::all())
///     .define(transition("go", [Light::Red], Light::Green))
///     .unwrap()
///     .define(transition("stop", [Light::Green], Light::Red).timestamp())
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.len(), 2);
/// ```
pub fn transition<E: Entity>(
    name: impl Into<String>,
    from: impl IntoIterator<Item = E::State>,
    to: E::State,
) -> TransitionBuilder<E> {
    TransitionBuilder::new(name).from(from).to(to)
}
