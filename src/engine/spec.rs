//! Frozen per-entity-type transition table.

use super::definition::TransitionDefinition;
use super::error::UnknownTransition;
use crate::core::Entity;
use std::collections::BTreeMap;

/// The state machine of one entity type: its state field, declared states
/// and transitions by name.
///
/// Produced by [`StateMachineBuilder::build`](crate::builder::StateMachineBuilder::build)
/// and read-only afterwards. Wrap it in an `Arc` to share it between
/// executors and threads.
pub struct StateMachineSpec<E: Entity> {
    pub(crate) field: String,
    pub(crate) states: Vec<E::State>,
    pub(crate) transitions: BTreeMap<String, TransitionDefinition<E>>,
}

impl<E: Entity> StateMachineSpec<E> {
    pub fn entity_type(&self) -> &'static str {
        E::TYPE
    }

    /// Name of the state-bearing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn valid_states(&self) -> &[E::State] {
        &self.states
    }

    pub fn is_declared(&self, state: &E::State) -> bool {
        self.states.contains(state)
    }

    pub fn lookup(&self, name: &str) -> Result<&TransitionDefinition<E>, UnknownTransition> {
        self.transitions
            .get(name)
            .ok_or_else(|| UnknownTransition {
                entity_type: E::TYPE.to_string(),
                name: name.to_string(),
            })
    }

    /// All transitions, ordered by name.
    pub fn transitions(&self) -> impl Iterator<Item = &TransitionDefinition<E>> {
        self.transitions.values()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<E: Entity> std::fmt::Debug for StateMachineSpec<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachineSpec")
            .field("entity_type", &E::TYPE)
            .field("field", &self.field)
            .field("states", &self.states)
            .field("transitions", &self.transitions.keys().collect::<Vec<_>>())
            .finish()
    }
}
