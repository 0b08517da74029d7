//! Field values exchanged between the executor and a store.

use crate::core::State;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A value the engine can write: a state token or a timestamp.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue<S: State> {
    State(S),
    Timestamp(DateTime<Utc>),
}

/// Ordered set of field writes applied as one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Changeset<S: State> {
    values: BTreeMap<String, FieldValue<S>>,
}

impl<S: State> Default for Changeset<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Changeset<S> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn set_state(&mut self, field: &str, state: S) -> &mut Self {
        self.values
            .insert(field.to_string(), FieldValue::State(state));
        self
    }

    pub fn set_timestamp(&mut self, field: &str, at: DateTime<Utc>) -> &mut Self {
        self.values
            .insert(field.to_string(), FieldValue::Timestamp(at));
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue<S>> {
        self.values.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue<S>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// In-memory attribute bag for entities backed by a
/// [`MemoryStore`](super::MemoryStore).
#[derive(Clone, Debug, PartialEq)]
pub struct Fields<S: State> {
    values: BTreeMap<String, FieldValue<S>>,
}

impl<S: State> Default for Fields<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> Fields<S> {
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Start from a single state field.
    pub fn with_state(field: &str, state: S) -> Self {
        let mut fields = Self::new();
        fields
            .values
            .insert(field.to_string(), FieldValue::State(state));
        fields
    }

    pub fn state(&self, field: &str) -> Option<&S> {
        match self.values.get(field) {
            Some(FieldValue::State(state)) => Some(state),
            _ => None,
        }
    }

    pub fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        match self.values.get(field) {
            Some(FieldValue::Timestamp(at)) => Some(*at),
            _ => None,
        }
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue<S>> {
        self.values.remove(field)
    }

    /// Apply every write in the changeset.
    pub fn apply(&mut self, changes: &Changeset<S>) {
        for (field, value) in changes.iter() {
            self.values.insert(field.to_string(), value.clone());
        }
    }
}
