//! In-memory store with snapshot rollback.

use super::fields::{Changeset, Fields};
use super::{Expected, Store, TransactionError};
use crate::core::Entity;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;
use tracing::debug;

/// Entity whose persisted fields live in a [`Fields`] bag.
///
/// Only the bag is snapshotted and restored on rollback; anything else a
/// post-action changes on the entity stays changed.
pub trait Record: Entity {
    fn fields(&self) -> &Fields<Self::State>;
    fn fields_mut(&mut self) -> &mut Fields<Self::State>;
}

/// A write rejected by storage-level validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by [`MemoryStore`].
#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("memory store lock poisoned")]
    Poisoned,
}

/// Check run against every changeset before it is applied.
pub type Validator<S> = Box<dyn Fn(&Changeset<S>) -> Result<(), ValidationError> + Send + Sync>;

/// Store keeping committed rows in a map keyed by entity id.
///
/// Writes are applied to the entity immediately and become durable when the
/// surrounding transaction commits.
pub struct MemoryStore<E: Record> {
    rows: Mutex<HashMap<String, Fields<E::State>>>,
    validators: Vec<Validator<E::State>>,
    commits: AtomicUsize,
    rollbacks: AtomicUsize,
}

impl<E: Record> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Record> MemoryStore<E> {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            validators: Vec::new(),
            commits: AtomicUsize::new(0),
            rollbacks: AtomicUsize::new(0),
        }
    }

    /// Add a validator that every write must pass.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Changeset<E::State>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    /// Persist the entity's current fields as its committed row.
    pub fn save(&self, entity: &E) -> Result<(), MemoryStoreError> {
        self.rows()?.insert(entity.id(), entity.fields().clone());
        Ok(())
    }

    /// Committed row for an entity id.
    pub fn persisted(&self, id: &str) -> Result<Option<Fields<E::State>>, MemoryStoreError> {
        Ok(self.rows()?.get(id).cloned())
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    fn rows(&self) -> Result<MutexGuard<'_, HashMap<String, Fields<E::State>>>, MemoryStoreError> {
        self.rows.lock().map_err(|_| MemoryStoreError::Poisoned)
    }

    fn restore(&self, entity: &mut E, snapshot: Fields<E::State>) {
        *entity.fields_mut() = snapshot;
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        debug!(entity_type = E::TYPE, entity_id = %entity.id(), "transaction rolled back");
    }
}

impl<E: Record> Store<E> for MemoryStore<E> {
    type Error = MemoryStoreError;

    fn read(&self, entity: &E, field: &str) -> Option<E::State> {
        entity.fields().state(field).cloned()
    }

    fn reload(&self, entity: &E, field: &str) -> Result<Option<E::State>, Self::Error> {
        let rows = self.rows()?;
        Ok(match rows.get(&entity.id()) {
            Some(row) => row.state(field).cloned(),
            // never saved, the in-memory value is all there is
            None => self.read(entity, field),
        })
    }

    fn write(&self, entity: &mut E, changes: &Changeset<E::State>) -> Result<(), Self::Error> {
        for validator in &self.validators {
            validator(changes)?;
        }
        entity.fields_mut().apply(changes);
        Ok(())
    }

    fn transaction<T, A, F>(
        &self,
        entity: &mut E,
        expected: Option<Expected<'_, E::State>>,
        block: F,
    ) -> Result<T, TransactionError<A, Self::Error, E::State>>
    where
        F: FnOnce(&mut E) -> Result<T, A>,
    {
        let snapshot = entity.fields().clone();

        let value = match block(entity) {
            Ok(value) => value,
            Err(abort) => {
                self.restore(entity, snapshot);
                return Err(TransactionError::Abort(abort));
            }
        };

        // check and commit under one guard
        let mut rows = match self.rows() {
            Ok(rows) => rows,
            Err(err) => {
                self.restore(entity, snapshot);
                return Err(TransactionError::Storage(err));
            }
        };
        let id = entity.id();
        if let (Some(expected), Some(row)) = (expected, rows.get(&id)) {
            let found = row.state(expected.field);
            if found != Some(expected.state) {
                let found = found.cloned();
                drop(rows);
                self.restore(entity, snapshot);
                return Err(TransactionError::Conflict { found });
            }
        }
        rows.insert(id, entity.fields().clone());
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }
}
