//! Persistence capability consumed by the executor.
//!
//! The engine does not own storage. It reads the state field, writes a
//! [`Changeset`] and relies on [`Store::transaction`] for atomicity. The
//! in-memory [`MemoryStore`] implements the trait for tests and demos.

mod fields;
mod memory;

pub use fields::{Changeset, FieldValue, Fields};
pub use memory::{MemoryStore, MemoryStoreError, Record, ValidationError, Validator};

use crate::core::Entity;
use std::error::Error as StdError;
use std::sync::Arc;

/// Committed value a transaction requires at commit time.
///
/// The store compares it with the committed row atomically with the commit.
/// An entity with no committed row yet satisfies any expectation.
#[derive(Debug)]
pub struct Expected<'a, S> {
    pub field: &'a str,
    pub state: &'a S,
}

/// Why a transaction did not commit.
#[derive(Debug)]
pub enum TransactionError<A, P, S> {
    /// The block returned an error; everything it wrote was rolled back.
    Abort(A),
    /// The store failed to begin or commit.
    Storage(P),
    /// The committed value no longer matched the [`Expected`] one; everything
    /// the block wrote was rolled back.
    Conflict { found: Option<S> },
}

/// Storage backing an entity type.
pub trait Store<E: Entity> {
    type Error: StdError + Send + Sync + 'static;

    /// Current in-memory value of a state field, `None` when unset.
    fn read(&self, entity: &E, field: &str) -> Option<E::State>;

    /// Value of a state field as last committed to storage.
    ///
    /// Lets optimistic checks fail fast before anything is written. Stores
    /// without a separate committed view fall back to [`Store::read`].
    fn reload(&self, entity: &E, field: &str) -> Result<Option<E::State>, Self::Error> {
        Ok(self.read(entity, field))
    }

    /// Apply field writes to the entity, rejecting them if storage-level
    /// validation fails.
    fn write(&self, entity: &mut E, changes: &Changeset<E::State>) -> Result<(), Self::Error>;

    /// Run `block` atomically.
    ///
    /// On `Ok` the writes commit. On `Err` they are rolled back, the
    /// entity's fields included, and the block's error is returned as
    /// [`TransactionError::Abort`].
    ///
    /// With `expected`, the commit is a compare-and-swap: if another
    /// transaction has committed a different value for the field since, the
    /// writes are rolled back and [`TransactionError::Conflict`] is returned.
    fn transaction<T, A, F>(
        &self,
        entity: &mut E,
        expected: Option<Expected<'_, E::State>>,
        block: F,
    ) -> Result<T, TransactionError<A, Self::Error, E::State>>
    where
        F: FnOnce(&mut E) -> Result<T, A>;
}

impl<E: Entity, St: Store<E>> Store<E> for Arc<St> {
    type Error = St::Error;

    fn read(&self, entity: &E, field: &str) -> Option<E::State> {
        (**self).read(entity, field)
    }

    fn reload(&self, entity: &E, field: &str) -> Result<Option<E::State>, Self::Error> {
        (**self).reload(entity, field)
    }

    fn write(&self, entity: &mut E, changes: &Changeset<E::State>) -> Result<(), Self::Error> {
        (**self).write(entity, changes)
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
        (**self).transaction(entity, expected, block)
    }
}
