//! Transition executor.

use super::definition::TransitionDefinition;
use super::error::{Error, Rejection, TransitionError, UnknownTransition};
use super::spec::StateMachineSpec;
use crate::config::{ConcurrencyPolicy, ExecutorConfig};
use crate::core::{guard, ActionError, Entity, State, StateChange};
use crate::store::{Changeset, Expected, Store, TransactionError};
use crate::telemetry::{Outcome, Publisher, TelemetrySink, TransitionOutcome};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Error type of [`StateMachine::execute`] for an entity and store.
pub type ExecuteError<E, St> = Error<<E as Entity>::State, <St as Store<E>>::Error>;

/// Why the transaction block bailed out.
enum Abort<S, P> {
    Persistence(P),
    Action(ActionError),
    Conflict(Option<S>),
}

/// Runs named transitions of one entity type against a store.
///
/// The spec is shared and read-only; the executor holds no per-entity state
/// and takes no locks, so one instance can serve any number of entities.
pub struct StateMachine<E: Entity, St> {
    spec: Arc<StateMachineSpec<E>>,
    store: St,
    publisher: Publisher,
    config: ExecutorConfig,
}

impl<E: Entity, St: Store<E>> StateMachine<E, St> {
    pub fn new(spec: Arc<StateMachineSpec<E>>, store: St, sink: Arc<dyn TelemetrySink>) -> Self {
        Self::with_config(spec, store, sink, ExecutorConfig::default())
    }

    pub fn with_config(
        spec: Arc<StateMachineSpec<E>>,
        store: St,
        sink: Arc<dyn TelemetrySink>,
        config: ExecutorConfig,
    ) -> Self {
        let publisher = Publisher::new(sink, config.event_separator.clone());
        Self {
            spec,
            store,
            publisher,
            config,
        }
    }

    pub fn spec(&self) -> &StateMachineSpec<E> {
        &self.spec
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Current value of the state field (pure).
    pub fn current_state(&self, entity: &E) -> Option<E::State> {
        self.store.read(entity, self.spec.field())
    }

    /// Whether `execute` would get past validation and the guard.
    ///
    /// Never writes or publishes anything.
    pub fn can_transition(&self, entity: &E, name: &str) -> Result<bool, UnknownTransition> {
        let definition = self.spec.lookup(name)?;
        Ok(self.check(entity, definition).is_ok())
    }

    /// Names of every transition `can_transition` currently allows.
    pub fn permitted_transitions(&self, entity: &E) -> Vec<&str> {
        self.spec
            .transitions()
            .filter(|definition| self.check(entity, definition).is_ok())
            .map(|definition| definition.name())
            .collect()
    }

    /// Run a transition.
    ///
    /// Validates the current state and guard, then writes the target state
    /// (and timestamp field) and runs the post-action in one store
    /// transaction. Exactly one outcome is published once the transaction
    /// has closed; unknown transition names are returned without
    /// publishing.
    pub fn execute(
        &self,
        entity: &mut E,
        name: &str,
    ) -> Result<StateChange<E::State>, ExecuteError<E, St>> {
        let definition = self.spec.lookup(name)?;
        let entity_id = entity.id();
        debug!(entity_type = E::TYPE, entity_id = %entity_id, event = name, "attempting transition");

        let from = match self.check(entity, definition) {
            Ok(from) => from,
            Err((from, reason)) => {
                self.publish(Outcome::Invalid, &entity_id, definition, from.as_ref());
                warn!(
                    entity_type = E::TYPE,
                    entity_id = %entity_id,
                    event = name,
                    from = crate::core::label(&from),
                    to = definition.to().name(),
                    %reason,
                    "transition rejected"
                );
                return Err(TransitionError {
                    entity_type: E::TYPE.to_string(),
                    entity_id,
                    from,
                    to: definition.to().clone(),
                    event: definition.name().to_string(),
                    reason,
                }
                .into());
            }
        };

        let result = self.apply(entity, definition, &from, &entity_id);

        match &result {
            Ok(change) => {
                self.publish(Outcome::Success, &entity_id, definition, Some(&from));
                info!(
                    entity_type = E::TYPE,
                    entity_id = %entity_id,
                    event = name,
                    from = from.name(),
                    to = change.to.name(),
                    "transition committed"
                );
            }
            Err(err) => {
                self.publish(Outcome::Failed, &entity_id, definition, Some(&from));
                warn!(
                    entity_type = E::TYPE,
                    entity_id = %entity_id,
                    event = name,
                    from = from.name(),
                    error = %err,
                    "transition rolled back"
                );
            }
        }

        result
    }

    /// Steps that decide `invalid`: state present, permitted, guard passes.
    fn check(
        &self,
        entity: &E,
        definition: &TransitionDefinition<E>,
    ) -> Result<E::State, (Option<E::State>, Rejection)> {
        let Some(current) = self.current_state(entity) else {
            return Err((None, Rejection::MissingState));
        };
        if !definition.permits(&current) {
            return Err((Some(current), Rejection::NotPermitted));
        }
        if !guard::evaluate(entity, definition.guard()) {
            return Err((Some(current), Rejection::GuardRejected));
        }
        Ok(current)
    }

    fn apply(
        &self,
        entity: &mut E,
        definition: &TransitionDefinition<E>,
        from: &E::State,
        entity_id: &str,
    ) -> Result<StateChange<E::State>, ExecuteError<E, St>> {
        let field = self.spec.field();
        let timestamp_field = definition
            .timestamp()
            .resolve(definition.to(), &self.config.timestamp_suffix);
        let store = &self.store;
        let optimistic = self.config.concurrency == ConcurrencyPolicy::Optimistic;
        let expected = optimistic.then_some(Expected { field, state: from });

        let committed = store.transaction(
            entity,
            expected,
            |entity| -> Result<StateChange<E::State>, Abort<E::State, St::Error>> {
                // early exit for stale copies; the commit itself re-checks
                if optimistic {
                    let found = store.reload(entity, field).map_err(Abort::Persistence)?;
                    if found.as_ref() != Some(from) {
                        return Err(Abort::Conflict(found));
                    }
                }

                let at = Utc::now();
                let mut changes = Changeset::new();
                changes.set_state(field, definition.to().clone());
                if let Some(timestamp_field) = &timestamp_field {
                    changes.set_timestamp(timestamp_field, at);
                }
                store.write(entity, &changes).map_err(Abort::Persistence)?;

                if let Some(action) = definition.after() {
                    action.run(entity).map_err(Abort::Action)?;
                }

                Ok(StateChange {
                    from: from.clone(),
                    to: definition.to().clone(),
                    event: definition.name().to_string(),
                    timestamp: at,
                    timestamp_field,
                })
            },
        );

        committed.map_err(|err| match err {
            TransactionError::Storage(err) | TransactionError::Abort(Abort::Persistence(err)) => {
                Error::Persistence(err)
            }
            TransactionError::Abort(Abort::Action(err)) => Error::Action(err),
            TransactionError::Abort(Abort::Conflict(found))
            | TransactionError::Conflict { found } => Error::Conflict {
                entity_type: E::TYPE.to_string(),
                entity_id: entity_id.to_string(),
                expected: from.clone(),
                found,
            },
        })
    }

    fn publish(
        &self,
        outcome: Outcome,
        entity_id: &str,
        definition: &TransitionDefinition<E>,
        from: Option<&E::State>,
    ) {
        self.publisher.publish(&TransitionOutcome::new(
            outcome,
            E::TYPE,
            entity_id,
            definition.name(),
            from.map(|s| s.name()),
            definition.to().name(),
        ));
    }
}
