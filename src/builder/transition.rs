//! Builder for transition definitions.

use crate::builder::error::DefinitionError;
use crate::core::{Action, ActionError, Entity, Guard};
use crate::engine::{TimestampPolicy, TransitionDefinition};

/// Fluent builder for one named transition.
///
/// State membership is checked when the transition is registered with
/// [`StateMachineBuilder::define`](crate::builder::StateMachineBuilder::define),
/// which knows the declared states.
pub struct TransitionBuilder<E: Entity> {
    name: String,
    from: Vec<E::State>,
    to: Option<E::State>,
    timestamp: TimestampPolicy,
    guard: Option<Guard<E>>,
    after: Option<Action<E>>,
}

impl<E: Entity> TransitionBuilder<E> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: Vec::new(),
            to: None,
            timestamp: TimestampPolicy::None,
            guard: None,
            after: None,
        }
    }

    /// Add allowed source states (at least one is required).
    /// Repeated states are kept once.
    pub fn from(mut self, states: impl IntoIterator<Item = E::State>) -> Self {
        for state in states {
            if !self.from.contains(&state) {
                self.from.push(state);
            }
        }
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: E::State) -> Self {
        self.to = Some(state);
        self
    }

    /// Stamp `<to>_at` (or the configured suffix) when the transition runs.
    pub fn timestamp(mut self) -> Self {
        self.timestamp = TimestampPolicy::Auto;
        self
    }

    /// Stamp an explicitly named field when the transition runs.
    pub fn timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp = TimestampPolicy::Field(field.into());
        self
    }

    pub fn guard(mut self, guard: Guard<E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Run an action after the state write, inside the transaction.
    pub fn after(mut self, action: Action<E>) -> Self {
        self.after = Some(action);
        self
    }

    pub fn after_fn<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut E) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.after = Some(Action::new(action));
        self
    }

    /// Build the definition.
    pub fn build(self) -> Result<TransitionDefinition<E>, DefinitionError> {
        let to = self
            .to
            .ok_or_else(|| DefinitionError::MissingTarget(self.name.clone()))?;
        if self.from.is_empty() {
            return Err(DefinitionError::NoSourceStates(self.name));
        }

        Ok(TransitionDefinition {
            name: self.name,
            to,
            from: self.from,
            timestamp: self.timestamp,
            guard: self.guard,
            after: self.after,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Status {
        Created,
        Suspended,
        Enrolled,
    }

    impl State for Status {
        fn name(&self) -> &str {
            match self {
                Self::Created => "created",
                Self::Suspended => "suspended",
                Self::Enrolled => "enrolled",
            }
        }
    }

    struct Member {
        eligible: bool,
    }

    impl Entity for Member {
        type State = Status;
        const TYPE: &'static str = "member";

        fn id(&self) -> String {
            "1".to_string()
        }
    }

    #[test]
    fn builder_requires_target() {
        let result = TransitionBuilder::<Member>::new("enroll")
            .from([Status::Created])
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::MissingTarget("enroll".to_string())
        );
    }

    #[test]
    fn builder_requires_source_states() {
        let result = TransitionBuilder::<Member>::new("enroll")
            .to(Status::Enrolled)
            .build();

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::NoSourceStates("enroll".to_string())
        );
    }

    #[test]
    fn repeated_source_states_are_deduplicated() {
        let definition = TransitionBuilder::<Member>::new("reactivate")
            .from([Status::Suspended, Status::Suspended])
            .from([Status::Created, Status::Suspended])
            .to(Status::Enrolled)
            .build()
            .unwrap();

        assert_eq!(definition.from(), &[Status::Suspended, Status::Created]);
    }

    #[test]
    fn fluent_api_builds_full_definition() {
        let definition = TransitionBuilder::<Member>::new("reactivate")
            .from([Status::Suspended])
            .to(Status::Enrolled)
            .timestamp()
            .when(|m: &Member| m.eligible)
            .after_fn(|_| Ok(()))
            .build()
            .unwrap();

        assert_eq!(definition.name(), "reactivate");
        assert_eq!(definition.timestamp(), &TimestampPolicy::Auto);
        assert!(definition.guard().is_some());
        assert!(definition.after().is_some());
    }

    #[test]
    fn explicit_timestamp_field_replaces_auto() {
        let definition = TransitionBuilder::<Member>::new("enroll")
            .from([Status::Created])
            .to(Status::Enrolled)
            .timestamp()
            .timestamp_field("joined_at")
            .build()
            .unwrap();

        assert_eq!(
            definition.timestamp(),
            &TimestampPolicy::Field("joined_at".to_string())
        );
    }
}
