//! Builder for an entity type's state machine.

use crate::builder::error::DefinitionError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Entity, State};
use crate::engine::{StateMachineSpec, TransitionDefinition};
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Builder collecting the transitions of one entity type.
///
/// The declared states are fixed up front; every transition registered
/// afterwards is checked against them. [`build`](Self::build) freezes the
/// result into a [`StateMachineSpec`].
pub struct StateMachineBuilder<E: Entity> {
    field: String,
    states: Vec<E::State>,
    transitions: BTreeMap<String, TransitionDefinition<E>>,
}

impl<E: Entity> StateMachineBuilder<E> {
    /// Start a machine over `field`, whose valid values are `states`.
    pub fn new(field: impl Into<String>, states: impl IntoIterator<Item = E::State>) -> Self {
        Self {
            field: field.into(),
            states: states.into_iter().collect(),
            transitions: BTreeMap::new(),
        }
    }

    /// Build and register a transition.
    pub fn define(self, builder: TransitionBuilder<E>) -> Result<Self, DefinitionError> {
        let definition = builder.build()?;
        self.add_transition(definition)
    }

    /// Register a pre-built transition.
    pub fn add_transition(
        mut self,
        definition: TransitionDefinition<E>,
    ) -> Result<Self, DefinitionError> {
        if self.transitions.contains_key(definition.name()) {
            return Err(DefinitionError::DuplicateTransition(
                definition.name().to_string(),
            ));
        }
        self.check_declared(&definition)?;

        self.transitions
            .insert(definition.name().to_string(), definition);
        Ok(self)
    }

    /// Freeze the machine.
    pub fn build(self) -> Result<StateMachineSpec<E>, DefinitionError> {
        if self.transitions.is_empty() {
            return Err(DefinitionError::NoTransitions);
        }

        Ok(StateMachineSpec {
            field: self.field,
            states: self.states,
            transitions: self.transitions,
        })
    }

    /// Check target and sources against the declared states, reporting
    /// every undeclared one rather than the first.
    fn check_declared(&self, definition: &TransitionDefinition<E>) -> Result<(), DefinitionError> {
        let mut checks: Vec<Validation<(), NonEmptyVec<String>>> = Vec::new();

        for state in std::iter::once(definition.to()).chain(definition.from()) {
            let check = if self.states.contains(state) {
                Validation::success(())
            } else {
                Validation::fail(state.name().to_string())
            };
            checks.push(check);
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(undeclared) => {
                let mut states: Vec<String> = Vec::new();
                for name in undeclared.iter() {
                    if !states.contains(name) {
                        states.push(name.clone());
                    }
                }
                Err(DefinitionError::UndeclaredStates {
                    transition: definition.name().to_string(),
                    field: self.field.clone(),
                    states,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Status {
        Created,
        Enrolled,
        Suspended,
        Terminated,
        Archived,
    }

    impl State for Status {
        fn name(&self) -> &str {
            match self {
                Self::Created => "created",
                Self::Enrolled => "enrolled",
                Self::Suspended => "suspended",
                Self::Terminated => "terminated",
                Self::Archived => "archived",
            }
        }
    }

    struct Member;

    impl Entity for Member {
        type State = Status;
        const TYPE: &'static str = "member";

        fn id(&self) -> String {
            "1".to_string()
        }
    }

    fn declared() -> Vec<Status> {
        vec![
            Status::Created,
            Status::Enrolled,
            Status::Suspended,
            Status::Terminated,
        ]
    }

    #[test]
    fn builder_requires_transitions() {
        let result = StateMachineBuilder::<Member>::new("status", declared()).build();

        assert!(matches!(result, Err(DefinitionError::NoTransitions)));
    }

    #[test]
    fn define_registers_transition() {
        let spec = StateMachineBuilder::<Member>::new("status", declared())
            .define(
                TransitionBuilder::new("reactivate")
                    .from([Status::Suspended, Status::Terminated])
                    .to(Status::Enrolled)
                    .timestamp()
                    .guard(Guard::new(|_: &Member| true)),
            )
            .unwrap()
            .build()
            .unwrap();

        let definition = spec.lookup("reactivate").unwrap();
        assert_eq!(definition.to(), &Status::Enrolled);
        assert_eq!(spec.field(), "status");
        assert_eq!(spec.entity_type(), "member");
    }

    #[test]
    fn undeclared_target_is_rejected() {
        let result = StateMachineBuilder::<Member>::new("status", declared()).define(
            TransitionBuilder::new("archive")
                .from([Status::Terminated])
                .to(Status::Archived),
        );

        assert_eq!(
            result.err(),
            Some(DefinitionError::UndeclaredStates {
                transition: "archive".to_string(),
                field: "status".to_string(),
                states: vec!["archived".to_string()],
            })
        );
    }

    #[test]
    fn every_undeclared_state_is_reported() {
        let result = StateMachineBuilder::<Member>::new("status", [Status::Created]).define(
            TransitionBuilder::new("reactivate")
                .from([Status::Suspended, Status::Terminated])
                .to(Status::Enrolled),
        );

        match result {
            Err(DefinitionError::UndeclaredStates { states, .. }) => {
                assert_eq!(states, vec!["enrolled", "suspended", "terminated"]);
            }
            Err(other) => panic!("Expected UndeclaredStates, got {other}"),
            Ok(_) => panic!("Expected UndeclaredStates, got a builder"),
        }
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let result = StateMachineBuilder::<Member>::new("status", declared())
            .define(
                TransitionBuilder::new("enroll")
                    .from([Status::Created])
                    .to(Status::Enrolled),
            )
            .unwrap()
            .define(
                TransitionBuilder::new("enroll")
                    .from([Status::Suspended])
                    .to(Status::Enrolled),
            );

        assert_eq!(
            result.err(),
            Some(DefinitionError::DuplicateTransition("enroll".to_string()))
        );
    }

    #[test]
    fn unknown_lookup_names_entity_type() {
        let spec = StateMachineBuilder::<Member>::new("status", declared())
            .define(
                TransitionBuilder::new("enroll")
                    .from([Status::Created])
                    .to(Status::Enrolled),
            )
            .unwrap()
            .build()
            .unwrap();

        let err = spec.lookup("promote").unwrap_err();
        assert_eq!(err.to_string(), "member has no transition named 'promote'");
    }
}
