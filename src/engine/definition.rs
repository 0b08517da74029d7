//! Transition definitions.

use crate::core::{Action, Entity, Guard, State};

/// Which timestamp field, if any, a transition stamps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TimestampPolicy {
    #[default]
    None,
    /// Named after the target state: `<to><suffix>`, e.g. `enrolled_at`.
    Auto,
    /// An explicit field name.
    Field(String),
}

impl TimestampPolicy {
    /// Resolve the field to stamp for a given target state.
    pub fn resolve<S: State>(&self, to: &S, suffix: &str) -> Option<String> {
        match self {
            Self::None => None,
            Self::Auto => Some(format!("{}{}", to.name(), suffix)),
            Self::Field(field) => Some(field.clone()),
        }
    }
}

/// A named edge from a set of source states to one target state.
///
/// Built through [`TransitionBuilder`](crate::builder::TransitionBuilder)
/// and validated when registered on a
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
pub struct TransitionDefinition<E: Entity> {
    pub(crate) name: String,
    pub(crate) to: E::State,
    pub(crate) from: Vec<E::State>,
    pub(crate) timestamp: TimestampPolicy,
    pub(crate) guard: Option<Guard<E>>,
    pub(crate) after: Option<Action<E>>,
}

impl<E: Entity> TransitionDefinition<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn to(&self) -> &E::State {
        &self.to
    }

    pub fn from(&self) -> &[E::State] {
        &self.from
    }

    pub fn timestamp(&self) -> &TimestampPolicy {
        &self.timestamp
    }

    pub fn guard(&self) -> Option<&Guard<E>> {
        self.guard.as_ref()
    }

    pub fn after(&self) -> Option<&Action<E>> {
        self.after.as_ref()
    }

    /// Whether `current` is one of the allowed source states (pure).
    pub fn permits(&self, current: &E::State) -> bool {
        self.from.contains(current)
    }
}

impl<E: Entity> Clone for TransitionDefinition<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            to: self.to.clone(),
            from: self.from.clone(),
            timestamp: self.timestamp.clone(),
            guard: self.guard.clone(),
            after: self.after.clone(),
        }
    }
}

impl<E: Entity> std::fmt::Debug for TransitionDefinition<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDefinition")
            .field("name", &self.name)
            .field("to", &self.to)
            .field("from", &self.from)
            .field("timestamp", &self.timestamp)
            .field("guard", &self.guard)
            .field("after", &self.after)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Status {
        Suspended,
        Enrolled,
    }

    impl State for Status {
        fn name(&self) -> &str {
            match self {
                Self::Suspended => "suspended",
                Self::Enrolled => "enrolled",
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

    #[test]
    fn auto_policy_is_named_after_target() {
        assert_eq!(
            TimestampPolicy::Auto.resolve(&Status::Enrolled, "_at"),
            Some("enrolled_at".to_string())
        );
        assert_eq!(
            TimestampPolicy::Auto.resolve(&Status::Enrolled, "_on"),
            Some("enrolled_on".to_string())
        );
    }

    #[test]
    fn explicit_and_missing_policies() {
        let explicit = TimestampPolicy::Field("reinstated_at".to_string());

        assert_eq!(
            explicit.resolve(&Status::Enrolled, "_at"),
            Some("reinstated_at".to_string())
        );
        assert_eq!(TimestampPolicy::None.resolve(&Status::Enrolled, "_at"), None);
    }

    #[test]
    fn permits_checks_source_membership() {
        let definition: TransitionDefinition<Member> = TransitionDefinition {
            name: "reactivate".to_string(),
            to: Status::Enrolled,
            from: vec![Status::Suspended],
            timestamp: TimestampPolicy::None,
            guard: None,
            after: None,
        };

        assert!(definition.permits(&Status::Suspended));
        assert!(!definition.permits(&Status::Enrolled));
    }
}
