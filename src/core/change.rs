//! Record of a committed state change.

use super::state::State;
use chrono::{DateTime, Utc};

/// Record of a single committed transition.
///
/// Returned by [`StateMachine::execute`](crate::engine::StateMachine::execute)
/// once the store transaction has committed.
#[derive(Clone, Debug, PartialEq)]
pub struct StateChange<S: State> {
    /// The state the entity was validated in
    pub from: S,
    /// The state that was written
    pub to: S,
    /// Name of the transition that ran
    pub event: String,
    /// When the state was written
    pub timestamp: DateTime<Utc>,
    /// Timestamp field stamped with `timestamp`, if the transition has one
    pub timestamp_field: Option<String>,
}

impl<S: State> StateChange<S> {
    /// Whether the transition left the state unchanged (a self-loop).
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    enum Phase {
        Draft,
        Published,
    }

    impl State for Phase {
        fn name(&self) -> &str {
            match self {
                Self::Draft => "draft",
                Self::Published => "published",
            }
        }
    }

    #[test]
    fn self_loop_is_detected() {
        let change = StateChange {
            from: Phase::Draft,
            to: Phase::Draft,
            event: "touch".to_string(),
            timestamp: Utc::now(),
            timestamp_field: None,
        };

        assert!(change.is_self_loop());
    }

    #[test]
    fn forward_change_is_not_a_self_loop() {
        let change = StateChange {
            from: Phase::Draft,
            to: Phase::Published,
            event: "publish".to_string(),
            timestamp: Utc::now(),
            timestamp_field: Some("published_at".to_string()),
        };

        assert!(!change.is_self_loop());
        assert_eq!(change.timestamp_field.as_deref(), Some("published_at"));
    }
}
