//! Published classification of a transition attempt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How a transition attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// State written and committed
    Success,
    /// Rejected by the store, the post-action or a concurrency check; rolled back
    Failed,
    /// Current state missing or not a source state, or the guard refused
    Invalid,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload published once per transition attempt.
///
/// States are carried as their tokens so the payload does not depend on
/// the entity's state type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    /// Unique id of this publication
    pub id: Uuid,
    pub outcome: Outcome,
    pub entity_type: String,
    pub entity_id: String,
    /// State before the attempt, absent when the state field was unset
    pub from: Option<String>,
    pub to: String,
    /// Transition name
    pub event: String,
    pub timestamp: DateTime<Utc>,
}

impl TransitionOutcome {
    pub fn new(
        outcome: Outcome,
        entity_type: &str,
        entity_id: &str,
        event: &str,
        from: Option<&str>,
        to: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            from: from.map(str::to_string),
            to: to.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        }
    }
}
