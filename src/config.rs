//! Executor configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a usable configuration.

use serde::{Deserialize, Serialize};

/// How the executor guards against two transitions racing on one entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcurrencyPolicy {
    /// Re-read the committed state inside the transaction and abort with a
    /// conflict if it no longer matches the state that was validated.
    #[default]
    Optimistic,

    /// Rely on the store's transaction isolation level alone.
    Isolation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Joins entity type, transition name and outcome into an event name.
    pub event_separator: String,

    /// Appended to the target state's token for automatic timestamp fields.
    pub timestamp_suffix: String,

    pub concurrency: ConcurrencyPolicy,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            event_separator: ".".to_string(),
            timestamp_suffix: "_at".to_string(),
            concurrency: ConcurrencyPolicy::default(),
        }
    }
}

impl ExecutorConfig {
    /// Parse a configuration from JSON, filling in defaults for missing keys.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
