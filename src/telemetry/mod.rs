//! Outcome publication.
//!
//! Every `execute` call publishes exactly one [`TransitionOutcome`] through
//! a [`Publisher`], after the store transaction has closed. Publication is
//! fire and forget: nothing a sink does can change the transition result.
//!
//! # Event names
//!
//! Names join the entity type, transition name and outcome with the
//! configured separator, e.g. `member.reactivate.success`.

mod outcome;
mod sinks;

pub use outcome::{Outcome, TransitionOutcome};
pub use sinks::{NullSink, PublishedEvent, RecordingSink, TracingSink};

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Receiver of published outcomes.
///
/// Delivery is best effort. Sinks handle their own failures; there is no
/// return value for the executor to act on. A panicking sink is caught and
/// logged by the [`Publisher`], never propagated to the caller.
pub trait TelemetrySink: Send + Sync {
    fn emit(&self, event_name: &str, payload: &Value);
}

impl<F> TelemetrySink for F
where
    F: Fn(&str, &Value) + Send + Sync,
{
    fn emit(&self, event_name: &str, payload: &Value) {
        self(event_name, payload)
    }
}

/// Builds event names and payloads and hands them to a sink.
#[derive(Clone)]
pub struct Publisher {
    sink: Arc<dyn TelemetrySink>,
    separator: String,
}

impl Publisher {
    pub fn new(sink: Arc<dyn TelemetrySink>, separator: impl Into<String>) -> Self {
        Self {
            sink,
            separator: separator.into(),
        }
    }

    pub fn event_name(&self, outcome: &TransitionOutcome) -> String {
        [
            outcome.entity_type.as_str(),
            outcome.event.as_str(),
            outcome.outcome.as_str(),
        ]
        .join(&self.separator)
    }

    pub fn publish(&self, outcome: &TransitionOutcome) {
        let name = self.event_name(outcome);
        let payload = match serde_json::to_value(outcome) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(event = %name, error = %err, "dropping unserializable transition outcome");
                return;
            }
        };
        let delivered = panic::catch_unwind(AssertUnwindSafe(|| self.sink.emit(&name, &payload)));
        if delivered.is_err() {
            warn!(event = %name, "telemetry sink panicked, outcome dropped");
        }
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}
