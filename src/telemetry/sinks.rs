//! Telemetry sinks shipped with the crate.

use super::{TelemetrySink, TransitionOutcome};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Forwards every published outcome as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn emit(&self, event_name: &str, payload: &Value) {
        info!(target: "waypoint::telemetry", event = event_name, %payload, "transition outcome");
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TelemetrySink for NullSink {
    fn emit(&self, _event_name: &str, _payload: &Value) {}
}

/// One emitted event as captured by [`RecordingSink`].
#[derive(Clone, Debug, PartialEq)]
pub struct PublishedEvent {
    pub name: String,
    pub payload: Value,
}

impl PublishedEvent {
    /// Decode the payload back into an outcome.
    pub fn outcome(&self) -> Option<TransitionOutcome> {
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Keeps every emitted event in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<PublishedEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PublishedEvent> {
        self.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // a panicking reader must not stop later events from being recorded
    fn lock(&self) -> MutexGuard<'_, Vec<PublishedEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TelemetrySink for RecordingSink {
    fn emit(&self, event_name: &str, payload: &Value) {
        self.lock().push(PublishedEvent {
            name: event_name.to_string(),
            payload: payload.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Outcome;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();

        sink.emit("member.enroll.success", &Value::Null);
        sink.emit("member.suspend.invalid", &Value::Null);

        assert_eq!(
            sink.names(),
            vec!["member.enroll.success", "member.suspend.invalid"]
        );
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn published_event_decodes_outcome() {
        let sink = RecordingSink::new();
        let outcome = TransitionOutcome::new(
            Outcome::Failed,
            "member",
            "9",
            "reactivate",
            Some("suspended"),
            "enrolled",
        );

        sink.emit("member.reactivate.failed", &serde_json::to_value(&outcome).unwrap());

        let decoded = sink.events()[0].outcome().unwrap();
        assert_eq!(decoded, outcome);
    }

    #[test]
    fn closures_are_sinks() {
        let seen = Mutex::new(Vec::new());
        let sink = |name: &str, _: &Value| seen.lock().unwrap().push(name.to_string());

        sink.emit("account.close.success", &Value::Null);

        assert_eq!(seen.into_inner().unwrap(), vec!["account.close.success"]);
    }
}
