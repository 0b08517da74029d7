//! Waypoint: declarative state transitions for persisted entities
//!
//! Waypoint manages one state field per entity type. Transitions are named
//! edges from a set of source states to a target state, optionally guarded,
//! optionally stamping a timestamp field and optionally running a
//! post-action. Each transition runs inside a single store transaction and
//! reports exactly one outcome to a telemetry sink.
//!
//! # Core Concepts
//!
//! - **State / Entity**: the state type and the record that carries it
//! - **Guards**: read-only predicates bound to the entity
//! - **Spec**: the frozen table of transitions for an entity type
//! - **StateMachine**: validates, writes, commits and publishes
//! - **Store / TelemetrySink**: the persistence and telemetry capabilities
//!   the engine consumes
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waypoint::builder::{StateMachineBuilder, TransitionBuilder};
//! use waypoint::core::{Entity, Guard};
//! use waypoint::engine::StateMachine;
//! use waypoint::state_enum;
//! use waypoint::store::{Fields, MemoryStore, Record};
//! use waypoint::telemetry::RecordingSink;
//!
//! state_enum! {
//!     pub enum MemberStatus {
//!         Created => "created",
//!         Enrolled => "enrolled",
//!         Suspended => "suspended",
//!         Terminated => "terminated",
//!     }
//! }
//!
//! struct Member {
//!     id: u64,
//!     dues_paid: bool,
//!     fields: Fields<MemberStatus>,
//! }
//!
//! impl Member {
//!     fn is_eligible(&self) -> bool {
//!         self.dues_paid
//!     }
//! }
//!
//! impl Entity for Member {
//!     type State = MemberStatus;
//!     const TYPE: &'static str = "member";
//!
//!     fn id(&self) -> String {
//!         self.id.to_string()
//!     }
//! }
//!
//! impl Record for Member {
//!     fn fields(&self) -> &Fields<MemberStatus> {
//!         &self.fields
//!     }
//!
//!     fn fields_mut(&mut self) -> &mut Fields<MemberStatus> {
//!         &mut self.fields
//!     }
//! }
//!
//! let spec = StateMachineBuilder::<Member>::new("status", MemberStatus::all())
//!     .define(
//!         TransitionBuilder::new("reactivate")
//!             .from([MemberStatus::Suspended, MemberStatus::Terminated])
//!             .to(MemberStatus::Enrolled)
//!             .timestamp()
//!             .guard(Guard::named("eligible?", Member::is_eligible)),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let sink = Arc::new(RecordingSink::new());
//! let machine = StateMachine::new(Arc::new(spec), MemoryStore::new(), sink.clone());
//!
//! let mut member = Member {
//!     id: 1,
//!     dues_paid: true,
//!     fields: Fields::with_state("status", MemberStatus::Suspended),
//! };
//!
//! assert!(machine.can_transition(&member, "reactivate").unwrap());
//! machine.execute(&mut member, "reactivate").unwrap();
//!
//! assert_eq!(machine.current_state(&member), Some(MemberStatus::Enrolled));
//! assert!(member.fields.timestamp("enrolled_at").is_some());
//! assert_eq!(sink.names(), vec!["member.reactivate.success"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use builder::{DefinitionError, StateMachineBuilder, TransitionBuilder};
pub use config::{ConcurrencyPolicy, ExecutorConfig};
pub use crate::core::{Action, Entity, Guard, State, StateChange};
pub use engine::{Error, StateMachine, StateMachineSpec, TransitionError, UnknownTransition};
pub use store::{MemoryStore, Store};
pub use telemetry::{Outcome, TelemetrySink, TransitionOutcome};
