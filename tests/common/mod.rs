//! Shared member fixture for integration tests.
#![allow(dead_code)]

use std::cell::Cell;
use std::sync::Arc;
use waypoint::builder::{StateMachineBuilder, TransitionBuilder};
use waypoint::core::{Action, ActionError, Entity, Guard};
use waypoint::engine::{StateMachine, StateMachineSpec};
use waypoint::state_enum;
use waypoint::store::{Fields, MemoryStore, Record};
use waypoint::telemetry::RecordingSink;
use waypoint::ExecutorConfig;

state_enum! {
    pub enum MemberStatus {
        Created => "created",
        Enrolled => "enrolled",
        Suspended => "suspended",
        Terminated => "terminated",
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mailer is down")]
pub struct MailerDown;

#[derive(Debug)]
pub struct Member {
    pub id: u64,
    pub eligible: bool,
    pub mailer_down: bool,
    pub farewell_sent: bool,
    pub guard_calls: Cell<usize>,
    pub fields: Fields<MemberStatus>,
}

impl Member {
    pub fn new(id: u64, status: MemberStatus) -> Self {
        Self {
            id,
            eligible: true,
            mailer_down: false,
            farewell_sent: false,
            guard_calls: Cell::new(0),
            fields: Fields::with_state("status", status),
        }
    }

    pub fn without_state(id: u64) -> Self {
        Self {
            fields: Fields::new(),
            ..Self::new(id, MemberStatus::Created)
        }
    }

    pub fn ineligible(mut self) -> Self {
        self.eligible = false;
        self
    }

    pub fn status(&self) -> Option<MemberStatus> {
        self.fields.state("status").copied()
    }

    fn is_eligible(&self) -> bool {
        self.guard_calls.set(self.guard_calls.get() + 1);
        self.eligible
    }

    fn send_farewell(&mut self) -> Result<(), ActionError> {
        if self.mailer_down {
            return Err(Box::new(MailerDown));
        }
        self.farewell_sent = true;
        Ok(())
    }
}

impl Entity for Member {
    type State = MemberStatus;
    const TYPE: &'static str = "member";

    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl Record for Member {
    fn fields(&self) -> &Fields<MemberStatus> {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut Fields<MemberStatus> {
        &mut self.fields
    }
}

pub const TRANSITIONS: [&str; 4] = ["enroll", "reactivate", "suspend", "terminate"];

/// enroll: created -> enrolled, stamps enrolled_at
/// suspend: enrolled -> suspended, stamps suspended_on
/// reactivate: suspended | terminated -> enrolled, stamps enrolled_at, guarded by eligible?
/// terminate: created | enrolled | suspended -> terminated, sends a farewell afterwards
pub fn member_spec() -> StateMachineSpec<Member> {
    StateMachineBuilder::new("status", MemberStatus::all())
        .define(
            TransitionBuilder::new("enroll")
                .from([MemberStatus::Created])
                .to(MemberStatus::Enrolled)
                .timestamp(),
        )
        .and_then(|b| {
            b.define(
                TransitionBuilder::new("suspend")
                    .from([MemberStatus::Enrolled])
                    .to(MemberStatus::Suspended)
                    .timestamp_field("suspended_on"),
            )
        })
        .and_then(|b| {
            b.define(
                TransitionBuilder::new("reactivate")
                    .from([MemberStatus::Suspended, MemberStatus::Terminated])
                    .to(MemberStatus::Enrolled)
                    .timestamp()
                    .guard(Guard::named("eligible?", Member::is_eligible)),
            )
        })
        .and_then(|b| {
            b.define(
                TransitionBuilder::new("terminate")
                    .from([
                        MemberStatus::Created,
                        MemberStatus::Enrolled,
                        MemberStatus::Suspended,
                    ])
                    .to(MemberStatus::Terminated)
                    .after(Action::named("send_farewell", Member::send_farewell)),
            )
        })
        .and_then(|b| b.build())
        .expect("member spec is valid")
}

pub type MemberMachine = StateMachine<Member, Arc<MemoryStore<Member>>>;

pub struct Harness {
    pub machine: MemberMachine,
    pub store: Arc<MemoryStore<Member>>,
    pub sink: Arc<RecordingSink>,
}

pub fn harness() -> Harness {
    harness_with(MemoryStore::new(), ExecutorConfig::default())
}

pub fn harness_with(store: MemoryStore<Member>, config: ExecutorConfig) -> Harness {
    let store = Arc::new(store);
    let sink = Arc::new(RecordingSink::new());
    let machine = StateMachine::with_config(
        Arc::new(member_spec()),
        Arc::clone(&store),
        sink.clone(),
        config,
    );
    Harness {
        machine,
        store,
        sink,
    }
}
