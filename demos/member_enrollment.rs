//! Member Enrollment
//!
//! This example walks a club member through its lifecycle.
//!
//! Key concepts:
//! - Member states (Created -> Enrolled <-> Suspended -> Terminated)
//! - A named guard on reactivation
//! - Automatic and explicit timestamp fields
//! - A post-action that fails and rolls the transition back
//! - Outcomes published as tracing events
//!
//! Run with: RUST_LOG=debug cargo run --example member_enrollment

use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use waypoint::builder::{transition, StateMachineBuilder};
use waypoint::core::{Action, ActionError, Entity, Guard};
use waypoint::engine::StateMachine;
use waypoint::state_enum;
use waypoint::store::{Fields, MemoryStore, Record};
use waypoint::telemetry::TracingSink;
use waypoint::DefinitionError;

state_enum! {
    enum MemberStatus {
        Created => "created",
        Enrolled => "enrolled",
        Suspended => "suspended",
        Terminated => "terminated",
    }
}

struct Member {
    id: u64,
    dues_owed: u32,
    email: Option<String>,
    fields: Fields<MemberStatus>,
}

impl Member {
    fn new(id: u64, email: Option<&str>) -> Self {
        Self {
            id,
            dues_owed: 0,
            email: email.map(str::to_string),
            fields: Fields::with_state("status", MemberStatus::Created),
        }
    }

    // Pure guard
    fn is_in_good_standing(&self) -> bool {
        self.dues_owed == 0
    }

    // Post-action
    fn send_farewell(&mut self) -> Result<(), ActionError> {
        match &self.email {
            Some(address) => {
                println!("  [mail] farewell sent to {address}");
                Ok(())
            }
            None => Err(format!("member {} has no email address", self.id).into()),
        }
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

fn machine() -> Result<StateMachine<Member, MemoryStore<Member>>, DefinitionError> {
    use MemberStatus::*;

    let spec = StateMachineBuilder::<Member>::new("status", MemberStatus::all())
        .define(transition("enroll", [Created], Enrolled).timestamp())?
        .define(transition("suspend", [Enrolled], Suspended).timestamp_field("suspended_on"))?
        .define(
            transition("reactivate", [Suspended, Terminated], Enrolled)
                .timestamp()
                .guard(Guard::named("good standing", Member::is_in_good_standing)),
        )?
        .define(
            transition("terminate", [Created, Enrolled, Suspended], Terminated)
                .after(Action::named("send_farewell", Member::send_farewell)),
        )?
        .build()?;

    Ok(StateMachine::new(
        Arc::new(spec),
        MemoryStore::new(),
        Arc::new(TracingSink),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .without_time()
        .init();

    println!("=== Member Enrollment Example ===\n");

    let machine = machine()?;
    println!(
        "Transitions: {:?}\n",
        machine
            .spec()
            .transitions()
            .map(|t| t.name())
            .collect::<Vec<_>>()
    );

    // Scenario 1: enroll and suspend
    println!("Scenario 1: Enroll, then suspend");
    let mut alice = Member::new(1001, Some("alice@example.org"));
    machine.execute(&mut alice, "enroll")?;
    machine.execute(&mut alice, "suspend")?;
    println!(
        "  status = {:?}, suspended_on = {:?}\n",
        machine.current_state(&alice),
        alice.fields.timestamp("suspended_on")
    );

    // Scenario 2: guard refuses reactivation while dues are owed
    println!("Scenario 2: Reactivate with dues owed");
    alice.dues_owed = 40;
    println!("  permitted: {:?}", machine.permitted_transitions(&alice));
    if let Err(err) = machine.execute(&mut alice, "reactivate") {
        println!("  ✗ {err}");
    }
    alice.dues_owed = 0;
    machine.execute(&mut alice, "reactivate")?;
    println!("  ✓ status = {:?}\n", machine.current_state(&alice));

    // Scenario 3: post-action failure rolls back
    println!("Scenario 3: Terminate without an email address");
    let mut bob = Member::new(1002, None);
    machine.execute(&mut bob, "enroll")?;
    if let Err(err) = machine.execute(&mut bob, "terminate") {
        println!("  ✗ {err}");
    }
    println!(
        "  status after rollback = {:?} ({} rollback)\n",
        machine.current_state(&bob),
        machine.store().rollbacks()
    );

    // Scenario 4: unknown transition
    println!("Scenario 4: Unknown transition");
    if let Err(err) = machine.execute(&mut bob, "promote") {
        println!("  ✗ {err}");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
