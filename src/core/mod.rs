//! Core types shared by the registry, executor and stores.
//!
//! This module contains:
//! - State values via the `State` trait
//! - Entities via the `Entity` trait
//! - Guard predicates and post-transition actions
//! - The record of a committed state change
//!
//! Nothing in here touches persistence or telemetry.

mod action;
mod change;
mod entity;
pub mod guard;
mod state;

pub use action::{Action, ActionError};
pub use change::StateChange;
pub use entity::Entity;
pub use guard::Guard;
pub use state::State;

pub(crate) use state::label;
