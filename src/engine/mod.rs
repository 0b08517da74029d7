//! Transition registry and executor.
//!
//! This module is the imperative shell around the core types: it looks up
//! transitions, validates them, drives the store transaction and publishes
//! outcomes.
//!
//! # Key Concepts
//!
//! - **Definitions**: named edges with source states, target, timestamp
//!   policy, guard and post-action
//! - **Spec**: the frozen table of definitions for one entity type
//! - **StateMachine**: executes definitions against entities through a store

mod definition;
mod error;
mod executor;
mod spec;

pub use definition::{TimestampPolicy, TransitionDefinition};
pub use error::{Error, Rejection, TransitionError, UnknownTransition};
pub use executor::{ExecuteError, StateMachine};
pub use spec::StateMachineSpec;
