//! Core data types.
//!
//! This module contains the pure part of the crate:
//! - The `Labelable` capability for closed sets of values
//! - Immutable schemas and the transitions they produce
//! - Bounded in-memory transition history
//!
//! Nothing in this module mutates shared state; the runtime lives in
//! [`crate::machine`].

mod history;
mod label;
mod schema;

pub use history::{TransitionHistory, TransitionRecord};
pub use label::Labelable;
pub use schema::{Action, Schema, Transition, TransitionFn};
