//! Statewise: schema-driven finite state machines
//!
//! A [`Schema`] declares, for a closed set of states and a closed set of
//! events, a pure transition function yielding the next state plus an
//! optional action. A [`Machine`] drives that function from an event stream,
//! keeping its current state, a weakly referenced subject and two
//! notification callbacks consistent, optionally on a serial execution
//! context. Schemas over [`Labelable`] types render to DOT.
//!
//! # Core Concepts
//!
//! - **Schema**: immutable initial state plus transition function
//! - **Machine**: mutable runtime with re-entrant `handle_event`
//! - **Executor**: where dispatch runs (`Immediate` or `SerialQueue`)
//! - **Graph**: DOT or JSON picture of a schema
//!
//! # Example
//!
//! ```rust
//! use statewise::labelable_enum;
//! use statewise::{Machine, Schema, Transition};
//!
//! labelable_enum! {
//!     enum Number { One => "one", Two => "two", Three => "three" }
//! }
//!
//! labelable_enum! {
//!     enum Step { Increment => "increment", Decrement => "decrement" }
//! }
//!
//! let schema: Schema<Number, Step> = Schema::new(Number::One, |state, step| {
//!     match (state, step) {
//!         (Number::One, Step::Increment) => Some(Transition::to(Number::Two)),
//!         (Number::Two, Step::Increment) => Some(Transition::to(Number::Three)),
//!         (Number::Two, Step::Decrement) => Some(Transition::to(Number::One)),
//!         (Number::Three, Step::Decrement) => Some(Transition::to(Number::Two)),
//!         _ => None,
//!     }
//! });
//!
//! let machine = Machine::detached(schema.clone(), None);
//! machine.handle_event(Step::Increment);
//! assert_eq!(machine.current_state(), Number::Two);
//!
//! assert!(schema.render_dot().contains("2 -> 3 [label=\"increment\"]"));
//! ```

pub mod builder;
pub mod core;
pub mod executor;
pub mod graph;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{BuildError, MachineBuilder, RuleBuilder, SchemaBuilder};
pub use crate::core::{Labelable, Schema, Transition, TransitionHistory, TransitionRecord};
pub use crate::executor::{Executor, Immediate, SerialQueue};
pub use crate::graph::Graph;
pub use crate::machine::Machine;
