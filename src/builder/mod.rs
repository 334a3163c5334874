//! Builder API for ergonomic schema and machine construction.
//!
//! This module provides fluent builders and macros for declaring schemas,
//! rule tables and machines with minimal boilerplate. Builders are where
//! construction errors surface; everything they produce can also be made
//! directly with [`Schema::new`] and [`Machine::new`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod rule;
pub mod schema;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use rule::{Rule, RuleAction, RuleBuilder};
pub use schema::SchemaBuilder;

use crate::core::Schema;
use crate::machine::Machine;
use std::fmt::Debug;

/// Build a schema from `(from, event, to)` triples with no actions.
///
/// # Example
///
/// ```
/// use statewise::builder::table_schema;
/// use statewise::core::Schema;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Phase { Idle, Busy }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Job { Start, Finish }
///
/// let schema: Schema<Phase, Job> = table_schema(
///     Phase::Idle,
///     [(Phase::Idle, Job::Start, Phase::Busy), (Phase::Busy, Job::Finish, Phase::Idle)],
/// )
/// .unwrap();
///
/// assert_eq!(schema.target(&Phase::Idle, &Job::Start), Some(Phase::Busy));
/// ```
pub fn table_schema<S, E, T, I>(initial: S, table: I) -> Result<Schema<S, E, T>, BuildError>
where
    S: Clone + PartialEq + Debug + Send + Sync + 'static,
    E: PartialEq + Debug + Send + Sync + 'static,
    T: 'static,
    I: IntoIterator<Item = (S, E, S)>,
{
    table
        .into_iter()
        .try_fold(SchemaBuilder::new().initial(initial), |builder, (from, on, to)| {
            builder.rule(RuleBuilder::new().from(from).on(on).to(to))
        })?
        .build()
}

/// Create a subject-less machine from a triple table.
pub fn table_machine<S, E, I>(initial: S, table: I) -> Result<Machine<S, E>, BuildError>
where
    S: Clone + PartialEq + Debug + Send + Sync + 'static,
    E: Clone + PartialEq + Debug + Send + Sync + 'static,
    I: IntoIterator<Item = (S, E, S)>,
{
    let schema = table_schema(initial, table)?;
    Ok(Machine::detached(schema, None))
}
