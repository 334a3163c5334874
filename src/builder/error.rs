//! Build errors for schema, rule and machine builders.

use thiserror::Error;

/// Errors that can occur when building schemas, rules and machines.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Call .transition_fn(f) or add at least one rule")]
    NoTransitions,

    #[error("Both a transition function and rules were supplied. Use one or the other")]
    AmbiguousTransitions,

    #[error("Rule source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Rule event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Rule target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Duplicate rule for event {event} in state {from}")]
    DuplicateRule { from: String, event: String },

    #[error("Schema not specified. Call .schema(schema) before .build()")]
    MissingSchema,

    #[error("Subject not specified. Call .subject(&subject) or .weak_subject(weak)")]
    MissingSubject,
}
