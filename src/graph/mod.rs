//! Graph rendering for schemas.
//!
//! A schema whose state and event types are [`Labelable`] can be turned
//! into a [`Graph`] by probing the transition function over every
//! `(state, event)` pair of the exhaustive enumerations. Node ids are
//! assigned deterministically: `0` is the synthetic start node and states
//! get `1..=N` in enumeration order. Edges are grouped by source state and
//! then by event, both in enumeration order.
//!
//! # Example
//!
//! ```rust
//! use statewise::core::{Schema, Transition};
//! use statewise::labelable_enum;
//!
//! labelable_enum! {
//!     enum Switch { Off => "off", On => "on" }
//! }
//!
//! labelable_enum! {
//!     enum Flip { Toggle => "toggle" }
//! }
//!
//! let schema: Schema<Switch, Flip> = Schema::new(Switch::Off, |state, _| match state {
//!     Switch::Off => Some(Transition::to(Switch::On)),
//!     Switch::On => Some(Transition::to(Switch::Off)),
//! });
//!
//! let dot = schema.render_dot();
//! assert!(dot.contains("    1 -> 2 [label=\"toggle\"]\n"));
//! assert!(dot.contains("    2 -> 1 [label=\"toggle\"]\n"));
//! ```

mod dot;

pub use dot::escape_label;

use crate::core::{Labelable, Schema};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A state node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node id; states start at `1`
    pub id: usize,
    /// Unescaped state label
    pub label: String,
}

/// A labeled transition edge between two state nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Id of the source state node
    pub from: usize,
    /// Id of the target state node
    pub to: usize,
    /// Unescaped event label
    pub label: String,
}

/// Static picture of a schema's transition function.
///
/// Labels are stored unescaped; escaping happens when writing DOT.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// State nodes in enumeration order, ids `1..=N`
    pub nodes: Vec<Node>,
    /// Node the synthetic start edge points at
    pub initial: Option<usize>,
    /// Defined transitions, grouped by source state then event
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Id of the synthetic start node.
    pub const START: usize = 0;

    /// Derive the graph of `schema`.
    ///
    /// Evaluates the transition function `|S| x |E|` times. A state that the
    /// function returns but the enumeration omits has no node, so edges into
    /// it are dropped with a warning.
    pub fn from_schema<S, E, T>(schema: &Schema<S, E, T>) -> Self
    where
        S: Labelable + PartialEq,
        E: Labelable,
    {
        let states = S::all_values();
        let events = E::all_values();
        let node_id = |state: &S| {
            states
                .iter()
                .position(|candidate| candidate == state)
                .map(|index| index + 1)
        };

        let nodes = states
            .iter()
            .enumerate()
            .map(|(index, state)| Node {
                id: index + 1,
                label: state.label(),
            })
            .collect();

        let initial = node_id(schema.initial_state());
        if initial.is_none() {
            warn!(
                state = %schema.initial_state().label(),
                "initial state missing from enumeration; start edge omitted"
            );
        }

        let mut edges = Vec::new();
        for (index, state) in states.iter().enumerate() {
            for event in &events {
                let Some(target) = schema.target(state, event) else {
                    continue;
                };
                match node_id(&target) {
                    Some(to) => edges.push(Edge {
                        from: index + 1,
                        to,
                        label: event.label(),
                    }),
                    None => warn!(
                        from = %state.label(),
                        event = %event.label(),
                        to = %target.label(),
                        "target state missing from enumeration; edge omitted"
                    ),
                }
            }
        }

        Self {
            nodes,
            initial,
            edges,
        }
    }

    /// Render as DOT text.
    pub fn to_dot(&self) -> String {
        dot::write_dot(self)
    }

    /// Serialize as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<S, E, T> Schema<S, E, T>
where
    S: Labelable + PartialEq,
    E: Labelable,
{
    /// Derive the graph of this schema.
    pub fn graph(&self) -> Graph {
        Graph::from_schema(self)
    }

    /// Render this schema as a DOT digraph.
    pub fn render_dot(&self) -> String {
        self.graph().to_dot()
    }
}
