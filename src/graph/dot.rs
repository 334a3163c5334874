//! DOT text output.

use super::Graph;

/// Escape a label for embedding in a double-quoted DOT string.
///
/// Only double quotes are escaped.
pub fn escape_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

/// Write `graph` in the crate's fixed digraph layout.
pub(crate) fn write_dot(graph: &Graph) -> String {
    let mut dot = String::from("digraph {\n    graph [rankdir=LR]\n\n");

    dot.push_str(&format!(
        "    {} [label=\"\", shape=plaintext]\n",
        Graph::START
    ));
    if let Some(initial) = graph.initial {
        dot.push_str(&format!(
            "    {} -> {initial} [label=\"START\"]\n",
            Graph::START
        ));
    }
    dot.push('\n');

    for node in &graph.nodes {
        dot.push_str(&format!(
            "    {} [label=\"{}\"]\n",
            node.id,
            escape_label(&node.label)
        ));
    }
    dot.push('\n');

    for edge in &graph.edges {
        dot.push_str(&format!(
            "    {} -> {} [label=\"{}\"]\n",
            edge.from,
            edge.to,
            escape_label(&edge.label)
        ));
    }

    dot.push('}');
    dot
}
