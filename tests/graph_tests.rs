//! Integration tests for DOT rendering.

use statewise::builder::{RuleBuilder, SchemaBuilder};
use statewise::core::{Schema, Transition};
use statewise::graph::Graph;
use statewise::labelable_enum;

labelable_enum! {
    enum Number {
        One => "one",
        Two => "two",
        Three => "three",
    }
}

labelable_enum! {
    enum Step {
        Increment => "increment",
        Decrement => "decrement",
    }
}

fn numeric_schema() -> Schema<Number, Step> {
    Schema::new(Number::One, |state, event| match (state, event) {
        (Number::One, Step::Increment) => Some(Transition::to(Number::Two)),
        (Number::Two, Step::Increment) => Some(Transition::to(Number::Three)),
        (Number::Two, Step::Decrement) => Some(Transition::to(Number::One)),
        (Number::Three, Step::Decrement) => Some(Transition::to(Number::Two)),
        _ => None,
    })
}

#[test]
fn renders_numeric_schema() {
    let expected = r#"digraph {
    graph [rankdir=LR]

    0 [label="", shape=plaintext]
    0 -> 1 [label="START"]

    1 [label="one"]
    2 [label="two"]
    3 [label="three"]

    1 -> 2 [label="increment"]
    2 -> 3 [label="increment"]
    2 -> 1 [label="decrement"]
    3 -> 2 [label="decrement"]
}"#;

    assert_eq!(numeric_schema().render_dot(), expected);
}

#[test]
fn escapes_quotes_in_labels() {
    labelable_enum! {
        enum Awesome {
            State => "An \"awesome\" state",
        }
    }

    labelable_enum! {
        enum AwesomeEvent {
            Event => "An \"awesome\" event",
        }
    }

    let schema: Schema<Awesome, AwesomeEvent> =
        Schema::new(Awesome::State, |_, _| Some(Transition::to(Awesome::State)));

    let expected = r#"digraph {
    graph [rankdir=LR]

    0 [label="", shape=plaintext]
    0 -> 1 [label="START"]

    1 [label="An \"awesome\" state"]

    1 -> 1 [label="An \"awesome\" event"]
}"#;

    assert_eq!(schema.render_dot(), expected);
}

#[test]
fn rule_built_schema_renders_like_function_schema() {
    let schema = SchemaBuilder::<Number, Step>::new()
        .initial(Number::One)
        .rule(RuleBuilder::new().from(Number::Three).on(Step::Decrement).to(Number::Two))
        .unwrap()
        .rule(RuleBuilder::new().from(Number::One).on(Step::Increment).to(Number::Two))
        .unwrap()
        .rule(RuleBuilder::new().from(Number::Two).on(Step::Decrement).to(Number::One))
        .unwrap()
        .rule(RuleBuilder::new().from(Number::Two).on(Step::Increment).to(Number::Three))
        .unwrap()
        .build()
        .unwrap();

    // Rule order does not matter; output follows enumeration order.
    assert_eq!(schema.render_dot(), numeric_schema().render_dot());
}

#[test]
fn graph_model_matches_rendered_text() {
    let graph = Graph::from_schema(&numeric_schema());

    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 4);
    assert_eq!(graph.to_dot(), numeric_schema().render_dot());
}

#[test]
fn json_export_keeps_raw_labels() {
    labelable_enum! {
        enum Quoted {
            Only => "say \"hi\"",
        }
    }

    let schema: Schema<Quoted, Step> = Schema::new(Quoted::Only, |_, _| None);
    let json = schema.graph().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["nodes"][0]["label"], "say \"hi\"");
    assert_eq!(value["initial"], 1);
    assert!(value["edges"].as_array().unwrap().is_empty());
}
