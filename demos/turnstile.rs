//! Coin-operated turnstile
//!
//! This example demonstrates a subject that owns its machine, actions that
//! mutate the subject, dispatch on a serial queue, and DOT output.
//!
//! Run with: RUST_LOG=statewise=debug cargo run --example turnstile

use statewise::builder::{MachineBuilder, RuleBuilder, SchemaBuilder};
use statewise::core::Schema;
use statewise::executor::SerialQueue;
use statewise::labelable_enum;
use statewise::machine::Machine;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

labelable_enum! {
    enum Gate {
        Locked,
        Unlocked,
    }
}

labelable_enum! {
    enum Input {
        Coin => "coin",
        Push => "push",
    }
}

struct Turnstile {
    machine: Machine<Gate, Input, Turnstile>,
    coins: AtomicUsize,
    passages: AtomicUsize,
}

fn schema() -> Result<Schema<Gate, Input, Turnstile>, statewise::BuildError> {
    SchemaBuilder::new()
        .initial(Gate::Locked)
        .rule(
            RuleBuilder::new()
                .from(Gate::Locked)
                .on(Input::Coin)
                .to(Gate::Unlocked)
                .action(|turnstile: &Turnstile| {
                    turnstile.coins.fetch_add(1, Ordering::SeqCst);
                }),
        )?
        .rule(
            RuleBuilder::new()
                .from(Gate::Unlocked)
                .on(Input::Push)
                .to(Gate::Locked)
                .action(|turnstile: &Turnstile| {
                    turnstile.passages.fetch_add(1, Ordering::SeqCst);
                }),
        )?
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Turnstile State Machine ===\n");

    let schema = schema()?;
    println!("Schema graph:\n{}\n", schema.render_dot());

    let queue = Arc::new(SerialQueue::new("turnstile")?);
    let turnstile = Arc::new_cyclic(|me| Turnstile {
        machine: MachineBuilder::new()
            .schema(schema.clone())
            .weak_subject(me.clone())
            .executor(queue.clone())
            .history(32)
            .on_transition(|from, input, to| println!("  {from:?} --{input:?}--> {to:?}"))
            .on_ignored(|state, input| println!("  {input:?} ignored while {state:?}"))
            .build()
            .expect("schema and subject are set"),
        coins: AtomicUsize::new(0),
        passages: AtomicUsize::new(0),
    });

    println!("Feeding inputs:");
    for input in [Input::Push, Input::Coin, Input::Coin, Input::Push, Input::Push] {
        turnstile.machine.handle_event(input);
    }
    queue.drain();

    println!("\nFinal state: {:?}", turnstile.machine.current_state());
    println!("Coins: {}", turnstile.coins.load(Ordering::SeqCst));
    println!("Passages: {}", turnstile.passages.load(Ordering::SeqCst));
    if let Some(history) = turnstile.machine.history() {
        println!("Path: {:?}", history.get_path());
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
