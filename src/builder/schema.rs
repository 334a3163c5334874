//! Builder for constructing schemas.

use crate::builder::error::BuildError;
use crate::builder::rule::{Rule, RuleBuilder};
use crate::core::{Schema, Transition, TransitionFn};
use std::fmt::Debug;
use std::sync::Arc;

/// Builder for constructing schemas from a transition function or a rule
/// table.
///
/// # Example
///
/// ```rust
/// use statewise::builder::{RuleBuilder, SchemaBuilder};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Light { Red, Green }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Signal { Go, Stop }
///
/// let schema = SchemaBuilder::<Light, Signal>::new()
///     .initial(Light::Red)
///     .rule(RuleBuilder::new().from(Light::Red).on(Signal::Go).to(Light::Green))
///     .unwrap()
///     .rule(RuleBuilder::new().from(Light::Green).on(Signal::Stop).to(Light::Red))
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.target(&Light::Red, &Signal::Go), Some(Light::Green));
/// assert_eq!(schema.target(&Light::Red, &Signal::Stop), None);
/// ```
pub struct SchemaBuilder<S, E, T = ()> {
    initial: Option<S>,
    transition_fn: Option<Arc<TransitionFn<S, E, T>>>,
    rules: Vec<Rule<S, E, T>>,
}

impl<S, E, T> SchemaBuilder<S, E, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transition_fn: None,
            rules: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Use a transition function instead of rules.
    pub fn transition_fn<F>(mut self, transition_fn: F) -> Self
    where
        F: Fn(&S, &E) -> Option<Transition<S, T>> + Send + Sync + 'static,
    {
        self.transition_fn = Some(Arc::new(transition_fn));
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: RuleBuilder<S, E, T>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.rules.push(rule);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: Rule<S, E, T>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add multiple rules at once.
    pub fn rules(mut self, rules: Vec<Rule<S, E, T>>) -> Self {
        self.rules.extend(rules);
        self
    }
}

impl<S, E, T> SchemaBuilder<S, E, T>
where
    S: Clone + PartialEq + Debug + Send + Sync + 'static,
    E: PartialEq + Debug + Send + Sync + 'static,
    T: 'static,
{
    /// Build the schema.
    /// Returns an error if required fields are missing or the rule table is
    /// malformed.
    pub fn build(self) -> Result<Schema<S, E, T>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        match (self.transition_fn, self.rules.is_empty()) {
            (Some(_), false) => Err(BuildError::AmbiguousTransitions),
            (Some(transition_fn), true) => Ok(Schema::from_shared(initial, transition_fn)),
            (None, true) => Err(BuildError::NoTransitions),
            (None, false) => {
                ensure_unique(&self.rules)?;
                let rules = self.rules;
                Ok(Schema::new(initial, move |state: &S, event: &E| {
                    rules
                        .iter()
                        .find(|rule| rule.matches(state, event))
                        .map(Rule::transition)
                }))
            }
        }
    }
}

impl<S, E, T> Default for SchemaBuilder<S, E, T> {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_unique<S, E, T>(rules: &[Rule<S, E, T>]) -> Result<(), BuildError>
where
    S: PartialEq + Debug,
    E: PartialEq + Debug,
{
    for (index, rule) in rules.iter().enumerate() {
        let duplicate = rules[index + 1..]
            .iter()
            .any(|other| other.from == rule.from && other.on == rule.on);
        if duplicate {
            return Err(BuildError::DuplicateRule {
                from: format!("{:?}", rule.from),
                event: format!("{:?}", rule.on),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Number {
        One,
        Two,
        Three,
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Step {
        Increment,
        Decrement,
    }

    fn step(from: Number, on: Step, to: Number) -> RuleBuilder<Number, Step> {
        RuleBuilder::new().from(from).on(on).to(to)
    }

    #[test]
    fn builder_requires_initial_state() {
        let result = SchemaBuilder::<Number, Step>::new()
            .transition_fn(|_, _| None)
            .build();

        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn builder_requires_transitions() {
        let result = SchemaBuilder::<Number, Step>::new()
            .initial(Number::One)
            .build();

        assert!(matches!(result, Err(BuildError::NoTransitions)));
    }

    #[test]
    fn builder_rejects_function_and_rules() {
        let result = SchemaBuilder::<Number, Step>::new()
            .initial(Number::One)
            .transition_fn(|_, _| None)
            .rule(step(Number::One, Step::Increment, Number::Two))
            .unwrap()
            .build();

        assert!(matches!(result, Err(BuildError::AmbiguousTransitions)));
    }

    #[test]
    fn builder_rejects_duplicate_rules() {
        let result = SchemaBuilder::<Number, Step>::new()
            .initial(Number::One)
            .rule(step(Number::One, Step::Increment, Number::Two))
            .unwrap()
            .rule(step(Number::One, Step::Increment, Number::Three))
            .unwrap()
            .build();

        match result {
            Err(BuildError::DuplicateRule { from, event }) => {
                assert_eq!(from, "One");
                assert_eq!(event, "Increment");
            }
            other => panic!("Expected DuplicateRule, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rule_errors_propagate() {
        let result = SchemaBuilder::<Number, Step>::new()
            .initial(Number::One)
            .rule(RuleBuilder::new().from(Number::One).to(Number::Two));

        assert!(matches!(result, Err(BuildError::MissingEvent)));
    }

    #[test]
    fn rule_table_behaves_like_transition_function() {
        let schema = SchemaBuilder::<Number, Step>::new()
            .initial(Number::One)
            .rules(vec![
                step(Number::One, Step::Increment, Number::Two).build().unwrap(),
                step(Number::Two, Step::Increment, Number::Three).build().unwrap(),
                step(Number::Two, Step::Decrement, Number::One).build().unwrap(),
                step(Number::Three, Step::Decrement, Number::Two).build().unwrap(),
            ])
            .build()
            .unwrap();

        assert_eq!(schema.initial_state(), &Number::One);
        assert_eq!(schema.target(&Number::One, &Step::Increment), Some(Number::Two));
        assert_eq!(schema.target(&Number::Three, &Step::Decrement), Some(Number::Two));
        assert_eq!(schema.target(&Number::Three, &Step::Increment), None);
        assert_eq!(schema.target(&Number::One, &Step::Decrement), None);
    }

    #[test]
    fn transition_fn_schema_builds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = SchemaBuilder::<Number, Step>::new()
            .initial(Number::Two)
            .transition_fn(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Some(Transition::to(Number::Three))
            })
            .build()
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(schema.target(&Number::Two, &Step::Increment), Some(Number::Three));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rule_actions_survive_into_schema() {
        let schema = SchemaBuilder::<Number, Step, AtomicUsize>::new()
            .initial(Number::One)
            .rule(
                RuleBuilder::new()
                    .from(Number::One)
                    .on(Step::Increment)
                    .to(Number::Two)
                    .action(|hits: &AtomicUsize| {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }),
            )
            .unwrap()
            .build()
            .unwrap();

        let hits = AtomicUsize::new(0);
        let transition = schema.transition(&Number::One, &Step::Increment).unwrap();
        (transition.action.unwrap())(&hits);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
