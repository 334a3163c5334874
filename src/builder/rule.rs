//! Builder for declarative transition rules.

use crate::builder::error::BuildError;
use crate::core::Transition;
use std::fmt;
use std::sync::Arc;

/// Shared action attached to a rule; run once per matching dispatch.
pub type RuleAction<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// A single `(from, event) -> to` rule with an optional action.
pub struct Rule<S, E, T = ()> {
    /// State the rule applies in
    pub from: S,
    /// Event that triggers the rule
    pub on: E,
    /// State the machine moves to
    pub to: S,
    /// Optional action run against the subject
    pub action: Option<RuleAction<T>>,
}

impl<S: PartialEq, E: PartialEq, T> Rule<S, E, T> {
    /// Check whether this rule applies to `(state, event)` (pure).
    pub fn matches(&self, state: &S, event: &E) -> bool {
        self.from == *state && self.on == *event
    }
}

impl<S: Clone, E, T: 'static> Rule<S, E, T> {
    /// The transition this rule produces.
    pub fn transition(&self) -> Transition<S, T> {
        match &self.action {
            Some(action) => {
                let action = Arc::clone(action);
                Transition::with_action(self.to.clone(), move |subject: &T| action(subject))
            }
            None => Transition::to(self.to.clone()),
        }
    }
}

impl<S: Clone, E: Clone, T> Clone for Rule<S, E, T> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            on: self.on.clone(),
            to: self.to.clone(),
            action: self.action.clone(),
        }
    }
}

impl<S: fmt::Debug, E: fmt::Debug, T> fmt::Debug for Rule<S, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("from", &self.from)
            .field("on", &self.on)
            .field("to", &self.to)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Builder for constructing rules with a fluent API.
pub struct RuleBuilder<S, E, T = ()> {
    from: Option<S>,
    on: Option<E>,
    to: Option<S>,
    action: Option<RuleAction<T>>,
}

impl<S, E, T> RuleBuilder<S, E, T> {
    /// Create a new rule builder.
    pub fn new() -> Self {
        Self {
            from: None,
            on: None,
            to: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.on = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Run `action` against the subject whenever this rule fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<Rule<S, E, T>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let on = self.on.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;

        Ok(Rule {
            from,
            on,
            to,
            action: self.action,
        })
    }
}

impl<S, E, T> Default for RuleBuilder<S, E, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Light {
        Red,
        Green,
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Signal {
        Go,
        Stop,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = RuleBuilder::<Light, Signal>::new().build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));

        let result = RuleBuilder::<Light, Signal>::new().from(Light::Red).build();
        assert!(matches!(result, Err(BuildError::MissingEvent)));

        let result = RuleBuilder::<Light, Signal>::new()
            .from(Light::Red)
            .on(Signal::Go)
            .build();
        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn rule_matches_only_its_pair() {
        let rule = RuleBuilder::<Light, Signal>::new()
            .from(Light::Red)
            .on(Signal::Go)
            .to(Light::Green)
            .build()
            .unwrap();

        assert!(rule.matches(&Light::Red, &Signal::Go));
        assert!(!rule.matches(&Light::Red, &Signal::Stop));
        assert!(!rule.matches(&Light::Green, &Signal::Go));
    }

    #[test]
    fn transition_carries_action() {
        let rule = RuleBuilder::<Light, Signal, AtomicUsize>::new()
            .from(Light::Red)
            .on(Signal::Go)
            .to(Light::Green)
            .action(|hits: &AtomicUsize| {
                hits.fetch_add(1, Ordering::SeqCst);
            })
            .build()
            .unwrap();

        let hits = AtomicUsize::new(0);
        for _ in 0..2 {
            let transition = rule.transition();
            assert_eq!(transition.to, Light::Green);
            (transition.action.unwrap())(&hits);
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transition_without_action() {
        let rule = RuleBuilder::<Light, Signal>::new()
            .from(Light::Green)
            .on(Signal::Stop)
            .to(Light::Red)
            .build()
            .unwrap();

        assert!(!rule.transition().has_action());
        assert!(format!("{rule:?}").contains("has_action: false"));
    }
}
