//! Immutable transition schemas.
//!
//! A [`Schema`] pairs an initial state with a pure transition function
//! `(state, event) -> Option<Transition>`. Returning `None` means the event
//! is ignored in that state. The function is evaluated lazily, either by a
//! [`Machine`](crate::machine::Machine) dispatching an event or by the graph
//! renderer probing every state/event pair.

use std::fmt;
use std::sync::Arc;

/// Side-effecting closure run during a transition with access to the carrier.
pub type Action<T> = Box<dyn FnOnce(&T)>;

/// Shared transition function stored by a schema.
pub type TransitionFn<S, E, T> = dyn Fn(&S, &E) -> Option<Transition<S, T>> + Send + Sync;

/// Outcome of a defined transition: the next state plus an optional action.
pub struct Transition<S, T = ()> {
    /// State the machine moves to
    pub to: S,
    /// Action run after the state change, before the transition callback
    pub action: Option<Action<T>>,
}

impl<S, T> Transition<S, T> {
    /// Transition to `state` without an action.
    pub fn to(state: S) -> Self {
        Self {
            to: state,
            action: None,
        }
    }

    /// Transition to `state` and run `action` against the carrier.
    pub fn with_action<F>(state: S, action: F) -> Self
    where
        F: FnOnce(&T) + 'static,
    {
        Self {
            to: state,
            action: Some(Box::new(action)),
        }
    }

    /// Check whether this transition carries an action.
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

impl<S: fmt::Debug, T> fmt::Debug for Transition<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("to", &self.to)
            .field("has_action", &self.has_action())
            .finish()
    }
}

/// Immutable initial state plus transition function.
///
/// Schemas are cheap to clone and may be shared by any number of machines
/// and threads.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Schema, Transition};
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Door { Open, Closed }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Push { Open, Close }
///
/// let schema: Schema<Door, Push> = Schema::new(Door::Closed, |state, event| {
///     match (state, event) {
///         (Door::Closed, Push::Open) => Some(Transition::to(Door::Open)),
///         (Door::Open, Push::Close) => Some(Transition::to(Door::Closed)),
///         _ => None,
///     }
/// });
///
/// assert_eq!(schema.initial_state(), &Door::Closed);
/// assert_eq!(schema.target(&Door::Closed, &Push::Open), Some(Door::Open));
/// assert_eq!(schema.target(&Door::Closed, &Push::Close), None);
/// ```
pub struct Schema<S, E, T = ()> {
    initial: S,
    transition_fn: Arc<TransitionFn<S, E, T>>,
}

impl<S, E, T> Schema<S, E, T> {
    /// Create a schema from an initial state and a transition function.
    ///
    /// Construction is total: the function is stored verbatim and never
    /// evaluated here. Use [`SchemaBuilder`](crate::builder::SchemaBuilder)
    /// for rule tables and builder-time validation.
    pub fn new<F>(initial: S, transition_fn: F) -> Self
    where
        F: Fn(&S, &E) -> Option<Transition<S, T>> + Send + Sync + 'static,
    {
        Self {
            initial,
            transition_fn: Arc::new(transition_fn),
        }
    }

    pub(crate) fn from_shared(initial: S, transition_fn: Arc<TransitionFn<S, E, T>>) -> Self {
        Self {
            initial,
            transition_fn,
        }
    }

    /// The state every machine built from this schema starts in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// Evaluate the transition function for `(state, event)`.
    pub fn transition(&self, state: &S, event: &E) -> Option<Transition<S, T>> {
        (self.transition_fn)(state, event)
    }

    /// Target state for `(state, event)`, discarding any action.
    pub fn target(&self, state: &S, event: &E) -> Option<S> {
        self.transition(state, event).map(|transition| transition.to)
    }

    /// Check whether `event` is handled in `state`.
    pub fn handles(&self, state: &S, event: &E) -> bool {
        self.transition(state, event).is_some()
    }
}

impl<S: Clone, E, T> Clone for Schema<S, E, T> {
    fn clone(&self) -> Self {
        Self {
            initial: self.initial.clone(),
            transition_fn: Arc::clone(&self.transition_fn),
        }
    }
}

impl<S: fmt::Debug, E, T> fmt::Debug for Schema<S, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}
