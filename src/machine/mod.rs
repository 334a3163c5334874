//! Runtime state machine driving a [`Schema`] against a stream of events.
//!
//! # Dispatch
//!
//! `handle_event` evaluates the schema for the current state. An ignored
//! event fires the ignored callback and nothing else. A defined transition
//! updates the current state first, then runs the action against the
//! subject, then fires the transition callback. Because the state is
//! updated before the action runs, an action may call `handle_event` on the
//! same machine and the nested call observes the new state; nested effects
//! finish before control returns to the outer action.
//!
//! No lock is held while user code runs, so actions and callbacks are free
//! to re-enter the machine. Unbounded self-triggering recursion will
//! overflow the stack; the machine does not guard against it.
//!
//! # Subject
//!
//! The machine keeps only a [`Weak`] reference to its subject, so a subject
//! may own the machine that refers back to it. Once the subject is dropped,
//! actions are skipped while state changes and callbacks still happen.
//!
//! # Execution context
//!
//! With an [`Executor`] configured, every `handle_event` call is submitted as
//! a single job and the caller does not wait for it, unless the caller is
//! already on that executor, in which case dispatch runs inline. Without an
//! executor dispatch is synchronous and concurrent callers get no ordering
//! guarantees.

use crate::core::{Schema, Transition, TransitionHistory, TransitionRecord};
use crate::executor::Executor;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::fmt::{self, Debug};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};
use uuid::Uuid;

/// Callback fired after a transition with `(old_state, event, new_state)`.
pub type TransitionCallback<S, E> = Arc<dyn Fn(&S, &E, &S) + Send + Sync>;

/// Callback fired when an event is ignored, with `(state, event)`.
pub type IgnoredCallback<S, E> = Arc<dyn Fn(&S, &E) + Send + Sync>;

/// How a machine reaches the value its actions run against.
pub(crate) enum Subject<T> {
    Weak(Weak<T>),
    Owned(Arc<T>),
}

impl Subject<()> {
    pub(crate) fn detached() -> Self {
        Self::Owned(Arc::new(()))
    }
}

impl<T> Subject<T> {
    fn resolve(&self) -> Option<Arc<T>> {
        match self {
            Self::Weak(subject) => subject.upgrade(),
            Self::Owned(subject) => Some(Arc::clone(subject)),
        }
    }
}

/// Everything a machine is assembled from.
pub(crate) struct Parts<S, E, T> {
    pub(crate) schema: Schema<S, E, T>,
    pub(crate) subject: Subject<T>,
    pub(crate) executor: Option<Arc<dyn Executor>>,
    pub(crate) history_limit: Option<usize>,
    pub(crate) on_transition: Option<TransitionCallback<S, E>>,
    pub(crate) on_ignored: Option<IgnoredCallback<S, E>>,
}

struct Inner<S, E, T> {
    id: Uuid,
    schema: Schema<S, E, T>,
    subject: Subject<T>,
    state: Mutex<S>,
    executor: Option<Arc<dyn Executor>>,
    history: Option<Mutex<TransitionHistory<S, E>>>,
    on_transition: RwLock<Option<TransitionCallback<S, E>>>,
    on_ignored: RwLock<Option<IgnoredCallback<S, E>>>,
}

/// Mutable runtime for a schema.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Schema, Transition};
/// use statewise::machine::Machine;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Gate { Locked, Unlocked }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Input { Coin, Push }
///
/// let schema: Schema<Gate, Input, AtomicUsize> = Schema::new(Gate::Locked, |state, input| {
///     match (state, input) {
///         (Gate::Locked, Input::Coin) => Some(Transition::with_action(
///             Gate::Unlocked,
///             |coins: &AtomicUsize| {
///                 coins.fetch_add(1, Ordering::SeqCst);
///             },
///         )),
///         (Gate::Unlocked, Input::Push) => Some(Transition::to(Gate::Locked)),
///         _ => None,
///     }
/// });
///
/// let coins = Arc::new(AtomicUsize::new(0));
/// let machine = Machine::new(schema, &coins, None);
///
/// machine.handle_event(Input::Coin);
/// assert_eq!(machine.current_state(), Gate::Unlocked);
/// assert_eq!(coins.load(Ordering::SeqCst), 1);
///
/// machine.handle_event(Input::Coin);
/// assert_eq!(machine.current_state(), Gate::Unlocked);
/// ```
pub struct Machine<S, E, T = ()> {
    inner: Arc<Inner<S, E, T>>,
}

impl<S, E, T> Machine<S, E, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Create a machine in the schema's initial state.
    ///
    /// Only a weak reference to `subject` is kept.
    pub fn new(
        schema: Schema<S, E, T>,
        subject: &Arc<T>,
        executor: Option<Arc<dyn Executor>>,
    ) -> Self {
        Self::from_parts(Parts {
            schema,
            subject: Subject::Weak(Arc::downgrade(subject)),
            executor,
            history_limit: None,
            on_transition: None,
            on_ignored: None,
        })
    }

    pub(crate) fn from_parts(parts: Parts<S, E, T>) -> Self {
        let Parts {
            schema,
            subject,
            executor,
            history_limit,
            on_transition,
            on_ignored,
        } = parts;
        let id = Uuid::new_v4();
        let initial = schema.initial_state().clone();
        trace!(machine = %id, state = ?initial, "machine created");

        Self {
            inner: Arc::new(Inner {
                id,
                schema,
                subject,
                state: Mutex::new(initial),
                executor,
                history: history_limit
                    .map(|limit| Mutex::new(TransitionHistory::with_limit(limit))),
                on_transition: RwLock::new(on_transition),
                on_ignored: RwLock::new(on_ignored),
            }),
        }
    }

    /// Offer `event` to the machine.
    ///
    /// Runs inline when no executor is configured or the caller is already
    /// on it; otherwise submits one job and returns without waiting.
    pub fn handle_event(&self, event: E) {
        match &self.inner.executor {
            Some(executor) if !executor.is_current() => {
                let inner = Arc::clone(&self.inner);
                executor.submit(Box::new(move || inner.dispatch(event)));
            }
            _ => self.inner.dispatch(event),
        }
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> S {
        self.inner.state.lock().clone()
    }

    /// Unique id used to tag this machine's log events.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// The schema this machine runs.
    pub fn schema(&self) -> &Schema<S, E, T> {
        &self.inner.schema
    }

    /// The subject, if it is still alive.
    pub fn subject(&self) -> Option<Arc<T>> {
        self.inner.subject.resolve()
    }

    /// Check whether dispatch goes through an executor.
    pub fn has_executor(&self) -> bool {
        self.inner.executor.is_some()
    }

    /// Copy of the recorded history, when history is enabled.
    pub fn history(&self) -> Option<TransitionHistory<S, E>> {
        self.inner
            .history
            .as_ref()
            .map(|history| history.lock().clone())
    }

    /// Set the callback fired after every applied transition.
    pub fn on_transition<F>(&self, callback: F)
    where
        F: Fn(&S, &E, &S) + Send + Sync + 'static,
    {
        *self.inner.on_transition.write() = Some(Arc::new(callback));
    }

    /// Remove the transition callback.
    pub fn clear_transition_callback(&self) {
        *self.inner.on_transition.write() = None;
    }

    /// Set the callback fired for every ignored event.
    pub fn on_ignored<F>(&self, callback: F)
    where
        F: Fn(&S, &E) + Send + Sync + 'static,
    {
        *self.inner.on_ignored.write() = Some(Arc::new(callback));
    }

    /// Remove the ignored-event callback.
    pub fn clear_ignored_callback(&self) {
        *self.inner.on_ignored.write() = None;
    }
}

impl<S, E> Machine<S, E, ()>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + 'static,
{
    /// Create a machine that has no subject.
    ///
    /// Actions still run and receive `&()`.
    pub fn detached(schema: Schema<S, E, ()>, executor: Option<Arc<dyn Executor>>) -> Self {
        Self::from_parts(Parts {
            schema,
            subject: Subject::detached(),
            executor,
            history_limit: None,
            on_transition: None,
            on_ignored: None,
        })
    }
}

impl<S, E, T> Inner<S, E, T>
where
    S: Clone + Debug,
    E: Clone + Debug,
{
    fn dispatch(&self, event: E) {
        let current = self.state.lock().clone();
        trace!(machine = %self.id, state = ?current, event = ?event, "dispatching event");

        let Some(Transition { to, action }) = self.schema.transition(&current, &event) else {
            debug!(machine = %self.id, state = ?current, event = ?event, "event ignored");
            let callback = self.on_ignored.read().clone();
            if let Some(callback) = callback {
                callback(&current, &event);
            }
            return;
        };

        // Visible before the action runs so nested dispatch sees the new state.
        let from = std::mem::replace(&mut *self.state.lock(), to.clone());
        if let Some(history) = &self.history {
            history.lock().record(TransitionRecord {
                from: from.clone(),
                event: event.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
            });
        }
        debug!(machine = %self.id, from = ?from, event = ?event, to = ?to, "transition applied");

        if let Some(action) = action {
            match self.subject.resolve() {
                Some(subject) => action(subject.as_ref()),
                None => debug!(machine = %self.id, "subject released; action skipped"),
            }
        }

        let callback = self.on_transition.read().clone();
        if let Some(callback) = callback {
            callback(&from, &event, &to);
        }
    }
}

impl<S: Debug, E, T> fmt::Debug for Machine<S, E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("id", &self.inner.id)
            .field("state", &*self.inner.state.lock())
            .field("has_executor", &self.inner.executor.is_some())
            .finish_non_exhaustive()
    }
}
