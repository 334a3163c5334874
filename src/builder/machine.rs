//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::core::Schema;
use crate::executor::Executor;
use crate::machine::{IgnoredCallback, Machine, Parts, Subject, TransitionCallback};
use std::fmt::Debug;
use std::sync::{Arc, Weak};

/// Builder for configuring a [`Machine`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use statewise::builder::MachineBuilder;
/// use statewise::core::{Schema, Transition};
/// use statewise::executor::Immediate;
/// use std::sync::Arc;
///
/// let schema: Schema<u8, (), String> = Schema::new(0, |state, _| {
///     (*state < 3).then(|| Transition::to(state + 1))
/// });
/// let owner = Arc::new(String::from("owner"));
///
/// let machine = MachineBuilder::new()
///     .schema(schema)
///     .subject(&owner)
///     .executor(Arc::new(Immediate))
///     .history(16)
///     .build()
///     .unwrap();
///
/// machine.handle_event(());
/// machine.handle_event(());
/// assert_eq!(machine.current_state(), 2);
/// assert_eq!(machine.history().unwrap().len(), 2);
/// ```
pub struct MachineBuilder<S, E, T = ()> {
    schema: Option<Schema<S, E, T>>,
    subject: Option<Weak<T>>,
    executor: Option<Arc<dyn Executor>>,
    history_limit: Option<usize>,
    on_transition: Option<TransitionCallback<S, E>>,
    on_ignored: Option<IgnoredCallback<S, E>>,
}

impl<S, E, T> MachineBuilder<S, E, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            schema: None,
            subject: None,
            executor: None,
            history_limit: None,
            on_transition: None,
            on_ignored: None,
        }
    }

    /// Set the schema (required).
    pub fn schema(mut self, schema: Schema<S, E, T>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the subject; only a weak reference is kept.
    pub fn subject(mut self, subject: &Arc<T>) -> Self {
        self.subject = Some(Arc::downgrade(subject));
        self
    }

    /// Set the subject from an existing weak reference.
    ///
    /// Useful inside `Arc::new_cyclic` when the subject owns the machine.
    pub fn weak_subject(mut self, subject: Weak<T>) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Dispatch every event through `executor`.
    pub fn executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Keep the last `limit` applied transitions in memory.
    pub fn history(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the callback fired after every applied transition.
    pub fn on_transition<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S, &E, &S) + Send + Sync + 'static,
    {
        self.on_transition = Some(Arc::new(callback));
        self
    }

    /// Set the callback fired for every ignored event.
    pub fn on_ignored<F>(mut self, callback: F) -> Self
    where
        F: Fn(&S, &E) + Send + Sync + 'static,
    {
        self.on_ignored = Some(Arc::new(callback));
        self
    }

    fn into_parts(self, subject: Subject<T>) -> Result<Parts<S, E, T>, BuildError> {
        let schema = self.schema.ok_or(BuildError::MissingSchema)?;
        Ok(Parts {
            schema,
            subject,
            executor: self.executor,
            history_limit: self.history_limit,
            on_transition: self.on_transition,
            on_ignored: self.on_ignored,
        })
    }
}

impl<S, E, T> MachineBuilder<S, E, T>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + 'static,
    T: Send + Sync + 'static,
{
    /// Build the machine.
    /// Returns an error if the schema or subject is missing.
    pub fn build(mut self) -> Result<Machine<S, E, T>, BuildError> {
        if self.schema.is_none() {
            return Err(BuildError::MissingSchema);
        }
        let subject = self.subject.take().ok_or(BuildError::MissingSubject)?;
        Ok(Machine::from_parts(self.into_parts(Subject::Weak(subject))?))
    }
}

impl<S, E> MachineBuilder<S, E, ()>
where
    S: Clone + Debug + Send + Sync + 'static,
    E: Clone + Debug + Send + 'static,
{
    /// Build a machine without a subject; actions receive `&()`.
    pub fn build_detached(self) -> Result<Machine<S, E, ()>, BuildError> {
        Ok(Machine::from_parts(self.into_parts(Subject::detached())?))
    }
}

impl<S, E, T> Default for MachineBuilder<S, E, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Transition;
    use parking_lot::Mutex;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Switch {
        Off,
        On,
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    struct Flip;

    fn switch_schema<T: 'static>() -> Schema<Switch, Flip, T> {
        Schema::new(Switch::Off, |state, _| match state {
            Switch::Off => Some(Transition::to(Switch::On)),
            Switch::On => None,
        })
    }

    #[test]
    fn builder_requires_schema() {
        let result = MachineBuilder::<Switch, Flip, ()>::new().build_detached();
        assert!(matches!(result, Err(BuildError::MissingSchema)));

        let subject = Arc::new(0u8);
        let result = MachineBuilder::<Switch, Flip, u8>::new()
            .subject(&subject)
            .build();
        assert!(matches!(result, Err(BuildError::MissingSchema)));
    }

    #[test]
    fn builder_requires_subject() {
        let result = MachineBuilder::<Switch, Flip, u8>::new()
            .schema(switch_schema())
            .build();
        assert!(matches!(result, Err(BuildError::MissingSubject)));
    }

    #[test]
    fn builder_installs_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let transitions = Arc::clone(&seen);
        let ignored = Arc::clone(&seen);

        let machine = MachineBuilder::<Switch, Flip, ()>::new()
            .schema(switch_schema())
            .on_transition(move |_, _, to: &Switch| transitions.lock().push(format!("to {to:?}")))
            .on_ignored(move |state: &Switch, _| ignored.lock().push(format!("ignored in {state:?}")))
            .build_detached()
            .unwrap();

        machine.handle_event(Flip);
        machine.handle_event(Flip);

        assert_eq!(*seen.lock(), vec!["to On", "ignored in On"]);
    }

    #[test]
    fn builder_enables_history() {
        let subject = Arc::new(());
        let machine = MachineBuilder::new()
            .schema(switch_schema())
            .subject(&subject)
            .history(4)
            .build()
            .unwrap();

        machine.handle_event(Flip);

        let history = machine.history().unwrap();
        assert_eq!(history.limit(), 4);
        assert_eq!(history.get_path(), vec![&Switch::Off, &Switch::On]);
    }

    #[test]
    fn weak_subject_is_not_retained() {
        let subject = Arc::new(7u32);
        let machine = MachineBuilder::new()
            .schema(switch_schema())
            .weak_subject(Arc::downgrade(&subject))
            .build()
            .unwrap();

        assert_eq!(Arc::strong_count(&subject), 1);
        assert_eq!(machine.subject().as_deref(), Some(&7));
        drop(subject);
        assert!(machine.subject().is_none());
    }
}
