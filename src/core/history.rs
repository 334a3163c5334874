//! In-memory transition history.
//!
//! Machines can optionally keep a bounded log of applied transitions. The
//! log lives only in memory and is intended for diagnostics and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use statewise::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "idle",
///     event: "start",
///     to: "running",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "running");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, E> {
    /// The state being transitioned from
    pub from: S,
    /// The event that caused the transition
    pub event: E,
    /// The state being transitioned to
    pub to: S,
    /// When the state change was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of applied transitions.
///
/// Once `limit` records are held, recording another evicts the oldest.
///
/// # Example
///
/// ```rust
/// use statewise::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_limit(2);
/// for (from, to) in [(1, 2), (2, 3), (3, 4)] {
///     history.record(TransitionRecord { from, event: "next", to, timestamp: Utc::now() });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&2, &3, &4]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory<S, E> {
    limit: usize,
    records: VecDeque<TransitionRecord<S, E>>,
}

impl<S, E> TransitionHistory<S, E> {
    /// Create an empty history keeping at most `limit` records.
    ///
    /// A limit of zero keeps nothing.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            records: VecDeque::with_capacity(limit.min(64)),
        }
    }

    /// Maximum number of records kept.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<S, E>) {
        if self.limit == 0 {
            return;
        }
        if self.records.len() == self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether no transitions are recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records from oldest to newest.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<S, E>> {
        self.records.iter()
    }

    /// Most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<S, E>> {
        self.records.back()
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest held record followed by the
    /// `to` state of every record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Time elapsed between the oldest and newest held records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
