//! Transition history tracking.
//!
//! Each machine keeps an ordered record of the transitions it applied.

use super::dimension::Dimension;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use waypoint::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "DRAFT".to_string(),
///     to: "PENDING".to_string(),
///     actor: "REQUESTER".to_string(),
///     action: "SUBMIT".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, "PENDING");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S, A = String, K = String> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Who triggered the transition
    pub actor: A,
    /// What was done
    pub action: K,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of applied transitions.
///
/// `record` consumes the history and returns it with the transition
/// appended, so recorded entries are never edited in place.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(TransitionRecord {
///         from: 1u32,
///         to: 2u32,
///         actor: "clerk".to_string(),
///         action: "file".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: 2u32,
///         to: 3u32,
///         actor: "judge".to_string(),
///         action: "rule".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(history.path(), vec![&1u32, &2, &3]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S, A = String, K = String> {
    records: Vec<TransitionRecord<S, A, K>>,
}

impl<S, A, K> Default for StateHistory<S, A, K> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<S: Dimension, A: Dimension, K: Dimension> StateHistory<S, A, K> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transition, returning the extended history.
    pub fn record(mut self, record: TransitionRecord<S, A, K>) -> Self {
        self.records.push(record);
        self
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first `from` state followed by the `to` state of each
    /// record. Empty when nothing has been recorded.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|record| &record.to));
        path
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// Returns `None` if there are no records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[TransitionRecord<S, A, K>] {
        &self.records
    }

    pub fn last(&self) -> Option<&TransitionRecord<S, A, K>> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
