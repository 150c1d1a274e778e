//! Immutable transition table.

use super::validation::validate_triples;
use crate::core::{Dimension, TransitionKey};
use crate::definition::TransitionDefinition;
use crate::error::{ConstructionError, EngineError};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Immutable mapping from transition key to next state.
///
/// A table always holds at least one entry and never maps to an unset
/// state. It is read-only after construction and can be shared between
/// any number of machines (wrap it in an `Arc`).
///
/// # Example
///
/// ```rust
/// use waypoint::table::TransitionTable;
///
/// let table: TransitionTable<String> = TransitionTable::from_triples(vec![
///     ("DRAFT".to_string(), "REQUESTER".to_string(), "SUBMIT".to_string(), "PENDING".to_string()),
///     ("PENDING".to_string(), "APPROVER".to_string(), "APPROVE".to_string(), "APPROVED".to_string()),
/// ])
/// .unwrap();
///
/// let next = table
///     .lookup(&"DRAFT".to_string(), &"REQUESTER".to_string(), &"SUBMIT".to_string())
///     .unwrap();
/// assert_eq!(next.map(String::as_str), Some("PENDING"));
/// assert!(table.is_terminal(&"APPROVED".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct TransitionTable<S, A = String, K = String> {
    entries: HashMap<TransitionKey<S, A, K>, S>,
}

impl<S: Dimension, A: Dimension, K: Dimension> TransitionTable<S, A, K> {
    /// Build a table from a prepared key map.
    ///
    /// Fails with `MissingDefinitions` when the map is empty and with
    /// `UnsetTargetState` when any entry maps to an unset state.
    pub fn new(entries: HashMap<TransitionKey<S, A, K>, S>) -> Result<Self, EngineError> {
        if entries.is_empty() {
            return Err(ConstructionError::MissingDefinitions.into());
        }

        if let Some(key) = entries
            .iter()
            .find_map(|(key, next)| next.is_unset().then_some(key))
        {
            return Err(ConstructionError::UnsetTargetState {
                key: key.to_string(),
            }
            .into());
        }

        Ok(Self { entries })
    }

    /// Build a table from `(key, next)` pairs. A repeated key overwrites
    /// the earlier entry.
    pub fn from_entries<I>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (TransitionKey<S, A, K>, S)>,
    {
        let mut map: HashMap<TransitionKey<S, A, K>, S> = HashMap::new();
        for (key, next) in entries {
            match map.entry(key) {
                Entry::Occupied(mut slot) => {
                    tracing::debug!(
                        key = %slot.key(),
                        previous = %slot.get().name(),
                        next = %next.name(),
                        "duplicate transition key, later entry wins"
                    );
                    slot.insert(next);
                }
                Entry::Vacant(slot) => {
                    slot.insert(next);
                }
            }
        }
        Self::new(map)
    }

    /// Build a table from raw `(state, actor, action, next)` triples.
    ///
    /// Every entry is validated before any key is built; all invalid
    /// entries are reported together in `InvalidEntries`.
    pub fn from_triples<I>(triples: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (S, A, K, S)>,
    {
        let triples: Vec<_> = triples.into_iter().collect();
        if triples.is_empty() {
            return Err(ConstructionError::MissingDefinitions.into());
        }
        validate_triples(&triples)?;

        let entries = triples
            .into_iter()
            .map(|(state, actor, action, next)| {
                TransitionKey::new(state, actor, action).map(|key| (key, next))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_entries(entries)
    }

    /// Build a table from declarative transition definitions.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = TransitionDefinition<S, A, K>>,
    {
        Self::from_triples(
            definitions
                .into_iter()
                .map(|definition| definition.into_triple()),
        )
    }

    /// Resolve the next state for `(state, actor, action)`.
    ///
    /// Returns `Ok(None)` when no entry matches. Fails with
    /// `InvalidKeyComponent` if any input is unset.
    ///
    /// Each call clones the three components to build a key, which
    /// allocates for `String` dimensions. Hot paths that probe the same
    /// triple repeatedly can build a [`TransitionKey`] once and use
    /// [`get`](Self::get).
    pub fn lookup(&self, state: &S, actor: &A, action: &K) -> Result<Option<&S>, EngineError> {
        let key = TransitionKey::new(state.clone(), actor.clone(), action.clone())?;
        Ok(self.entries.get(&key))
    }

    /// Get the next state mapped to a prebuilt key.
    pub fn get(&self, key: &TransitionKey<S, A, K>) -> Option<&S> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &TransitionKey<S, A, K>) -> bool {
        self.entries.contains_key(key)
    }

    /// Transitions leaving `state`, as `(actor, action, next)`. Unordered.
    pub fn transitions_from<'a>(
        &'a self,
        state: &S,
    ) -> impl Iterator<Item = (&'a A, &'a K, &'a S)> + 'a {
        let state = state.clone();
        self.entries
            .iter()
            .filter(move |(key, _)| *key.state() == state)
            .map(|(key, next)| (key.actor(), key.action(), next))
    }

    /// Every state named in the table, as a source or a target.
    pub fn states(&self) -> HashSet<&S> {
        self.entries
            .iter()
            .flat_map(|(key, next)| [key.state(), next])
            .collect()
    }

    /// Check if no transition leaves `state`.
    ///
    /// Terminality is a property of the table: a state is terminal when no
    /// key starts from it.
    pub fn is_terminal(&self, state: &S) -> bool {
        !self.entries.keys().any(|key| key.state() == state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TransitionKey<S, A, K>, &S)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
