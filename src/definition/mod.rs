//! Declarative workflow definitions.
//!
//! Tables can be described as data and loaded with serde:
//!
//! ```json
//! {
//!   "initial": "UNKNOWN",
//!   "transitions": [
//!     {"from": "UNKNOWN", "actor": "REQUESTER", "action": "SUBMIT", "to": "PENDING"},
//!     {"from": "PENDING", "actor": "APPROVER", "action": "APPROVE", "to": "APPROVED"}
//!   ]
//! }
//! ```
//!
//! Loaded definitions go through the same validation as literal tables.

mod workflow;

pub use workflow::WorkflowDefinition;

use crate::core::Dimension;
use crate::error::EngineError;
use crate::machine::StateMachine;
use crate::table::TransitionTable;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// One `(from, actor, action) -> to` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionDefinition<S, A = String, K = String> {
    pub from: S,
    pub actor: A,
    pub action: K,
    pub to: S,
}

impl<S, A, K> TransitionDefinition<S, A, K> {
    pub fn new(from: S, actor: A, action: K, to: S) -> Self {
        Self {
            from,
            actor,
            action,
            to,
        }
    }

    /// Split into `(state, actor, action, next)`.
    pub fn into_triple(self) -> (S, A, K, S) {
        (self.from, self.actor, self.action, self.to)
    }
}

/// Serializable description of a workflow: its initial state and its
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition<S, A = String, K = String> {
    /// State new machines start in.
    pub initial: S,

    /// Transitions, applied in order; a repeated key overwrites the
    /// earlier entry.
    pub transitions: Vec<TransitionDefinition<S, A, K>>,
}

impl<S: Dimension, A: Dimension, K: Dimension> TableDefinition<S, A, K> {
    pub fn new(initial: S, transitions: Vec<TransitionDefinition<S, A, K>>) -> Self {
        Self {
            initial,
            transitions,
        }
    }

    /// Parse a definition from JSON text.
    pub fn from_json(json: &str) -> Result<Self, EngineError>
    where
        Self: DeserializeOwned,
    {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a definition from an already decoded JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, EngineError>
    where
        Self: DeserializeOwned,
    {
        Ok(serde_json::from_value(value)?)
    }

    /// Render the definition as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, EngineError>
    where
        Self: Serialize,
    {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the transitions into a table. The initial state is dropped.
    pub fn into_table(self) -> Result<TransitionTable<S, A, K>, EngineError> {
        TransitionTable::from_definitions(self.transitions)
    }

    /// Validate the definition and start a machine in its initial state.
    pub fn into_machine(self) -> Result<StateMachine<S, A, K>, EngineError> {
        let Self {
            initial,
            transitions,
        } = self;
        StateMachine::new(TransitionTable::from_definitions(transitions)?, initial)
    }
}

impl<S: Dimension, A: Dimension, K: Dimension> WorkflowDefinition for TableDefinition<S, A, K> {
    type State = S;
    type Actor = A;
    type Action = K;

    fn transitions(&self) -> Vec<TransitionDefinition<S, A, K>> {
        self.transitions.clone()
    }

    fn default_state(&self) -> S {
        self.initial.clone()
    }
}
