//! Composite (state, actor, action) lookup key.
//!
//! A single generic key type covers every arity: reduced variants fix the
//! actor and/or action dimensions to `String` through default type
//! parameters (see [`ActionKey`] and [`TextKey`]).

use super::dimension::Dimension;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The dimension of a transition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyComponent {
    State,
    Actor,
    Action,
}

impl fmt::Display for KeyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyComponent::State => f.write_str("state"),
            KeyComponent::Actor => f.write_str("actor"),
            KeyComponent::Action => f.write_str("action"),
        }
    }
}

/// Immutable (state, actor, action) identity used to look up the next state.
///
/// Two keys are equal iff all three components are equal. The derived hash
/// feeds the components to the hasher in order, so equal keys always hash
/// identically and swapping components changes the hash input.
///
/// # Example
///
/// ```rust
/// use waypoint::core::TransitionKey;
///
/// let a = TransitionKey::new("PENDING".to_string(), "APPROVER".to_string(), "APPROVE".to_string())
///     .unwrap();
/// let b = TransitionKey::new("PENDING".to_string(), "APPROVER".to_string(), "APPROVE".to_string())
///     .unwrap();
///
/// assert_eq!(a, b);
/// assert!(TransitionKey::new(String::new(), "APPROVER".to_string(), "APPROVE".to_string()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionKey<S, A = String, K = String> {
    state: S,
    actor: A,
    action: K,
}

/// Key whose action dimension is text.
pub type ActionKey<S, A> = TransitionKey<S, A, String>;

/// Key whose actor and action dimensions are text.
pub type TextKey<S> = TransitionKey<S, String, String>;

impl<S: Dimension, A: Dimension, K: Dimension> TransitionKey<S, A, K> {
    /// Build a key, rejecting any unset component.
    ///
    /// Components are checked in state, actor, action order; the error
    /// names the first unset one.
    pub fn new(state: S, actor: A, action: K) -> Result<Self, EngineError> {
        ensure_set(KeyComponent::State, &state)?;
        ensure_set(KeyComponent::Actor, &actor)?;
        ensure_set(KeyComponent::Action, &action)?;

        Ok(Self {
            state,
            actor,
            action,
        })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn actor(&self) -> &A {
        &self.actor
    }

    pub fn action(&self) -> &K {
        &self.action
    }

    /// Consume the key, returning `(state, actor, action)`.
    pub fn into_parts(self) -> (S, A, K) {
        (self.state, self.actor, self.action)
    }
}

/// Reject an unset value for the given component.
fn ensure_set<D: Dimension>(component: KeyComponent, value: &D) -> Result<(), EngineError> {
    if value.is_unset() {
        return Err(EngineError::InvalidKeyComponent {
            component,
            value: value.name().into_owned(),
        });
    }
    Ok(())
}

impl<S: Dimension, A: Dimension, K: Dimension> fmt::Display for TransitionKey<S, A, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}>{}>{}",
            self.actor.name(),
            self.state.name(),
            self.action.name()
        )
    }
}
