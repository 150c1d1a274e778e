//! Engine error types.

use crate::core::KeyComponent;
use thiserror::Error;

/// A single rejected entry found while building a table from raw triples.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry {index}: {component} component '{value}' is unset")]
    UnsetComponent {
        index: usize,
        component: KeyComponent,
        value: String,
    },

    #[error("entry {index}: target state '{value}' is unset")]
    UnsetTarget { index: usize, value: String },
}

/// Reasons a table or machine could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("Missing transition definitions. Add at least one transition")]
    MissingDefinitions,

    #[error("Missing initial state: '{value}' is unset")]
    MissingInitialState { value: String },

    #[error("Transition '{key}' targets an unset state")]
    UnsetTargetState { key: String },

    #[error("Invalid transition entries: {}", join_entries(.0))]
    InvalidEntries(Vec<EntryError>),
}

/// Errors returned by the transition engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Table or machine input was rejected. Never partially succeeds.
    #[error("Invalid construction: {0}")]
    InvalidConstruction(#[from] ConstructionError),

    /// A key was built with an unset component.
    #[error("Invalid {component} component in transition key: '{value}' is unset")]
    InvalidKeyComponent {
        component: KeyComponent,
        value: String,
    },

    /// No table entry matches the attempted transition. The machine's
    /// current state is unchanged.
    #[error("Undefined transition: {actor}>{state}>{action}")]
    UndefinedTransition {
        actor: String,
        state: String,
        action: String,
    },

    /// A serialized table definition could not be parsed.
    #[error("Invalid table definition: {0}")]
    Definition(#[from] serde_json::Error),
}

impl EngineError {
    /// Returns whether this error is the expected "action not permitted" miss.
    pub fn is_undefined_transition(&self) -> bool {
        matches!(self, EngineError::UndefinedTransition { .. })
    }

    /// Returns whether this error was raised while building a table or machine.
    pub fn is_invalid_construction(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidConstruction(_) | EngineError::Definition(_)
        )
    }

    /// Returns a stable error code suitable for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::InvalidConstruction(ConstructionError::MissingDefinitions) => {
                "MISSING_DEFINITIONS"
            }
            EngineError::InvalidConstruction(ConstructionError::MissingInitialState { .. }) => {
                "MISSING_INITIAL_STATE"
            }
            EngineError::InvalidConstruction(_) => "INVALID_CONSTRUCTION",
            EngineError::InvalidKeyComponent { .. } => "INVALID_KEY_COMPONENT",
            EngineError::UndefinedTransition { .. } => "UNDEFINED_TRANSITION",
            EngineError::Definition(_) => "INVALID_DEFINITION",
        }
    }
}

fn join_entries(errors: &[EntryError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
