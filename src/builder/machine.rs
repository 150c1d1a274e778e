//! Builder for constructing state machines.

use crate::core::Dimension;
use crate::definition::TransitionDefinition;
use crate::error::{ConstructionError, EngineError};
use crate::machine::StateMachine;
use crate::table::TransitionTable;

/// Builder for constructing tables and machines with a fluent API.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::MachineBuilder;
///
/// let mut machine = MachineBuilder::<String>::new()
///     .initial("DRAFT")
///     .transition("DRAFT", "REQUESTER", "SUBMIT", "PENDING")
///     .transition("PENDING", "APPROVER", "APPROVE", "APPROVED")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.move_next("REQUESTER", "SUBMIT").unwrap(), "PENDING");
/// ```
pub struct MachineBuilder<S, A = String, K = String> {
    initial: Option<S>,
    transitions: Vec<TransitionDefinition<S, A, K>>,
}

impl<S: Dimension, A: Dimension, K: Dimension> MachineBuilder<S, A, K> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required for `build`).
    pub fn initial(mut self, state: impl Into<S>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add one `(from, actor, action) -> to` transition.
    pub fn transition(
        mut self,
        from: impl Into<S>,
        actor: impl Into<A>,
        action: impl Into<K>,
        to: impl Into<S>,
    ) -> Self {
        self.transitions.push(TransitionDefinition::new(
            from.into(),
            actor.into(),
            action.into(),
            to.into(),
        ));
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions<I>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = TransitionDefinition<S, A, K>>,
    {
        self.transitions.extend(transitions);
        self
    }

    /// Validate the transitions into a table. The initial state is ignored.
    pub fn build_table(self) -> Result<TransitionTable<S, A, K>, EngineError> {
        TransitionTable::from_definitions(self.transitions)
    }

    /// Build the state machine.
    ///
    /// Transitions are validated first, then the initial state.
    pub fn build(self) -> Result<StateMachine<S, A, K>, EngineError> {
        let table = TransitionTable::from_definitions(self.transitions)?;
        let initial = self
            .initial
            .ok_or_else(|| ConstructionError::MissingInitialState {
                value: "<unset>".to_string(),
            })?;

        StateMachine::new(table, initial)
    }
}

impl<S: Dimension, A: Dimension, K: Dimension> Default for MachineBuilder<S, A, K> {
    fn default() -> Self {
        Self::new()
    }
}
