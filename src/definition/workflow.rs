//! Workflow definition trait.

use super::TransitionDefinition;
use crate::core::Dimension;

/// A workflow described as a set of transitions plus a default state.
///
/// Business processes implement this to hand the engine a prebuilt
/// definition; see `StateMachine::from_definition`.
///
/// # Example
///
/// ```rust
/// use waypoint::definition::{TransitionDefinition, WorkflowDefinition};
/// use waypoint::StateMachine;
///
/// struct ChangeOrder;
///
/// impl WorkflowDefinition for ChangeOrder {
///     type State = u8;
///     type Actor = String;
///     type Action = String;
///
///     fn transitions(&self) -> Vec<TransitionDefinition<u8>> {
///         vec![
///             TransitionDefinition::new(0, "author".into(), "submit".into(), 1),
///             TransitionDefinition::new(1, "reviewer".into(), "accept".into(), 2),
///         ]
///     }
///
///     fn default_state(&self) -> u8 {
///         0
///     }
/// }
///
/// let mut machine = StateMachine::from_definition(&ChangeOrder).unwrap();
/// assert_eq!(*machine.move_next("author", "submit").unwrap(), 1);
/// ```
pub trait WorkflowDefinition {
    type State: Dimension;
    type Actor: Dimension;
    type Action: Dimension;

    /// All transitions of the workflow.
    fn transitions(&self) -> Vec<TransitionDefinition<Self::State, Self::Actor, Self::Action>>;

    /// State new workflow instances start in.
    fn default_state(&self) -> Self::State;
}
