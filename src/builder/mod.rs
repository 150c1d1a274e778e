//! Builder API for ergonomic table and machine construction.
//!
//! This module provides a fluent builder and macros for describing
//! transition tables with minimal boilerplate while keeping the same
//! validation as the direct constructors.

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;

use crate::core::Dimension;
use crate::definition::TransitionDefinition;

/// Shorthand for a single `(from, actor, action) -> to` definition.
///
/// # Example
///
/// ```
/// use waypoint::builder::{transition, MachineBuilder};
///
/// let table = MachineBuilder::<String>::new()
///     .transitions([
///         transition("DRAFT", "REQUESTER", "SUBMIT", "PENDING"),
///         transition("PENDING", "APPROVER", "APPROVE", "APPROVED"),
///     ])
///     .build_table()
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// ```
pub fn transition<S, A, K>(
    from: impl Into<S>,
    actor: impl Into<A>,
    action: impl Into<K>,
    to: impl Into<S>,
) -> TransitionDefinition<S, A, K>
where
    S: Dimension,
    A: Dimension,
    K: Dimension,
{
    TransitionDefinition::new(from.into(), actor.into(), action.into(), to.into())
}
