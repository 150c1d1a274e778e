//! Transition tables.
//!
//! A table is the complete, immutable set of allowed
//! `(state, actor, action) -> next state` mappings for one workflow.
//! Tables are validated once at construction and never change afterwards.

mod transitions;
mod validation;

pub use transitions::TransitionTable;
