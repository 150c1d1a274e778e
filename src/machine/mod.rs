//! Workflow instances.
//!
//! A [`StateMachine`] holds the current state of one workflow instance and
//! a shared [`TransitionTable`](crate::table::TransitionTable). It offers
//! two deliberately different ways to report a rejected action:
//!
//! - `move_next` returns `EngineError::UndefinedTransition` (fail-fast)
//! - `move_next_with` invokes an optional failure callback (fail-soft)
//!
//! `can_move_next` performs the same lookup without committing to it.

mod callbacks;
mod state_machine;

pub use callbacks::Callbacks;
pub use state_machine::StateMachine;
