//! Waypoint: a table-driven finite-state transition engine
//!
//! Waypoint answers one question for a larger business process: given the
//! current state, who is acting and what they are doing, which state comes
//! next? The answer comes from a transition table supplied up front; if the
//! table has no entry, the action is not permitted.
//!
//! # Core Concepts
//!
//! - **Dimension**: types usable as states, actors and actions, with an
//!   explicit notion of "unset"
//! - **Transition Key**: the composite `(state, actor, action)` lookup key
//! - **Transition Table**: the immutable key → next state mapping
//! - **State Machine**: one workflow instance holding the current state
//!
//! # Example
//!
//! ```rust
//! use waypoint::{transition_table, StateMachine, TransitionTable};
//!
//! let table: TransitionTable<String> = transition_table! {
//!     ("UNKNOWN", "REQUESTER", "SUBMIT") => "PENDING",
//!     ("PENDING", "APPROVER", "APPROVE") => "APPROVED",
//!     ("PENDING", "APPROVER", "REJECT") => "REJECTED",
//!     ("REJECTED", "REQUESTER", "SUBMIT") => "PENDING",
//! }
//! .unwrap();
//!
//! let mut machine = StateMachine::new(table, "UNKNOWN".to_string()).unwrap();
//!
//! machine.move_next("REQUESTER", "SUBMIT").unwrap();
//! machine.move_next("APPROVER", "APPROVE").unwrap();
//! assert_eq!(machine.current_state(), "APPROVED");
//!
//! assert!(!machine.can_move_next("APPROVER", "REJECT"));
//! assert!(machine.move_next("APPROVER", "REJECT").is_err());
//! assert_eq!(machine.current_state(), "APPROVED");
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod error;
pub mod machine;
pub mod table;

// Re-export commonly used types
pub use builder::MachineBuilder;
pub use crate::core::{Dimension, KeyComponent, TransitionKey};
pub use definition::{TableDefinition, TransitionDefinition, WorkflowDefinition};
pub use error::{ConstructionError, EngineError, EntryError};
pub use machine::{Callbacks, StateMachine};
pub use table::TransitionTable;
