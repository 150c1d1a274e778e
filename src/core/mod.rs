//! Core engine types.
//!
//! This module contains the leaf building blocks of the engine:
//! - Key components via the `Dimension` trait
//! - The composite `TransitionKey` and its equality/hash contract
//! - Per-machine transition history

mod dimension;
mod history;
mod key;

pub use dimension::Dimension;
pub use history::{StateHistory, TransitionRecord};
pub use key::{ActionKey, KeyComponent, TextKey, TransitionKey};
