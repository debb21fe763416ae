//! Input: keyboard state mapped to a movement intent.
//!
//! # Invariants
//! - Controllers consume `MoveIntent`, never raw key events.
//! - Key state is an explicit value owned by the caller; nothing is global.

pub mod action;

pub use action::{InputError, Key, KeyState, MoveIntent};
