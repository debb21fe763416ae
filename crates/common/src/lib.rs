//! Shared value types: transforms, grid cells, colours.
//!
//! # Invariants
//! - Types here are plain data; no crate in the workspace keeps global state in them.

mod color;
mod types;

pub use color::Rgb;
pub use types::{CellCoord, Transform};
