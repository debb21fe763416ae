//! Motion: per-frame controllers that turn a `MoveIntent` into camera motion.
//!
//! # Invariants
//! - Controllers hold only their own state; scene data is passed in each frame.
//! - Collision handling only adjusts the candidate position, never the scene.
//!
//! Camera motion here is not part of any deterministic replay; a controller
//! is deterministic for a fixed sequence of intents and `dt` values.

pub mod camera;
mod flyover;
mod platformer;
mod walker;

pub use camera::{LookCamera, OrbitRig};
pub use flyover::Flyover;
pub use platformer::{Platformer, PlatformerConfig};
pub use walker::{PyramidWalker, TerrainWalker};
