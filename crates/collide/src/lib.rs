//! Collision queries for the walker scenes.
//!
//! # Invariants
//! - Collider sets are built once at scene setup and only read afterwards.
//! - Queries never move colliders; resolution only adjusts the candidate point.
//!
//! Resolution is positional: candidate points are pushed or clamped toward the
//! free region. There is no impulse or contact model.

mod ground;
mod set;
mod shapes;

pub use ground::{FloorClamp, TERRAIN_EYE_OFFSET, terrain_floor};
pub use set::ColliderSet;
pub use shapes::{Aabb, Circle};
