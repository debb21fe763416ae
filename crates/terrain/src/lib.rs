//! Terrain: fractal-noise heightfield generation and voxel surface meshing.
//!
//! # Invariants
//! - A `HeightField` is immutable once built; meshing only reads it.
//! - Given the same seed, generation followed by meshing is byte-identical.
//! - Meshing never queries a cell outside the grid for a height.

mod config;
mod heightfield;
mod mesher;
pub mod noise;

pub use config::TerrainConfig;
pub use heightfield::{HeightField, TerrainError, draw_seed_z, generate, generate_seeded, quantize};
pub use mesher::{FaceDir, Quad, mesh, mesh_with_cell_size, surface_hash};

/// Edge length of one voxel cell in world units.
pub const CELL_SIZE: f32 = 100.0;
