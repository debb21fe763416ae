//! Rendering Adapter: renderer-agnostic interface over voxel surface quads.
//!
//! # Invariants
//! - Renderers only read quads and a view; they never touch the heightfield.
//! - Vertex materialisation happens here, not in the mesher.
//!
//! Draw submission itself is external. `DebugTextRenderer` and
//! `GeometryRenderer` cover text output and upload-ready buffers; a GPU
//! backend plugs in behind the same trait.

mod geometry;
mod renderer;

pub use geometry::{BoundingSphere, MergedGeometry, Vertex, merge_quads};
pub use renderer::{DebugTextRenderer, GeometryRenderer, RenderView, Renderer};
