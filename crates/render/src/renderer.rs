use glam::Vec3;
use voxelscape_terrain::{CELL_SIZE, FaceDir, Quad};

use crate::geometry::{MergedGeometry, merge_quads};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 200.0, 500.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

impl RenderView {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            target,
            ..Self::default()
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the surface quads and a view configuration, then
/// produces output.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given surface and view.
    fn render(&self, quads: &[Quad], view: &RenderView) -> Self::Output;
}

/// Human-readable summary of a surface: quad counts per face and the camera.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, quads: &[Quad], view: &RenderView) -> String {
        let mut counts = [0usize; 5];
        for q in quads {
            counts[q.face.tag() as usize] += 1;
        }

        let mut out = String::new();
        out.push_str(&format!("=== Voxel Surface (quads={}) ===\n", quads.len()));
        for face in [FaceDir::Top, FaceDir::PosX, FaceDir::NegX, FaceDir::PosZ, FaceDir::NegZ] {
            out.push_str(&format!("  {:<4} {}\n", label(face), counts[face.tag() as usize]));
        }
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z, view.fov_degrees
        ));
        out
    }
}

fn label(face: FaceDir) -> &'static str {
    match face {
        FaceDir::Top => "top",
        FaceDir::PosX => "+x",
        FaceDir::NegX => "-x",
        FaceDir::PosZ => "+z",
        FaceDir::NegZ => "-z",
    }
}

/// Produces upload-ready buffers; the view does not affect the output.
#[derive(Debug, Clone, Copy)]
pub struct GeometryRenderer {
    pub cell_size: f32,
}

impl Default for GeometryRenderer {
    fn default() -> Self {
        Self { cell_size: CELL_SIZE }
    }
}

impl Renderer for GeometryRenderer {
    type Output = MergedGeometry;

    fn render(&self, quads: &[Quad], _view: &RenderView) -> MergedGeometry {
        merge_quads(quads, self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelscape_terrain::{HeightField, mesh};

    #[test]
    fn debug_renderer_empty_surface() {
        let output = DebugTextRenderer::new().render(&[], &RenderView::default());
        assert!(output.contains("quads=0"));
        assert!(output.contains("fov=60"));
    }

    #[test]
    fn debug_renderer_counts_faces() {
        // Flat 2x2: four tops and the eight-quad boundary ring.
        let field = HeightField::from_raw(2, 2, vec![0.0; 4]).unwrap();
        let quads = mesh(&field);
        let output = DebugTextRenderer::new().render(&quads, &RenderView::default());

        assert!(output.contains("quads=12"));
        assert!(output.contains("top  4"));
        assert!(output.contains("+x   2"));
        assert!(output.contains("-z   2"));
        assert_eq!(output.lines().count(), 7);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn geometry_renderer_merges() {
        let field = HeightField::from_raw(1, 1, vec![0.0]).unwrap();
        let quads = mesh(&field);
        let g = GeometryRenderer::default().render(&quads, &RenderView::default());
        assert_eq!(g.vertices.len(), 5 * 4);
        assert_eq!(g.indices.len(), 5 * 6);
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 60.0);
        assert_eq!(view.target, Vec3::ZERO);
    }
}
