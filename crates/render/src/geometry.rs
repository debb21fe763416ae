use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::Serialize;
use voxelscape_terrain::{FaceDir, Quad};

/// One vertex of a merged surface, laid out for direct GPU upload.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable, Serialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Corners of each face on a unit cube centred at the origin.
///
/// Order is top-left, top-right, bottom-left, bottom-right as seen from
/// outside, matching `QUAD_INDICES` and `uvs`.
#[rustfmt::skip]
fn corners(face: FaceDir) -> [[f32; 3]; 4] {
    let p = 0.5_f32;
    match face {
        FaceDir::PosX => [[ p,  p,  p], [ p,  p, -p], [ p, -p,  p], [ p, -p, -p]],
        FaceDir::NegX => [[-p,  p, -p], [-p,  p,  p], [-p, -p, -p], [-p, -p,  p]],
        FaceDir::Top  => [[-p,  p, -p], [ p,  p, -p], [-p,  p,  p], [ p,  p,  p]],
        FaceDir::PosZ => [[-p,  p,  p], [ p,  p,  p], [-p, -p,  p], [ p, -p,  p]],
        FaceDir::NegZ => [[ p,  p, -p], [-p,  p, -p], [ p, -p, -p], [-p, -p, -p]],
    }
}

const QUAD_INDICES: [u32; 6] = [0, 2, 1, 2, 3, 1];

/// Atlas lookup. Side faces use the lower half of the texture and the top
/// face the upper half.
fn uvs(face: FaceDir) -> [[f32; 2]; 4] {
    if face.is_lateral() {
        [[0.0, 0.5], [1.0, 0.5], [0.0, 0.0], [1.0, 0.0]]
    } else {
        [[0.0, 1.0], [1.0, 1.0], [0.0, 0.5], [1.0, 0.5]]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

/// Vertex and index buffers for a whole surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MergedGeometry {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Sphere around the centre of the vertex bounding box, reaching the
    /// farthest vertex. Empty geometry gives a zero sphere at the origin.
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let Some(first) = self.vertices.first() else {
            return BoundingSphere {
                center: Vec3::ZERO,
                radius: 0.0,
            };
        };
        let start = Vec3::from(first.position);
        let (min, max) = self
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .fold((start, start), |(lo, hi), p| (lo.min(p), hi.max(p)));
        let center = (min + max) * 0.5;
        let radius = self
            .vertices
            .iter()
            .map(|v| center.distance_squared(Vec3::from(v.position)))
            .fold(0.0_f32, f32::max)
            .sqrt();
        BoundingSphere { center, radius }
    }
}

/// Expand quads into one indexed triangle list, two triangles per quad.
pub fn merge_quads(quads: &[Quad], cell_size: f32) -> MergedGeometry {
    let _span = tracing::info_span!("merge_quads", quads = quads.len()).entered();
    let mut out = MergedGeometry {
        vertices: Vec::with_capacity(quads.len() * 4),
        indices: Vec::with_capacity(quads.len() * 6),
    };

    for quad in quads {
        let base = out.vertices.len() as u32;
        let normal = quad.face.normal().to_array();
        for (corner, uv) in corners(quad.face).into_iter().zip(uvs(quad.face)) {
            let position = quad.translation + Vec3::from(corner) * cell_size;
            out.vertices.push(Vertex {
                position: position.to_array(),
                normal,
                uv,
            });
        }
        out.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    tracing::debug!(
        vertices = out.vertices.len(),
        triangles = out.triangle_count(),
        "surface merged"
    );
    out
}
