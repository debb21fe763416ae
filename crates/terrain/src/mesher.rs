use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelscape_common::CellCoord;

use crate::CELL_SIZE;
use crate::heightfield::HeightField;

/// Which side of a voxel a quad faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceDir {
    Top,
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl FaceDir {
    /// Lateral faces in emission order.
    pub const LATERAL: [FaceDir; 4] = [FaceDir::PosX, FaceDir::NegX, FaceDir::PosZ, FaceDir::NegZ];

    /// Grid offset to the neighbour this face looks at. `Top` has none.
    pub fn offset(self) -> (i32, i32) {
        match self {
            FaceDir::Top => (0, 0),
            FaceDir::PosX => (1, 0),
            FaceDir::NegX => (-1, 0),
            FaceDir::PosZ => (0, 1),
            FaceDir::NegZ => (0, -1),
        }
    }

    pub fn normal(self) -> Vec3 {
        match self {
            FaceDir::Top => Vec3::Y,
            FaceDir::PosX => Vec3::X,
            FaceDir::NegX => Vec3::NEG_X,
            FaceDir::PosZ => Vec3::Z,
            FaceDir::NegZ => Vec3::NEG_Z,
        }
    }

    pub fn is_lateral(self) -> bool {
        self != FaceDir::Top
    }

    /// The face pointing the other way along the same axis.
    pub fn opposite(self) -> Option<FaceDir> {
        match self {
            FaceDir::Top => None,
            FaceDir::PosX => Some(FaceDir::NegX),
            FaceDir::NegX => Some(FaceDir::PosX),
            FaceDir::PosZ => Some(FaceDir::NegZ),
            FaceDir::NegZ => Some(FaceDir::PosZ),
        }
    }

    /// Stable numeric id in emission order, also the first byte of `Quad::to_le_bytes`.
    pub fn tag(self) -> u8 {
        match self {
            FaceDir::Top => 0,
            FaceDir::PosX => 1,
            FaceDir::NegX => 2,
            FaceDir::PosZ => 3,
            FaceDir::NegZ => 4,
        }
    }
}

/// One exposed voxel face: a direction plus the translation of its voxel.
///
/// Vertex data is left to the renderer; the face sits on the surface of a
/// `cell_size` cube centred at `translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub face: FaceDir,
    pub cell: CellCoord,
    pub height: i32,
    pub translation: Vec3,
}

impl Quad {
    /// Stable little-endian encoding, used for byte-level comparisons.
    pub fn to_le_bytes(&self) -> [u8; 25] {
        let mut out = [0u8; 25];
        out[0] = self.face.tag();
        out[1..5].copy_from_slice(&self.cell.x.to_le_bytes());
        out[5..9].copy_from_slice(&self.cell.z.to_le_bytes());
        out[9..13].copy_from_slice(&self.height.to_le_bytes());
        out[13..17].copy_from_slice(&self.translation.x.to_le_bytes());
        out[17..21].copy_from_slice(&self.translation.y.to_le_bytes());
        out[21..25].copy_from_slice(&self.translation.z.to_le_bytes());
        out
    }
}

/// Mesh with the default 100-unit cells.
pub fn mesh(field: &HeightField) -> Vec<Quad> {
    mesh_with_cell_size(field, CELL_SIZE)
}

/// Emit one top quad per cell plus every exposed lateral quad.
///
/// A lateral face is exposed when its neighbour is off the grid, or when the
/// neighbour is neither level with this cell nor exactly one step higher. The
/// one-step case is left to the neighbour's own opposite face.
pub fn mesh_with_cell_size(field: &HeightField, cell_size: f32) -> Vec<Quad> {
    let _span =
        tracing::info_span!("mesh_surface", width = field.width(), depth = field.depth()).entered();

    let half_width = field.width() as f32 / 2.0;
    let half_depth = field.depth() as f32 / 2.0;

    let mut quads = Vec::with_capacity(field.len() * 2);
    for (cell, h) in field.cells() {
        let translation = Vec3::new(
            cell.x as f32 * cell_size - half_width * cell_size,
            h as f32 * cell_size,
            cell.z as f32 * cell_size - half_depth * cell_size,
        );
        let quad = |face| Quad {
            face,
            cell,
            height: h,
            translation,
        };

        quads.push(quad(FaceDir::Top));
        for face in FaceDir::LATERAL {
            let (dx, dz) = face.offset();
            let exposed = match field.height(cell.x + dx, cell.z + dz) {
                None => true,
                Some(n) => n != h && n != h + 1,
            };
            if exposed {
                quads.push(quad(face));
            }
        }
    }

    tracing::debug!(quads = quads.len(), "surface meshed");
    quads
}

/// FNV-1a over the byte encoding of every quad, in order.
pub fn surface_hash(quads: &[Quad]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for quad in quads {
        for b in quad.to_le_bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
    }
    h
}
