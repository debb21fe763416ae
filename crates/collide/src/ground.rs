use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelscape_terrain::HeightField;

/// Eye clearance above the top of the terrain voxel under the viewer.
pub const TERRAIN_EYE_OFFSET: f32 = 50.0;

/// Keeps an orbiting eye and its target above a flat ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorClamp {
    pub ground_y: f32,
    /// Minimum eye height above the ground.
    pub min_eye: f32,
    /// Minimum target height above the ground.
    pub target_min: f32,
}

impl Default for FloorClamp {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            min_eye: 2.0,
            target_min: 0.5,
        }
    }
}

impl FloorClamp {
    /// Raise `eye` and `target` to their minimum heights. Returns whether
    /// either was moved.
    pub fn apply(&self, eye: &mut Vec3, target: &mut Vec3) -> bool {
        let mut moved = false;
        let eye_floor = self.ground_y + self.min_eye;
        if eye.y < eye_floor {
            eye.y = eye_floor;
            moved = true;
        }
        let target_floor = self.ground_y + self.target_min;
        if target.y < target_floor {
            target.y = target_floor;
            moved = true;
        }
        moved
    }
}

/// Minimum eye height over the terrain cell under `pos`.
///
/// The terrain is centred on the origin, so the cell index is
/// `floor((pos.x + width / 2 * cell_size) / cell_size)` and likewise for Z.
/// Returns `None` when `pos` is off the grid, where no floor applies.
pub fn terrain_floor(field: &HeightField, cell_size: f32, pos: Vec3, eye_offset: f32) -> Option<f32> {
    let half_width = field.width() as f32 / 2.0;
    let half_depth = field.depth() as f32 / 2.0;
    let x = ((pos.x + half_width * cell_size) / cell_size).floor();
    let z = ((pos.z + half_depth * cell_size) / cell_size).floor();
    if x.is_nan() || z.is_nan() {
        return None;
    }
    field
        .height(x as i32, z as i32)
        .map(|h| h as f32 * cell_size + eye_offset)
}
