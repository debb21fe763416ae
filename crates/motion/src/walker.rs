use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelscape_collide::{ColliderSet, TERRAIN_EYE_OFFSET, terrain_floor};
use voxelscape_input::MoveIntent;
use voxelscape_terrain::{CELL_SIZE, HeightField};

use crate::camera::OrbitRig;

/// Free walker over voxel terrain.
///
/// Moves eye and orbit target together at a fixed speed along the flat view
/// basis, then keeps the eye above the voxel under it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainWalker {
    /// Units per second.
    pub speed: f32,
    pub cell_size: f32,
    pub eye_offset: f32,
}

impl Default for TerrainWalker {
    fn default() -> Self {
        Self {
            speed: 400.0,
            cell_size: CELL_SIZE,
            eye_offset: TERRAIN_EYE_OFFSET,
        }
    }
}

impl TerrainWalker {
    pub fn step(&self, rig: &mut OrbitRig, intent: &MoveIntent, dt: f32, field: &HeightField) {
        let (forward, right) = rig.flat_basis();
        let dir = forward * intent.forward + right * intent.strafe;
        if dir.length_squared() > 0.0 {
            rig.translate(dir.normalize() * self.speed * dt);
        }

        if let Some(min_y) = terrain_floor(field, self.cell_size, rig.eye, self.eye_offset) {
            if rig.eye.y < min_y {
                tracing::trace!(min_y, "eye clamped to terrain");
                rig.eye.y = min_y;
            }
        }
    }
}

/// Ground-level walker among circular obstacles.
///
/// Speeds are per frame. Eye and target stay pinned at `eye_height`; any
/// push-out applied to the eye is applied to the target as well.
/// Forward and back held together cancel, so the walker stands still.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PyramidWalker {
    /// Units per frame.
    pub speed: f32,
    pub sprint_multiplier: f32,
    pub radius: f32,
    pub eye_height: f32,
}

impl Default for PyramidWalker {
    fn default() -> Self {
        Self {
            speed: 1.6,
            sprint_multiplier: 1.8,
            radius: 3.0,
            eye_height: 10.0,
        }
    }
}

impl PyramidWalker {
    pub fn step(&self, rig: &mut OrbitRig, intent: &MoveIntent, colliders: &ColliderSet) {
        if !intent.is_moving() {
            return;
        }
        let speed = if intent.sprint {
            self.speed * self.sprint_multiplier
        } else {
            self.speed
        };

        let (forward, right) = rig.flat_basis();
        let delta = forward * (intent.forward * speed) + right * (intent.strafe * speed);

        let before = rig.eye;
        let corrected = colliders.resolve_circles_xz(before + delta, self.radius);
        let correction = Vec3::new(corrected.x - before.x, 0.0, corrected.z - before.z);

        rig.eye.x = corrected.x;
        rig.eye.z = corrected.z;
        rig.target += correction;

        rig.eye.y = self.eye_height;
        rig.target.y = self.eye_height;
    }
}
