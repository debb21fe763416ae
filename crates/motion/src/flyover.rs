use serde::{Deserialize, Serialize};
use voxelscape_collide::FloorClamp;

use crate::camera::OrbitRig;

/// Constraints for a map-style flyover camera.
///
/// Panning and zooming belong to the external map controls; this only keeps
/// the result inside the allowed distance band and above the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyover {
    pub min_distance: f32,
    pub max_distance: f32,
    pub floor: FloorClamp,
}

impl Default for Flyover {
    fn default() -> Self {
        Self {
            min_distance: 100.0,
            max_distance: 500.0,
            floor: FloorClamp::default(),
        }
    }
}

impl Flyover {
    /// Apply the distance band, then the floor clamp.
    pub fn constrain(&self, rig: &mut OrbitRig) {
        let offset = rig.eye - rig.target;
        let len = offset.length();
        if len > 0.0 {
            let clamped = len.clamp(self.min_distance, self.max_distance);
            if clamped != len {
                rig.eye = rig.target + offset / len * clamped;
            }
        }
        self.floor.apply(&mut rig.eye, &mut rig.target);
    }
}
