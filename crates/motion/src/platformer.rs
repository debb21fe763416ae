use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelscape_collide::ColliderSet;
use voxelscape_input::MoveIntent;

use crate::camera::LookCamera;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    /// Fraction of planar velocity lost per second.
    pub damping: f32,
    pub gravity: f32,
    pub acceleration: f32,
    pub jump_impulse: f32,
    /// Radius of the player sphere tested against boxes.
    pub radius: f32,
    /// Lowest eye height; reaching it counts as landing.
    pub eye_floor: f32,
    /// Length of the downward grounding ray, cast from `eye - ground_probe`.
    pub ground_probe: f32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            damping: 10.0,
            gravity: 980.0,
            acceleration: 400.0,
            jump_impulse: 350.0,
            radius: 10.0,
            eye_floor: 10.0,
            ground_probe: 10.0,
        }
    }
}

/// First-person controller with gravity, jumping and box collisions.
///
/// `velocity` is kept in the camera's local frame: `x` along the flat right
/// vector, `z` along the flat forward vector, `y` world-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Platformer {
    pub config: PlatformerConfig,
    velocity: Vec3,
    can_jump: bool,
}

impl Default for Platformer {
    fn default() -> Self {
        Self::new(PlatformerConfig::default())
    }
}

impl Platformer {
    pub fn new(config: PlatformerConfig) -> Self {
        Self {
            config,
            velocity: Vec3::ZERO,
            can_jump: false,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Start a jump if standing on something. Returns whether it fired.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.velocity.y += self.config.jump_impulse;
        self.can_jump = false;
        true
    }

    pub fn step(&mut self, camera: &mut LookCamera, intent: &MoveIntent, dt: f32, colliders: &ColliderSet) {
        let cfg = self.config;
        if intent.jump && self.jump() {
            tracing::trace!(vy = self.velocity.y, "jump");
        }

        let probe = camera.position - Vec3::Y * cfg.ground_probe;
        let on_object = colliders.ray_down_hits(probe, cfg.ground_probe);

        self.velocity.x -= self.velocity.x * cfg.damping * dt;
        self.velocity.z -= self.velocity.z * cfg.damping * dt;
        self.velocity.y -= cfg.gravity * dt;

        let dir = Vec3::new(intent.strafe, 0.0, intent.forward).normalize_or_zero();
        if intent.forward != 0.0 {
            self.velocity.z += dir.z * cfg.acceleration * dt;
        }
        if intent.strafe != 0.0 {
            self.velocity.x += dir.x * cfg.acceleration * dt;
        }

        if on_object {
            self.velocity.y = self.velocity.y.max(0.0);
            self.can_jump = true;
        }

        let forward = camera.flat_forward();
        let right = camera.right();
        let mut current = camera.position;

        // Right first, then forward; a blocked axis loses its velocity.
        let disp_right = self.velocity.x * dt;
        if disp_right != 0.0 {
            let candidate = current + right * disp_right;
            if colliders.collides_sphere(candidate, cfg.radius) {
                self.velocity.x = 0.0;
            } else {
                current = candidate;
            }
        }
        let disp_forward = self.velocity.z * dt;
        if disp_forward != 0.0 {
            let candidate = current + forward * disp_forward;
            if colliders.collides_sphere(candidate, cfg.radius) {
                self.velocity.z = 0.0;
            } else {
                current = candidate;
            }
        }

        camera.position.x = current.x;
        camera.position.z = current.z;
        camera.position.y += self.velocity.y * dt;

        if camera.position.y < cfg.eye_floor {
            self.velocity.y = 0.0;
            camera.position.y = cfg.eye_floor;
            self.can_jump = true;
        }
    }
}
