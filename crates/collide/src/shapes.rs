use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// A vertical cylinder of infinite height, stored as a circle on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre as `(x, z)`.
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, z: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, z),
            radius,
        }
    }

    /// Whether the XZ projection of `p` lies strictly inside the circle.
    pub fn contains_xz(&self, p: Vec3) -> bool {
        Vec2::new(p.x, p.z).distance_squared(self.center) < self.radius * self.radius
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box of the given full size centred at `center`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Closest point on or inside the box to `p`.
    pub fn clamp_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }

    /// Whether a sphere touches the box (touching counts).
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.clamp_point(center).distance_squared(center) <= radius * radius
    }

    /// Whether a ray cast straight down from `origin`, `length` units long,
    /// touches the box.
    pub fn hit_by_ray_down(&self, origin: Vec3, length: f32) -> bool {
        let within_xz = origin.x >= self.min.x
            && origin.x <= self.max.x
            && origin.z >= self.min.z
            && origin.z <= self.max.z;
        within_xz && self.min.y <= origin.y && self.max.y >= origin.y - length
    }
}
