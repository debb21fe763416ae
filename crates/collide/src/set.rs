use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::shapes::{Aabb, Circle};

/// Distance substituted when a point sits exactly on a circle centre, so the
/// push-out direction stays defined.
const MIN_SEPARATION: f32 = 0.0001;

/// Static colliders for one scene.
///
/// Circles are resolved in insertion order; boxes only answer yes/no queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColliderSet {
    circles: Vec<Circle>,
    boxes: Vec<Aabb>,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_circle(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    pub fn push_box(&mut self, aabb: Aabb) {
        self.boxes.push(aabb);
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn boxes(&self) -> &[Aabb] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.circles.len() + self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty() && self.boxes.is_empty()
    }

    /// Push `pos` out of every circle it overlaps, treating the player as a
    /// circle of `player_radius`. Y is left untouched.
    ///
    /// Each overlapping circle moves the point radially to exactly
    /// `circle.radius + player_radius` from its centre. Circles are visited
    /// once, in order, so a push out of one circle may land inside a later one.
    pub fn resolve_circles_xz(&self, pos: Vec3, player_radius: f32) -> Vec3 {
        let mut p = Vec2::new(pos.x, pos.z);
        for c in &self.circles {
            let delta = p - c.center;
            let min_dist = c.radius + player_radius;
            let dist_sq = delta.length_squared();
            if dist_sq < min_dist * min_dist {
                let dist = match dist_sq.sqrt() {
                    d if d > 0.0 => d,
                    _ => MIN_SEPARATION,
                };
                p = c.center + delta / dist * min_dist;
                tracing::trace!(x = p.x, z = p.y, "pushed out of circle");
            }
        }
        Vec3::new(p.x, pos.y, p.y)
    }

    /// Whether a sphere at `center` overlaps any box.
    pub fn collides_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.boxes.iter().any(|b| b.intersects_sphere(center, radius))
    }

    /// Whether a downward ray from `origin` reaches any box within `length`.
    pub fn ray_down_hits(&self, origin: Vec3, length: f32) -> bool {
        self.boxes.iter().any(|b| b.hit_by_ray_down(origin, length))
    }

    /// Whether the XZ projection of `p` lies inside any circle.
    pub fn inside_any_circle(&self, p: Vec3) -> bool {
        self.circles.iter().any(|c| c.contains_xz(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn empty_set_changes_nothing() {
        let set = ColliderSet::new();
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(set.is_empty());
        assert_eq!(set.resolve_circles_xz(p, 3.0), p);
        assert!(!set.collides_sphere(p, 100.0));
        assert!(!set.ray_down_hits(p, 100.0));
    }

    #[test]
    fn push_out_lands_on_boundary() {
        let mut set = ColliderSet::new();
        set.push_circle(Circle::new(0.0, 0.0, 18.0));

        let out = set.resolve_circles_xz(Vec3::new(10.0, 7.0, 0.0), 3.0);
        assert!(approx(out.x, 21.0));
        assert!(approx(out.z, 0.0));
        assert_eq!(out.y, 7.0);
    }

    #[test]
    fn outside_points_are_untouched() {
        let mut set = ColliderSet::new();
        set.push_circle(Circle::new(0.0, 0.0, 18.0));
        let p = Vec3::new(30.0, 10.0, 0.0);
        assert_eq!(set.resolve_circles_xz(p, 3.0), p);
        // Exactly at the combined radius counts as free.
        let edge = Vec3::new(21.0, 10.0, 0.0);
        assert_eq!(set.resolve_circles_xz(edge, 3.0), edge);
    }

    #[test]
    fn point_on_centre_still_resolves() {
        let mut set = ColliderSet::new();
        set.push_circle(Circle::new(5.0, 5.0, 2.0));
        let out = set.resolve_circles_xz(Vec3::new(5.0, 0.0, 5.0), 1.0);
        assert!(out.x.is_finite() && out.z.is_finite());
    }

    #[test]
    fn circles_resolve_in_order() {
        let mut set = ColliderSet::new();
        set.push_circle(Circle::new(0.0, 0.0, 5.0));
        set.push_circle(Circle::new(10.0, 0.0, 5.0));
        // Out of the first circle to x=6, then the second pushes back to x=4,
        // which is inside the first again: one pass, no iteration.
        let out = set.resolve_circles_xz(Vec3::new(1.0, 0.0, 0.0), 1.0);
        assert!(approx(out.x, 4.0));
        assert!(set.inside_any_circle(out));
    }

    #[test]
    fn sphere_and_ray_queries() {
        let mut set = ColliderSet::new();
        set.push_box(Aabb::from_center_size(Vec3::new(0.0, 10.0, 0.0), Vec3::splat(20.0)));
        set.push_box(Aabb::from_center_size(Vec3::new(100.0, 10.0, 0.0), Vec3::splat(20.0)));
        assert_eq!(set.len(), 2);

        assert!(set.collides_sphere(Vec3::new(15.0, 10.0, 0.0), 10.0));
        assert!(!set.collides_sphere(Vec3::new(50.0, 10.0, 0.0), 10.0));

        assert!(set.ray_down_hits(Vec3::new(100.0, 25.0, 0.0), 10.0));
        assert!(!set.ray_down_hits(Vec3::new(50.0, 25.0, 0.0), 10.0));
    }
}
