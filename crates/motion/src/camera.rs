use glam::{Mat4, Vec3};

/// Forward direction flattened onto the XZ plane, and the right vector
/// `forward x up`. Both are zero when `forward` is vertical.
pub fn flat_basis(forward: Vec3) -> (Vec3, Vec3) {
    let flat = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    let right = flat.cross(Vec3::Y).normalize_or_zero();
    (flat, right)
}

/// First-person camera with position, yaw, pitch.
///
/// Yaw is measured from +X toward +Z, so the default yaw of -90 degrees
/// looks down -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub sensitivity: f32,
}

impl Default for LookCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 1000.0,
            sensitivity: 0.002,
        }
    }
}

impl LookCamera {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Camera at `eye` oriented toward `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        let mut cam = Self::at(eye);
        let dir = (target - eye).normalize_or_zero();
        if dir != Vec3::ZERO {
            cam.yaw = dir.z.atan2(dir.x);
            cam.pitch = dir.y.clamp(-1.0, 1.0).asin();
        }
        cam
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Forward projected on the ground plane.
    pub fn flat_forward(&self) -> Vec3 {
        flat_basis(self.forward()).0
    }

    pub fn right(&self) -> Vec3 {
        flat_basis(self.forward()).1
    }

    /// Mouse-look by a pointer delta in pixels.
    pub fn look(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Eye and orbit target moved as a pair, as orbit and map controls expect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub eye: Vec3,
    pub target: Vec3,
}

impl OrbitRig {
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        Self { eye, target }
    }

    /// Flat forward and right vectors of the current view direction.
    pub fn flat_basis(&self) -> (Vec3, Vec3) {
        flat_basis(self.target - self.eye)
    }

    /// Shift eye and target together.
    pub fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.target += delta;
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = LookCamera::default();
        assert!(close(cam.forward(), Vec3::NEG_Z));
        assert!(close(cam.right(), Vec3::X));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn looking_at_points_to_target() {
        let cam = LookCamera::looking_at(Vec3::new(60.0, 10.0, 60.0), Vec3::new(0.0, 10.0, 0.0));
        let expected = Vec3::new(-1.0, 0.0, -1.0).normalize();
        assert!(close(cam.forward(), expected));
    }

    #[test]
    fn flat_forward_ignores_pitch() {
        let mut cam = LookCamera::default();
        cam.look(0.0, -200.0);
        assert!(cam.pitch > 0.0);
        assert!(close(cam.flat_forward(), Vec3::NEG_Z));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = LookCamera::default();
        cam.look(0.0, -1.0e6);
        assert!(cam.pitch <= 89.0_f32.to_radians() + 1e-6);
    }

    #[test]
    fn vertical_view_has_no_flat_basis() {
        let (f, r) = flat_basis(Vec3::Y);
        assert_eq!(f, Vec3::ZERO);
        assert_eq!(r, Vec3::ZERO);
    }

    #[test]
    fn orbit_rig_translates_pair() {
        let mut rig = OrbitRig::new(Vec3::new(0.0, 200.0, 500.0), Vec3::ZERO);
        let before = rig.distance();
        rig.translate(Vec3::new(10.0, 0.0, -10.0));
        assert_eq!(rig.target, Vec3::new(10.0, 0.0, -10.0));
        assert!((rig.distance() - before).abs() < 1e-3);
        let (f, _) = rig.flat_basis();
        assert!(close(f, Vec3::NEG_Z));
    }
}
