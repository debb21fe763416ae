use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use voxelscape_collide::{Circle, ColliderSet};
use voxelscape_common::Transform;
use voxelscape_input::MoveIntent;
use voxelscape_motion::{OrbitRig, PyramidWalker};

use crate::{Scene, SceneKind, SceneSummary, scene_rng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidConfig {
    pub pyramids: usize,
    pub extent: f32,
    pub base_radius: f32,
    pub height: f32,
    /// Added to the base radius to form the collision circle.
    pub collider_margin: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            pyramids: 500,
            extent: 800.0,
            base_radius: 16.0,
            height: 30.0,
            collider_margin: 2.0,
            eye: Vec3::new(60.0, 10.0, 60.0),
            target: Vec3::new(0.0, 10.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PyramidTexture {
    Primary,
    Secondary,
}

/// A four-sided cone centred half its height above the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pyramid {
    pub transform: Transform,
    pub texture: PyramidTexture,
}

/// Scene 3: a desert of pyramids walked through at ground level.
#[derive(Debug, Clone)]
pub struct PyramidScene {
    pub pyramids: Vec<Pyramid>,
    pub colliders: ColliderSet,
    pub rig: OrbitRig,
    pub walker: PyramidWalker,
}

impl PyramidScene {
    pub fn build(config: &PyramidConfig, seed: u64) -> Self {
        let _span = tracing::info_span!("pyramid_scene", pyramids = config.pyramids, seed).entered();
        let mut rng = scene_rng(seed);
        let span = config.extent * 2.0;
        let mut colliders = ColliderSet::new();

        let pyramids = (0..config.pyramids)
            .map(|_| {
                let texture = if rng.random::<f32>() > 0.5 {
                    PyramidTexture::Primary
                } else {
                    PyramidTexture::Secondary
                };
                let x = rng.random::<f32>() * span - config.extent;
                let z = rng.random::<f32>() * span - config.extent;
                let yaw = rng.random::<f32>() * PI;

                colliders.push_circle(Circle::new(x, z, config.base_radius + config.collider_margin));
                Pyramid {
                    transform: Transform::from_translation(Vec3::new(x, config.height / 2.0, z)).with_yaw(yaw),
                    texture,
                }
            })
            .collect();

        let walker = PyramidWalker::default();
        let mut eye = config.eye;
        let mut target = config.target;
        eye.y = walker.eye_height;
        target.y = walker.eye_height;

        Self {
            pyramids,
            colliders,
            rig: OrbitRig::new(eye, target),
            walker,
        }
    }
}

impl Scene for PyramidScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Pyramids
    }

    /// Per-frame speeds; `dt` is not used.
    fn step(&mut self, intent: &MoveIntent, _dt: f32) {
        self.walker.step(&mut self.rig, intent, &self.colliders);
    }

    fn eye(&self) -> Vec3 {
        self.rig.eye
    }

    fn summary(&self) -> SceneSummary {
        SceneSummary {
            kind: self.kind(),
            objects: self.pyramids.len(),
            colliders: self.colliders.len(),
            eye: self.rig.eye,
            target: self.rig.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_collider_per_pyramid() {
        let scene = PyramidScene::build(&PyramidConfig::default(), 11);
        assert_eq!(scene.pyramids.len(), 500);
        assert_eq!(scene.colliders.circles().len(), 500);
        for (p, c) in scene.pyramids.iter().zip(scene.colliders.circles()) {
            assert_eq!(c.center.x, p.transform.position.x);
            assert_eq!(c.center.y, p.transform.position.z);
            assert_eq!(c.radius, 18.0);
            assert_eq!(p.transform.position.y, 15.0);
        }
    }

    #[test]
    fn yaw_is_a_half_turn_at_most() {
        let scene = PyramidScene::build(&PyramidConfig::default(), 12);
        for p in &scene.pyramids {
            let (axis, angle) = p.transform.rotation.to_axis_angle();
            assert!(angle <= PI + 1e-4);
            if angle > 1e-4 {
                assert!((axis - Vec3::Y).length() < 1e-3);
            }
        }
    }

    #[test]
    fn both_textures_are_used() {
        let scene = PyramidScene::build(&PyramidConfig::default(), 13);
        let primary = scene.pyramids.iter().filter(|p| p.texture == PyramidTexture::Primary).count();
        assert!(primary > 0 && primary < 500);
    }

    #[test]
    fn walk_never_enters_a_pyramid() {
        let config = PyramidConfig {
            pyramids: 200,
            extent: 200.0,
            ..PyramidConfig::default()
        };
        let mut scene = PyramidScene::build(&config, 14);
        for _ in 0..300 {
            scene.step(&MoveIntent::forward(), 1.0 / 60.0);
            assert_eq!(scene.eye().y, 10.0);
        }
        // The last circle in the set is always resolved last.
        let last = scene.colliders.circles()[199];
        let d = glam::Vec2::new(scene.eye().x, scene.eye().z).distance(last.center);
        assert!(d >= last.radius + 3.0 - 1e-3);
    }
}
