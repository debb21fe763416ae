use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use voxelscape_collide::{Aabb, ColliderSet};
use voxelscape_common::{Rgb, Transform};
use voxelscape_input::MoveIntent;
use voxelscape_motion::{LookCamera, Platformer, PlatformerConfig};

use crate::{Scene, SceneKind, SceneSummary, scene_rng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub cubes: usize,
    /// Cube edge length, also the placement grid step.
    pub size: f32,
    /// Grid slots per axis. X and Z are centred on the origin; Y starts at the floor.
    pub slots: u32,
    pub physics: PlatformerConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            cubes: 500,
            size: 20.0,
            slots: 20,
            physics: PlatformerConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub transform: Transform,
    pub size: f32,
    pub color: Rgb,
}

impl Cube {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.transform.position, Vec3::splat(self.size))
    }
}

/// Scene 4: stacked cubes to jump across in first person.
#[derive(Debug, Clone)]
pub struct PlatformScene {
    pub cubes: Vec<Cube>,
    pub colliders: ColliderSet,
    pub camera: LookCamera,
    pub player: Platformer,
}

impl PlatformScene {
    pub fn build(config: &PlatformConfig, seed: u64) -> Self {
        let _span = tracing::info_span!("platform_scene", cubes = config.cubes, seed).entered();
        let mut rng = scene_rng(seed);
        let slots = config.slots as f32;
        let half = slots / 2.0;
        let mut colliders = ColliderSet::new();

        let cubes = (0..config.cubes)
            .map(|_| {
                let hue = rng.random::<f32>() * 0.2 + 0.4;
                let light = rng.random::<f32>() * 0.3 + 0.45;
                let color = Rgb::from_hsl(hue, 0.8, light);

                let x = (rng.random::<f32>() * slots - half).floor() * config.size;
                let y = (rng.random::<f32>() * slots).floor() * config.size + config.size / 2.0;
                let z = (rng.random::<f32>() * slots - half).floor() * config.size;

                let cube = Cube {
                    transform: Transform::from_translation(Vec3::new(x, y, z)),
                    size: config.size,
                    color,
                };
                colliders.push_box(cube.bounds());
                cube
            })
            .collect();

        let camera = LookCamera::at(Vec3::new(0.0, config.physics.eye_floor, 0.0));
        Self {
            cubes,
            colliders,
            camera,
            player: Platformer::new(config.physics),
        }
    }
}

impl Scene for PlatformScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Platforms
    }

    fn step(&mut self, intent: &MoveIntent, dt: f32) {
        self.player.step(&mut self.camera, intent, dt, &self.colliders);
    }

    fn eye(&self) -> Vec3 {
        self.camera.position
    }

    fn summary(&self) -> SceneSummary {
        SceneSummary {
            kind: self.kind(),
            objects: self.cubes.len(),
            colliders: self.colliders.len(),
            eye: self.camera.position,
            target: self.camera.position + self.camera.forward(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubes_snap_to_grid() {
        let scene = PlatformScene::build(&PlatformConfig::default(), 21);
        assert_eq!(scene.cubes.len(), 500);
        for c in &scene.cubes {
            let p = c.transform.position;
            assert_eq!(p.x % 20.0, 0.0);
            assert_eq!(p.z % 20.0, 0.0);
            assert!((-200.0..=180.0).contains(&p.x));
            assert!((-200.0..=180.0).contains(&p.z));
            assert_eq!((p.y - 10.0) % 20.0, 0.0);
            assert!((10.0..=390.0).contains(&p.y));
        }
    }

    #[test]
    fn colliders_match_cubes() {
        let scene = PlatformScene::build(&PlatformConfig::default(), 22);
        assert_eq!(scene.colliders.boxes().len(), scene.cubes.len());
        for (c, b) in scene.cubes.iter().zip(scene.colliders.boxes()) {
            assert_eq!(b.center(), c.transform.position);
            assert_eq!(b.max - b.min, Vec3::splat(20.0));
        }
    }

    #[test]
    fn colours_are_green_to_blue() {
        let scene = PlatformScene::build(&PlatformConfig::default(), 23);
        for c in &scene.cubes {
            // Hue in [0.4, 0.6): red is never the dominant channel.
            assert!(c.color.r < c.color.g.max(c.color.b));
        }
    }

    #[test]
    fn player_starts_on_the_floor() {
        let mut scene = PlatformScene::build(&PlatformConfig { cubes: 0, ..PlatformConfig::default() }, 0);
        assert_eq!(scene.eye(), Vec3::new(0.0, 10.0, 0.0));
        for _ in 0..10 {
            scene.step(&MoveIntent::forward(), 1.0 / 60.0);
        }
        assert_eq!(scene.eye().y, 10.0);
        assert!(scene.eye().z < 0.0);
        assert!(scene.colliders.is_empty());
    }
}
