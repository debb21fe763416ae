use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use voxelscape_common::{Rgb, Transform};
use voxelscape_input::MoveIntent;
use voxelscape_motion::{Flyover, OrbitRig};

use crate::{Scene, SceneKind, SceneSummary, scene_rng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    pub towers: usize,
    /// Towers are placed in `[-extent, extent)` on X and Z.
    pub extent: f32,
    /// Edge length of a tower's square footprint.
    pub footprint: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub eye: Vec3,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            towers: 500,
            extent: 800.0,
            footprint: 20.0,
            min_height: 10.0,
            max_height: 90.0,
            eye: Vec3::new(0.0, 200.0, -400.0),
        }
    }
}

/// A unit box scaled into a tower. Its base rests on `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tower {
    pub transform: Transform,
    pub color: Rgb,
}

impl Tower {
    pub fn height(&self) -> f32 {
        self.transform.scale.y
    }
}

/// Scene 2: a field of coloured towers seen from a map-style flyover.
#[derive(Debug, Clone)]
pub struct CityScene {
    pub towers: Vec<Tower>,
    pub rig: OrbitRig,
    pub flyover: Flyover,
}

impl CityScene {
    pub fn build(config: &CityConfig, seed: u64) -> Self {
        let _span = tracing::info_span!("city_scene", towers = config.towers, seed).entered();
        let mut rng = scene_rng(seed);
        let span = config.extent * 2.0;
        let rise = config.max_height - config.min_height;

        let towers = (0..config.towers)
            .map(|_| {
                let h = rng.random::<f32>();
                let s = 0.55 + 0.35 * rng.random::<f32>();
                let l = 0.45 + 0.30 * rng.random::<f32>();
                let color = Rgb::from_hsl(h, s, l);

                let x = rng.random::<f32>() * span - config.extent;
                let z = rng.random::<f32>() * span - config.extent;
                let height = rng.random::<f32>() * rise + config.min_height;

                Tower {
                    transform: Transform::from_translation(Vec3::new(x, 0.0, z)).with_scale(Vec3::new(
                        config.footprint,
                        height,
                        config.footprint,
                    )),
                    color,
                }
            })
            .collect();

        let flyover = Flyover::default();
        let mut rig = OrbitRig::new(config.eye, Vec3::ZERO);
        flyover.constrain(&mut rig);

        Self { towers, rig, flyover }
    }
}

impl Scene for CityScene {
    fn kind(&self) -> SceneKind {
        SceneKind::City
    }

    /// Map controls are external; the frame only re-applies the flyover limits.
    fn step(&mut self, _intent: &MoveIntent, _dt: f32) {
        self.flyover.constrain(&mut self.rig);
    }

    fn eye(&self) -> Vec3 {
        self.rig.eye
    }

    fn summary(&self) -> SceneSummary {
        SceneSummary {
            kind: self.kind(),
            objects: self.towers.len(),
            colliders: 0,
            eye: self.rig.eye,
            target: self.rig.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn towers_stay_in_bounds() {
        let scene = CityScene::build(&CityConfig::default(), 1);
        assert_eq!(scene.towers.len(), 500);
        for t in &scene.towers {
            let p = t.transform.position;
            assert!((-800.0..=800.0).contains(&p.x));
            assert!((-800.0..=800.0).contains(&p.z));
            assert_eq!(p.y, 0.0);
            assert!((10.0..=90.0).contains(&t.height()));
            assert_eq!(t.transform.scale.x, 20.0);
            assert_eq!(t.transform.scale.z, 20.0);
        }
    }

    #[test]
    fn colours_are_light_enough() {
        let scene = CityScene::build(&CityConfig::default(), 2);
        for t in &scene.towers {
            // Lightness >= 0.45 keeps the brightest channel at or above it.
            let max = t.color.r.max(t.color.g).max(t.color.b);
            assert!(max >= 0.45 - 1e-4, "{:?}", t.color);
        }
    }

    #[test]
    fn seed_pins_layout() {
        let a = CityScene::build(&CityConfig::default(), 42);
        let b = CityScene::build(&CityConfig::default(), 42);
        let c = CityScene::build(&CityConfig::default(), 43);
        assert_eq!(a.towers, b.towers);
        assert_ne!(a.towers, c.towers);
    }

    #[test]
    fn step_keeps_start_view() {
        let mut scene = CityScene::build(&CityConfig { towers: 3, ..CityConfig::default() }, 0);
        scene.step(&MoveIntent::forward(), 0.016);
        assert_eq!(scene.eye(), Vec3::new(0.0, 200.0, -400.0));
        assert_eq!(scene.summary().objects, 3);
    }

    #[test]
    fn built_view_is_above_ground() {
        let scene = CityScene::build(&CityConfig { towers: 0, ..CityConfig::default() }, 5);
        let summary = scene.summary();
        assert!(summary.target.y >= 0.5);
        assert!(summary.eye.y >= 2.0);
        assert_eq!(summary.eye, Vec3::new(0.0, 200.0, -400.0));
    }
}
