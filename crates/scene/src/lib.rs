//! Scenes: seeded setup of the four demo worlds and their per-frame stepping.
//!
//! # Invariants
//! - Setup is a pure function of its config and seed; there is no global state.
//! - Collider sets are built once during setup and only read afterwards.
//! - Random draws happen in a fixed order per object, so a seed pins the layout.

mod city;
mod platforms;
mod pyramids;
mod voxel;

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use voxelscape_input::MoveIntent;

pub use city::{CityConfig, CityScene, Tower};
pub use platforms::{Cube, PlatformConfig, PlatformScene};
pub use pyramids::{Pyramid, PyramidConfig, PyramidScene, PyramidTexture};
pub use voxel::VoxelScene;

/// Generator used for every scene layout.
pub type SceneRng = Pcg64Mcg;

pub fn scene_rng(seed: u64) -> SceneRng {
    Pcg64Mcg::seed_from_u64(seed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    Voxel,
    City,
    Pyramids,
    Platforms,
}

impl SceneKind {
    pub const ALL: [SceneKind; 4] = [
        SceneKind::Voxel,
        SceneKind::City,
        SceneKind::Pyramids,
        SceneKind::Platforms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Voxel => "voxel",
            SceneKind::City => "city",
            SceneKind::Pyramids => "pyramids",
            SceneKind::Platforms => "platforms",
        }
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown scene: {s}"))
    }
}

/// Counts and camera placement of a built scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub kind: SceneKind,
    /// Renderable objects (quads for the voxel scene).
    pub objects: usize,
    pub colliders: usize,
    pub eye: Vec3,
    pub target: Vec3,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} objects, {} colliders, eye ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
            self.kind,
            self.objects,
            self.colliders,
            self.eye.x,
            self.eye.y,
            self.eye.z,
            self.target.x,
            self.target.y,
            self.target.z,
        )
    }
}

/// A built scene that can be advanced frame by frame.
pub trait Scene {
    fn kind(&self) -> SceneKind;

    /// Advance the scene's controller by one frame.
    fn step(&mut self, intent: &MoveIntent, dt: f32);

    /// Current viewer position.
    fn eye(&self) -> Vec3;

    fn summary(&self) -> SceneSummary;
}
