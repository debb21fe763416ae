use glam::Vec3;
use voxelscape_input::MoveIntent;
use voxelscape_motion::{OrbitRig, TerrainWalker};
use voxelscape_terrain::{HeightField, Quad, TerrainConfig, TerrainError, mesh_with_cell_size};

use crate::{Scene, SceneKind, SceneSummary};

/// Height of the spawn eye above the centre voxel.
const SPAWN_LIFT: f32 = 200.0;
/// Distance of the spawn eye from the origin along +Z.
const SPAWN_BACK: f32 = 500.0;

/// Scene 1: generated voxel terrain, walked over with an orbit rig.
#[derive(Debug, Clone)]
pub struct VoxelScene {
    pub field: HeightField,
    pub quads: Vec<Quad>,
    pub rig: OrbitRig,
    pub walker: TerrainWalker,
}

impl VoxelScene {
    pub fn build(config: &TerrainConfig) -> Result<Self, TerrainError> {
        let _span = tracing::info_span!("voxel_scene", width = config.width, depth = config.depth).entered();

        let field = HeightField::generate(config)?;
        let quads = mesh_with_cell_size(&field, config.cell_size);

        let cs = config.cell_size;
        let centre = field.display_height((config.width / 2) as i32, (config.depth / 2) as i32)?;
        let eye = Vec3::new(0.0, centre as f32 * cs + SPAWN_LIFT, SPAWN_BACK);

        let walker = TerrainWalker {
            cell_size: cs,
            ..TerrainWalker::default()
        };

        tracing::debug!(quads = quads.len(), centre, "voxel scene ready");
        Ok(Self {
            field,
            quads,
            rig: OrbitRig::new(eye, Vec3::ZERO),
            walker,
        })
    }
}

impl Scene for VoxelScene {
    fn kind(&self) -> SceneKind {
        SceneKind::Voxel
    }

    fn step(&mut self, intent: &MoveIntent, dt: f32) {
        self.walker.step(&mut self.rig, intent, dt, &self.field);
    }

    fn eye(&self) -> Vec3 {
        self.rig.eye
    }

    fn summary(&self) -> SceneSummary {
        SceneSummary {
            kind: self.kind(),
            objects: self.quads.len(),
            colliders: 0,
            eye: self.rig.eye,
            target: self.rig.target,
        }
    }
}
