use serde::{Deserialize, Serialize};

/// Parameters for heightfield generation and meshing.
///
/// The defaults reproduce the classic 128x128 voxel landscape: four octaves
/// whose sampling divisor starts at 2 and grows by 4 per octave, heights
/// quantised at 0.15 and cells 100 units wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Cells along X.
    pub width: usize,
    /// Cells along Z.
    pub depth: usize,
    /// World-space edge length of one cell.
    pub cell_size: f32,
    /// Number of noise layers summed per sample.
    pub octaves: u32,
    /// Sampling divisor (and weight) of the first octave.
    pub base_quality: f64,
    /// Factor applied to the divisor after each octave.
    pub quality_step: f64,
    /// Raw-to-display scale applied before flooring.
    pub height_scale: f64,
    /// Explicit seed for reproducible terrain. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 128,
            depth: 128,
            cell_size: crate::CELL_SIZE,
            octaves: 4,
            base_quality: 2.0,
            quality_step: 4.0,
            height_scale: 0.15,
            seed: None,
        }
    }
}

impl TerrainConfig {
    /// Default parameters with a fixed size.
    pub fn with_size(width: usize, depth: usize) -> Self {
        Self {
            width,
            depth,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
