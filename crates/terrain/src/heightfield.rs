use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use voxelscape_common::CellCoord;

use crate::config::TerrainConfig;
use crate::noise::noise3d;

/// Upper bound (exclusive) of the third noise coordinate.
const SEED_Z_RANGE: f64 = 100.0;

/// Errors from heightfield construction and lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("invalid dimensions {width}x{depth}: both must be positive")]
    InvalidDimension { width: usize, depth: usize },
    #[error("cell ({x}, {z}) is outside the {width}x{depth} heightfield")]
    OutOfRangeQuery {
        x: i32,
        z: i32,
        width: usize,
        depth: usize,
    },
    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}

/// Floor-quantise a raw sample into a display height.
///
/// Negative values floor away from zero: `-0.015 -> -1`.
#[inline]
pub fn quantize(raw: f64, scale: f64) -> i32 {
    (raw * scale).floor() as i32
}

/// Draw the third noise coordinate for one generation run.
///
/// With a seed the draw is reproducible; without one it comes from the thread RNG.
pub fn draw_seed_z(seed: Option<u64>) -> f64 {
    match seed {
        Some(seed) => Pcg64Mcg::seed_from_u64(seed).random_range(0.0..SEED_Z_RANGE),
        None => rand::rng().random_range(0.0..SEED_Z_RANGE),
    }
}

/// A rectangular grid of raw noise samples and their quantised display heights.
///
/// Row-major: the sample for `(x, z)` lives at `x + z * width`. Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    depth: usize,
    raw: Vec<f64>,
    heights: Vec<i32>,
    seed_z: Option<f64>,
}

impl HeightField {
    /// Build from raw samples, quantised with the default 0.15 scale.
    ///
    /// Zero-sized fields are allowed here; they mesh to nothing.
    pub fn from_raw(width: usize, depth: usize, raw: Vec<f64>) -> Result<Self, TerrainError> {
        Self::from_raw_scaled(width, depth, raw, TerrainConfig::default().height_scale)
    }

    /// Build from raw samples with an explicit raw-to-display scale.
    pub fn from_raw_scaled(
        width: usize,
        depth: usize,
        raw: Vec<f64>,
        height_scale: f64,
    ) -> Result<Self, TerrainError> {
        let expected = width * depth;
        if raw.len() != expected {
            return Err(TerrainError::SampleCountMismatch {
                expected,
                actual: raw.len(),
            });
        }
        let heights = raw.iter().map(|&r| quantize(r, height_scale)).collect();
        Ok(Self {
            width,
            depth,
            raw,
            heights,
            seed_z: None,
        })
    }

    /// Generate a field from the given parameters.
    pub fn generate(config: &TerrainConfig) -> Result<Self, TerrainError> {
        let seed_z = draw_seed_z(config.seed);
        Self::from_noise(config, seed_z)
    }

    /// Generate with an explicit third noise coordinate.
    ///
    /// Octave `j` samples at `(x / q, y / q, seed_z)` and contributes
    /// `noise * q`, where `q` starts at `base_quality` and is multiplied by
    /// `quality_step` after each octave.
    pub fn from_noise(config: &TerrainConfig, seed_z: f64) -> Result<Self, TerrainError> {
        let (width, depth) = (config.width, config.depth);
        if width == 0 || depth == 0 {
            return Err(TerrainError::InvalidDimension { width, depth });
        }

        let _span = tracing::info_span!("generate_heightfield", width, depth).entered();

        let size = width * depth;
        let mut raw = vec![0.0_f64; size];
        let mut quality = config.base_quality;
        for _ in 0..config.octaves {
            for (i, sample) in raw.iter_mut().enumerate() {
                let x = (i % width) as f64;
                let y = (i / width) as f64;
                *sample += noise3d(x / quality, y / quality, seed_z) * quality;
            }
            quality *= config.quality_step;
        }

        let mut field = Self::from_raw_scaled(width, depth, raw, config.height_scale)?;
        field.seed_z = Some(seed_z);

        tracing::debug!(
            seed_z,
            min = ?field.min_height(),
            max = ?field.max_height(),
            "heightfield generated"
        );
        Ok(field)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of defined cells (`width * depth`).
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// The third noise coordinate used, if the field came from noise.
    pub fn seed_z(&self) -> Option<f64> {
        self.seed_z
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 {
            return None;
        }
        let (x, z) = (x as usize, z as usize);
        if x >= self.width || z >= self.depth {
            return None;
        }
        Some(x + z * self.width)
    }

    fn out_of_range(&self, x: i32, z: i32) -> TerrainError {
        TerrainError::OutOfRangeQuery {
            x,
            z,
            width: self.width,
            depth: self.depth,
        }
    }

    /// Display height at `(x, z)`, or `None` outside the grid.
    #[inline]
    pub fn height(&self, x: i32, z: i32) -> Option<i32> {
        self.index(x, z).map(|i| self.heights[i])
    }

    /// Display height at `(x, z)`; out-of-range lookups are an error.
    pub fn display_height(&self, x: i32, z: i32) -> Result<i32, TerrainError> {
        self.height(x, z).ok_or_else(|| self.out_of_range(x, z))
    }

    /// Unquantised sample at `(x, z)`.
    pub fn raw(&self, x: i32, z: i32) -> Result<f64, TerrainError> {
        self.index(x, z)
            .map(|i| self.raw[i])
            .ok_or_else(|| self.out_of_range(x, z))
    }

    /// Iterate `(cell, display height)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, i32)> + '_ {
        self.heights.iter().enumerate().map(|(i, &h)| {
            let x = (i % self.width) as i32;
            let z = (i / self.width) as i32;
            (CellCoord::new(x, z), h)
        })
    }

    pub fn min_height(&self) -> Option<i32> {
        self.heights.iter().copied().min()
    }

    pub fn max_height(&self) -> Option<i32> {
        self.heights.iter().copied().max()
    }
}

/// Generate a `width x depth` field with a randomly drawn seed.
pub fn generate(width: usize, depth: usize) -> Result<HeightField, TerrainError> {
    HeightField::generate(&TerrainConfig::with_size(width, depth))
}

/// Generate a `width x depth` field reproducibly from `seed`.
pub fn generate_seeded(width: usize, depth: usize, seed: u64) -> Result<HeightField, TerrainError> {
    HeightField::generate(&TerrainConfig::with_size(width, depth).with_seed(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_fills_every_cell() {
        for &(w, d) in &[(1, 1), (1, 7), (9, 1), (16, 12), (128, 128)] {
            let field = generate_seeded(w, d, 3).unwrap();
            assert_eq!(field.len(), w * d);
            for z in 0..d as i32 {
                for x in 0..w as i32 {
                    assert!(field.display_height(x, z).is_ok());
                }
            }
        }
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert_eq!(
            generate(0, 4),
            Err(TerrainError::InvalidDimension { width: 0, depth: 4 })
        );
        assert!(generate(4, 0).is_err());
    }

    #[test]
    fn same_seed_same_field() {
        let a = generate_seeded(32, 24, 1234).unwrap();
        let b = generate_seeded(32, 24, 1234).unwrap();
        assert_eq!(a, b);
        assert!(a.seed_z().is_some());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = generate_seeded(32, 32, 1).unwrap();
        let b = generate_seeded(32, 32, 2).unwrap();
        assert_ne!(a.seed_z(), b.seed_z());
    }

    #[test]
    fn seed_z_in_range() {
        for seed in 0..64 {
            let z = draw_seed_z(Some(seed));
            assert!((0.0..100.0).contains(&z));
        }
        let z = draw_seed_z(None);
        assert!((0.0..100.0).contains(&z));
    }

    #[test]
    fn floor_quantisation() {
        assert_eq!(quantize(-0.1, 1.0), -1);
        assert_eq!(quantize(0.1, 1.0), 0);
        assert_eq!(quantize(-0.1, 0.15), -1);
        assert_eq!(quantize(0.1, 0.15), 0);
        assert_eq!(quantize(1.4, 0.15), 0);
        assert_eq!(quantize(20.0, 0.15), 3);
        assert_eq!(quantize(-20.0, 0.15), -3);
    }

    #[test]
    fn octave_sum_matches_manual_evaluation() {
        let config = TerrainConfig::with_size(5, 3);
        let seed_z = 42.5;
        let field = HeightField::from_noise(&config, seed_z).unwrap();

        let (x, y) = (3.0, 2.0);
        let mut expected = 0.0;
        let mut q = 2.0;
        for _ in 0..4 {
            expected += noise3d(x / q, y / q, seed_z) * q;
            q *= 4.0;
        }
        assert_eq!(field.raw(3, 2).unwrap(), expected);
        assert_eq!(field.display_height(3, 2).unwrap(), quantize(expected, 0.15));
    }

    #[test]
    fn out_of_range_queries_fail() {
        let field = HeightField::from_raw(2, 2, vec![0.0; 4]).unwrap();
        assert!(matches!(
            field.display_height(-1, 0),
            Err(TerrainError::OutOfRangeQuery { x: -1, z: 0, .. })
        ));
        assert!(field.display_height(2, 0).is_err());
        assert!(field.display_height(0, 2).is_err());
        assert!(field.raw(5, 5).is_err());
        assert_eq!(field.height(1, 1), Some(0));
        assert_eq!(field.height(1, 2), None);
    }

    #[test]
    fn from_raw_checks_sample_count() {
        assert_eq!(
            HeightField::from_raw(3, 2, vec![0.0; 5]),
            Err(TerrainError::SampleCountMismatch {
                expected: 6,
                actual: 5
            })
        );
        let empty = HeightField::from_raw(0, 5, Vec::new()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn cells_iterate_row_major() {
        let field = HeightField::from_raw(2, 2, vec![0.0, 7.0, 14.0, -7.0]).unwrap();
        let cells: Vec<_> = field.cells().collect();
        assert_eq!(
            cells,
            vec![
                (CellCoord::new(0, 0), 0),
                (CellCoord::new(1, 0), 1),
                (CellCoord::new(0, 1), 2),
                (CellCoord::new(1, 1), -2),
            ]
        );
        assert_eq!(field.min_height(), Some(-2));
        assert_eq!(field.max_height(), Some(2));
    }
}
