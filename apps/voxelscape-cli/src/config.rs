use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;
use voxelscape_terrain::TerrainConfig;

/// Read a YAML terrain config. Missing keys keep their defaults.
pub fn load_terrain_config(path: &Path) -> anyhow::Result<TerrainConfig> {
    load_config(path, "terrain")
}

/// Read any YAML config whose missing keys fall back to `Default`.
pub fn load_config<T: DeserializeOwned + Default>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {what} config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parsing {what} config {}", path.display()))
}

pub fn parse_terrain_config(text: &str) -> anyhow::Result<TerrainConfig> {
    parse_config(text)
}

pub fn parse_config<T: DeserializeOwned + Default>(text: &str) -> anyhow::Result<T> {
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Command-line values win over the file.
pub fn apply_overrides(
    mut config: TerrainConfig,
    width: Option<usize>,
    depth: Option<usize>,
    seed: Option<u64>,
) -> TerrainConfig {
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(depth) = depth {
        config.depth = depth;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = parse_terrain_config("width: 64\nseed: 9\n").unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.depth, 128);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.height_scale, 0.15);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(parse_terrain_config("  \n").unwrap(), TerrainConfig::default());
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(parse_terrain_config("width: [1, 2").is_err());
        assert!(parse_terrain_config("width: -3").is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_terrain_config(Path::new("/nonexistent/terrain.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/terrain.yaml"));
    }

    #[test]
    fn scene_configs_read_from_yaml() {
        use voxelscape_scene::{CityConfig, PlatformConfig, PyramidConfig};

        let city: CityConfig = parse_config("towers: 12\neye: [0.0, 300.0, -100.0]\n").unwrap();
        assert_eq!(city.towers, 12);
        assert_eq!(city.eye.y, 300.0);
        assert_eq!(city.extent, 800.0);

        let pyramids: PyramidConfig = parse_config("pyramids: 7\n").unwrap();
        assert_eq!(pyramids.pyramids, 7);

        let platforms: PlatformConfig = parse_config("cubes: 3\n").unwrap();
        assert_eq!(platforms.cubes, 3);
        assert_eq!(platforms.size, PlatformConfig::default().size);
    }

    #[test]
    fn flags_override_file() {
        let base = TerrainConfig::default().with_seed(1);
        let config = apply_overrides(base, Some(16), None, None);
        assert_eq!(config.width, 16);
        assert_eq!(config.depth, 128);
        assert_eq!(config.seed, Some(1));

        let config = apply_overrides(config, None, Some(8), Some(2));
        assert_eq!(config.depth, 8);
        assert_eq!(config.seed, Some(2));
    }
}
