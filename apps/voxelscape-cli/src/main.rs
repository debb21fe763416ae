mod config;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use voxelscape_input::{Key, KeyState};
use voxelscape_render::{DebugTextRenderer, RenderView, Renderer, merge_quads};
use voxelscape_scene::{
    CityConfig, CityScene, PlatformConfig, PlatformScene, PyramidConfig, PyramidScene, Scene, SceneKind,
    VoxelScene,
};
use voxelscape_terrain::{HeightField, Quad, TerrainConfig, mesh_with_cell_size, surface_hash};

#[derive(Parser)]
#[command(name = "voxelscape", about = "Voxel terrain and demo scene tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and defaults
    Info,
    /// Generate a heightfield and mesh its surface
    Generate {
        #[arg(long)]
        width: Option<usize>,
        #[arg(long)]
        depth: Option<usize>,
        /// Seed for reproducible terrain; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML terrain config; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = Format::Summary)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Build a scene and print its layout summary
    Scene {
        kind: SceneKind,
        #[arg(short, long)]
        seed: Option<u64>,
        /// YAML config for the scene: terrain for voxel, layout for the others
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Hold forward in a scene for a number of frames
    Walk {
        kind: SceneKind,
        #[arg(short, long, default_value = "120")]
        frames: u32,
        #[arg(short, long)]
        seed: Option<u64>,
        /// Frame time in seconds
        #[arg(long, default_value = "0.016")]
        dt: f32,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Face counts, height range and surface hash
    Summary,
    /// Heights and quads as JSON
    Json,
    /// Merged vertex and index buffers as JSON
    Geometry,
}

#[derive(Serialize)]
struct TerrainDump<'a> {
    width: usize,
    depth: usize,
    seed_z: Option<f64>,
    surface_hash: String,
    heights: Vec<i32>,
    quads: &'a [Quad],
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            let defaults = TerrainConfig::default();
            println!("voxelscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "terrain: {}x{} cells of {}, {} octaves, height scale {}",
                defaults.width, defaults.depth, defaults.cell_size, defaults.octaves, defaults.height_scale
            );
            let kinds: Vec<&str> = SceneKind::ALL.iter().map(|k| k.name()).collect();
            println!("scenes: {}", kinds.join(", "));
        }
        Commands::Generate {
            width,
            depth,
            seed,
            config,
            format,
            output,
        } => {
            let config = config::apply_overrides(terrain_config(config.as_deref())?, width, depth, seed);
            let field = HeightField::generate(&config).context("generating heightfield")?;
            let quads = mesh_with_cell_size(&field, config.cell_size);
            let hash = surface_hash(&quads);

            let text = match format {
                Format::Summary => {
                    let mut out = DebugTextRenderer::new().render(&quads, &RenderView::default());
                    out.push_str(&format!(
                        "Heights: {}..={} seed_z={:.6}\nSurface hash: {hash:#018x}\n",
                        field.min_height().unwrap_or(0),
                        field.max_height().unwrap_or(0),
                        field.seed_z().unwrap_or(f64::NAN),
                    ));
                    out
                }
                Format::Json => serde_json::to_string_pretty(&TerrainDump {
                    width: field.width(),
                    depth: field.depth(),
                    seed_z: field.seed_z(),
                    surface_hash: format!("{hash:016x}"),
                    heights: field.cells().map(|(_, h)| h).collect(),
                    quads: &quads,
                })?,
                Format::Geometry => serde_json::to_string(&merge_quads(&quads, config.cell_size))?,
            };
            emit(&text, output.as_deref())?;
        }
        Commands::Scene { kind, seed, config } => {
            let scene = build_scene(kind, seed, config.as_deref())?;
            println!("{}", scene.summary());
        }
        Commands::Walk {
            kind,
            frames,
            seed,
            dt,
            config,
        } => {
            if kind == SceneKind::City {
                anyhow::bail!("the city scene is moved by map controls and has no walker");
            }
            let mut scene = build_scene(kind, seed, config.as_deref())?;
            let start = scene.eye();
            let mut keys = KeyState::new();
            keys.press(Key::W);
            let intent = keys.intent();
            for _ in 0..frames {
                scene.step(&intent, dt);
            }
            let end = scene.eye();
            println!(
                "{kind}: {frames} frames, eye ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}), moved {:.2}",
                start.x,
                start.y,
                start.z,
                end.x,
                end.y,
                end.z,
                start.distance(end)
            );
        }
    }

    Ok(())
}

fn terrain_config(path: Option<&Path>) -> anyhow::Result<TerrainConfig> {
    match path {
        Some(path) => config::load_terrain_config(path),
        None => Ok(TerrainConfig::default()),
    }
}

fn build_scene(kind: SceneKind, seed: Option<u64>, config: Option<&Path>) -> anyhow::Result<Box<dyn Scene>> {
    let scene: Box<dyn Scene> = match kind {
        SceneKind::Voxel => {
            let terrain = config::apply_overrides(terrain_config(config)?, None, None, seed);
            tracing::info!(%kind, seed = ?terrain.seed, "building scene");
            Box::new(VoxelScene::build(&terrain).context("building voxel scene")?)
        }
        SceneKind::City => {
            let city: CityConfig = scene_config(kind, config)?;
            Box::new(CityScene::build(&city, layout_seed(kind, seed)))
        }
        SceneKind::Pyramids => {
            let pyramids: PyramidConfig = scene_config(kind, config)?;
            Box::new(PyramidScene::build(&pyramids, layout_seed(kind, seed)))
        }
        SceneKind::Platforms => {
            let platforms: PlatformConfig = scene_config(kind, config)?;
            Box::new(PlatformScene::build(&platforms, layout_seed(kind, seed)))
        }
    };
    Ok(scene)
}

fn scene_config<T: DeserializeOwned + Default>(kind: SceneKind, path: Option<&Path>) -> anyhow::Result<T> {
    match path {
        Some(path) => config::load_config(path, kind.name()),
        None => Ok(T::default()),
    }
}

fn layout_seed(kind: SceneKind, seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(%kind, seed, "building scene");
    seed
}

fn emit(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
