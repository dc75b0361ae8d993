use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use homestead_assets::{ModelData, ParticleConfig, SceneManifest};
use homestead_scene::{
    Camera, DebugTextRenderer, DirectionalLight, FARMHOUSE_POSITION, ParticleSystem, RenderView,
    Renderer, SceneLayout,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "homestead-cli", about = "CLI tool for homestead assets and scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Verify that every scene asset exists and the particle config is valid
    Check {
        /// Resource root
        #[arg(long, default_value = "res")]
        assets: PathBuf,
    },
    /// Import a glTF model and print its flattened meshes
    Inspect {
        model: PathBuf,
    },
    /// Run a particle config headless and print statistics
    Particles {
        config: PathBuf,
        /// Number of simulation steps
        #[arg(short, long, default_value = "120")]
        steps: u32,
        /// Seconds per step
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
    },
    /// Print the draw list of one frame
    Scene {
        /// Seconds into the day cycle
        #[arg(short, long, default_value = "0")]
        time: f32,
        /// Seconds for a full day/night cycle
        #[arg(long, default_value = "60")]
        day_length: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("homestead-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", homestead_common::crate_info());
            println!("assets: {}", homestead_assets::crate_info());
            println!("scene: {}", homestead_scene::crate_info());
            println!("input: {}", homestead_input::crate_info());
            println!("render: {}", homestead_render_wgpu::crate_info());
        }
        Commands::Check { assets } => {
            tracing::info!("checking assets under {}", assets.display());
            let report = check_assets(&SceneManifest::homestead(&assets));
            print!("{}", report.text);
            if report.problems > 0 {
                bail!("{} problem(s) under {}", report.problems, assets.display());
            }
            println!("All assets OK");
        }
        Commands::Inspect { model } => {
            let data = homestead_assets::import_model(&model)?;
            print!("{}", describe_model(&data));
        }
        Commands::Particles { config, steps, dt } => {
            tracing::info!("simulating {} for {steps} steps", config.display());
            let config = ParticleConfig::load(&config)?;
            let stats = simulate(config, steps, dt);
            println!(
                "Simulated {steps} steps of {dt:.4}s: live={}, peak={}, spawned={}",
                stats.live, stats.peak, stats.spawned
            );
        }
        Commands::Scene { time, day_length } => {
            tracing::debug!("scene at t={time}s of a {day_length}s day");
            print!("{}", scene_dump(time, day_length));
        }
    }

    Ok(())
}

struct CheckReport {
    text: String,
    problems: usize,
}

fn check_assets(manifest: &SceneManifest) -> CheckReport {
    let mut text = String::new();
    let missing = manifest.missing();
    for path in &missing {
        let _ = writeln!(text, "missing: {}", path.display());
    }
    let mut problems = missing.len();

    if manifest.particle_fire.exists() {
        match ParticleConfig::load(&manifest.particle_fire) {
            Ok(config) => {
                let _ = writeln!(
                    text,
                    "particle config: {} particles at {}/s",
                    config.max_particles, config.spawn_rate
                );
            }
            Err(e) => {
                let _ = writeln!(text, "invalid: {e}");
                problems += 1;
            }
        }
    }
    CheckReport { text, problems }
}

fn describe_model(data: &ModelData) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Model {}: {} meshes, {} images, {} vertices, {} indices",
        data.name,
        data.meshes.len(),
        data.images.len(),
        data.vertex_count(),
        data.index_count()
    );
    for mesh in &data.meshes {
        let texture = mesh
            .texture
            .and_then(|i| data.images.get(i))
            .map(|img| format!("{} {}x{}", img.name, img.width, img.height))
            .unwrap_or_else(|| "none".into());
        let _ = writeln!(
            out,
            "  {:<20} verts={:<6} tris={:<6} color={:?} texture={texture}",
            mesh.name,
            mesh.vertices.len(),
            mesh.indices.len() / 3,
            mesh.base_color
        );
    }
    if let Some(bounds) = data.bounds() {
        let size = bounds.size();
        let _ = writeln!(
            out,
            "Bounds: min=({:.2}, {:.2}, {:.2}) max=({:.2}, {:.2}, {:.2}) size=({:.2}, {:.2}, {:.2})",
            bounds.min.x,
            bounds.min.y,
            bounds.min.z,
            bounds.max.x,
            bounds.max.y,
            bounds.max.z,
            size.x,
            size.y,
            size.z
        );
    }
    out
}

#[derive(Debug, PartialEq)]
struct SimulationStats {
    live: usize,
    peak: usize,
    spawned: u64,
}

fn simulate(config: ParticleConfig, steps: u32, dt: f32) -> SimulationStats {
    let mut system = ParticleSystem::new(config);
    let mut peak = 0;
    for _ in 0..steps {
        system.update(dt);
        peak = peak.max(system.len());
    }
    SimulationStats {
        live: system.len(),
        peak,
        spawned: system.spawned_total(),
    }
}

/// The frame the desktop app would draw `time` seconds after start.
fn scene_dump(time: f32, day_length: f32) -> String {
    let mut light = DirectionalLight::default().with_day_length(day_length);
    let day_alpha = light.orbit(FARMHOUSE_POSITION, time);
    let sun = light.is_above_horizon().then_some(light.position);
    let layout = SceneLayout::homestead(sun);
    let view = RenderView::from_camera(&Camera::default(), day_alpha);
    DebugTextRenderer::new().render(&layout, &view)
}
