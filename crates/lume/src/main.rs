//! Command-line entry point: pick a scene, render it, write a PNG.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;

mod output;
mod scenes;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scene {
    /// Random sphere field over a checkered ground
    SphereField,
    /// Two giant checkered spheres
    CheckeredSpheres,
    /// Five colored quads facing the camera
    Quads,
    /// An emissive quad and sphere lighting a dark scene
    SimpleLight,
}

#[derive(Parser)]
#[command(name = "lume")]
#[command(about = "An offline Monte Carlo path tracer")]
struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "sphere-field")]
    scene: Scene,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Number of samples per pixel
    #[arg(short, long, default_value_t = 100)]
    samples_per_pixel: u32,

    /// Maximum number of ray bounces
    #[arg(long, default_value_t = 50)]
    max_depth: u32,

    /// Base seed for scene randomization and the per-row generators
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output file path (PNG)
    #[arg(short, long, default_value = "render.png")]
    output: String,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut scene_rng = StdRng::seed_from_u64(args.seed);
    let (world, mut camera) = match args.scene {
        Scene::SphereField => scenes::sphere_field(&mut scene_rng)?,
        Scene::CheckeredSpheres => scenes::checkered_spheres()?,
        Scene::Quads => scenes::quads()?,
        Scene::SimpleLight => scenes::simple_light()?,
    };

    camera.image_width = args.width;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;

    info!("scene: {:?}, seed: {}", args.scene, args.seed);

    let image = lume_render::render(&mut camera, &world, args.seed)
        .context("camera configuration rejected")?;

    output::save_png(&image, &args.output)
        .with_context(|| format!("saving {}", args.output))?;
    info!("wrote {}", args.output);

    Ok(())
}
