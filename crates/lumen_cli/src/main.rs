//! Lumen - render a scene description file to an image.
//!
//! Usage: `lumen <scene-file> [output-file] [--config <render.json>]`

mod output;
mod parser;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_renderer::{render, DrawStatus, RenderConfig};

/// Render a scene description file to an image
#[derive(Parser, Debug, PartialEq)]
#[command(name = "lumen")]
struct Args {
    /// Scene description file
    scene: PathBuf,

    /// Output image (.png or .ppm); defaults to the scene name with .ppm
    output: Option<PathBuf>,

    /// JSON render settings
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: RenderConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded render config from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    log::info!("Input file: {}", args.scene.display());
    let scene = parser::parse_scene_file(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let start = Instant::now();
    let never = AtomicBool::new(false);
    let (image, status) = render(&scene, &config, &never).context("Render failed")?;
    if let DrawStatus::Cancelled { buckets_done } = status {
        bail!("Render stopped after {} buckets", buckets_done);
    }
    log::info!("Rendered in {:.2?}", start.elapsed());

    let output_path = args
        .output
        .unwrap_or_else(|| output::default_output_path(&args.scene));
    output::save_image(&image, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    log::info!("Output file: {}", output_path.display());

    Ok(())
}
