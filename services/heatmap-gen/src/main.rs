//! Gaze heatmap generation CLI.
//!
//! Reads gaze fixations from a JSON file, renders the attention map over
//! an optional background image, and writes the PNG (or prints the
//! base64 transport form for embedding in payloads).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use heatmap_renderer::{HeatmapOptions, HeatmapRenderer, WeightedPoint};

#[derive(Parser, Debug)]
#[command(name = "heatmap-gen")]
#[command(about = "Render a gaze attention heatmap to PNG")]
struct Args {
    /// JSON file holding an array of {x, y, weight} fixations
    #[arg(short, long)]
    points: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long)]
    height: u32,

    /// Background image file (must already match the canvas size)
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "heatmap.png")]
    out: PathBuf,

    /// Print the base64 transport form instead of writing a file
    #[arg(long)]
    base64: bool,

    /// Side length of the Gaussian splat template, in pixels
    #[arg(long, default_value_t = 200)]
    kernel_size: usize,

    /// Color scale name ("turbo" or "jet")
    #[arg(long, default_value = "turbo")]
    color_scale: String,

    /// Fraction of the mean positive density below which cells are hidden
    #[arg(long, default_value_t = 0.5)]
    mask_fraction: f32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let raw = fs::read_to_string(&args.points)
        .with_context(|| format!("reading points file {}", args.points.display()))?;
    let points: Vec<WeightedPoint> =
        serde_json::from_str(&raw).context("parsing points JSON")?;
    info!(points = points.len(), "loaded fixations");

    let background = match &args.background {
        Some(path) => Some(
            fs::read(path)
                .with_context(|| format!("reading background {}", path.display()))?,
        ),
        None => None,
    };

    let options = HeatmapOptions {
        kernel_size: args.kernel_size,
        color_scale: args.color_scale.clone(),
        mask_fraction: args.mask_fraction,
        ..HeatmapOptions::default()
    };
    let renderer = HeatmapRenderer::new(options)?;
    let image = renderer.render(&points, args.width, args.height, background.as_deref())?;

    if args.base64 {
        println!("{}", image.base64);
    } else {
        fs::write(&args.out, &image.bytes)
            .with_context(|| format!("writing output {}", args.out.display()))?;
        info!(
            path = %args.out.display(),
            bytes = image.bytes.len(),
            "wrote heatmap"
        );
    }

    Ok(())
}
