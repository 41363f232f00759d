//! Headless fractal driver.
//!
//! Builds generations through the lifecycle manager, optionally running a
//! rebuild sequence first, then advances a fixed-step frame loop and reports
//! what stayed resident.
//!
//! ```text
//! RUST_LOG=debug fractal_driver --shape tetrahedron --explode --rebuild 3,0,5
//! ```

mod config;
mod presentation;

use anyhow::Result;
use clap::Parser;
use fractal_mesh::metrics::FractalMetrics;
use fractal_mesh::LifecycleManager;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use web_time::Instant;

use config::{parse_rebuild, Config, Shape};
use presentation::LoggingPresentation;

/// Sierpinski fractal driver.
#[derive(Parser, Debug)]
#[command(name = "fractal_driver")]
#[command(about = "Builds Sierpinski fractal generations and runs a headless frame loop")]
struct Args {
  /// Path to configuration TOML file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Initial depth (overrides the config; clamped to the depth limit).
  #[arg(short, long, allow_hyphen_values = true)]
  depth: Option<i32>,

  #[arg(short, long, value_enum)]
  shape: Option<Shape>,

  /// Enable the explode animation (tetrahedron only).
  #[arg(long)]
  explode: bool,

  /// Number of frames to simulate after the last rebuild.
  #[arg(long, default_value_t = 120)]
  frames: u32,

  #[arg(long, default_value_t = 60.0)]
  fps: f32,

  /// Comma-separated depths to rebuild through, e.g. `3,0,5`.
  #[arg(long, allow_hyphen_values = true, conflicts_with = "depth")]
  rebuild: Option<String>,
}

fn main() -> Result<()> {
  fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();

  let mut config = match &args.config {
    Some(path) => {
      info!(path = %path.display(), "loading config");
      Config::load(path)?
    }
    None => Config::default(),
  };
  if let Some(shape) = args.shape {
    config.shape = shape;
  }
  if args.explode {
    config.explode = true;
  }
  if !(args.fps.is_finite() && args.fps > 0.0) {
    anyhow::bail!("fps must be positive, got {}", args.fps);
  }

  let fractal = config.to_fractal_config()?;
  let depths = match &args.rebuild {
    Some(sequence) => parse_rebuild(sequence)?,
    None => vec![args.depth.unwrap_or(fractal.depth as i32)],
  };

  info!(
    shape = fractal.shape.name(),
    depth_limit = fractal.depth_limit(),
    explode = fractal.explode.enabled,
    mode = ?fractal.pack_mode(),
    rebuilds = depths.len(),
    "driver starting"
  );

  let (color, shape) = (fractal.color, fractal.shape);
  let mut manager = LifecycleManager::new(fractal, LoggingPresentation::new());

  for &depth in &depths {
    let generation = manager.regenerate(depth, color, shape);
    info!(
      requested = depth,
      depth = generation.depth(),
      primitives = generation.primitive_count(),
      radius = generation.stats().radius,
      "rebuilt"
    );
  }

  let resident = manager.residency().resident_count();
  if resident != 1 || manager.presentation().uploaded() != 1 {
    anyhow::bail!(
      "expected exactly one resident generation after rebuilds, found {resident} resident and {} uploaded",
      manager.presentation().uploaded()
    );
  }

  let delta = 1.0 / args.fps;
  let start = Instant::now();
  for frame in 0..args.frames {
    manager.tick(frame as f32 * delta, delta);
  }
  let loop_us = start.elapsed().as_micros();

  report(&manager, args.frames, loop_us);
  manager.dispose();

  Ok(())
}

fn report(manager: &LifecycleManager<LoggingPresentation>, frames: u32, loop_us: u128) {
  let metrics: &FractalMetrics = manager.metrics();

  info!(
    frames = manager.presentation().frames(),
    requested_frames = frames,
    loop_us = loop_us as u64,
    rotation = manager.rotation(),
    explode_phase = manager.explode_phase(),
    "frame loop finished"
  );
  info!(
    built = metrics.generations_built,
    disposed = metrics.generations_disposed,
    avg_build_us = metrics.avg_build_timing_us(),
    last_build_us = metrics.last_build_us,
    live_primitives = metrics.live_primitives,
    live_vertices = metrics.live_vertices,
    live_mb = metrics.live_memory_mb(),
    resident_bytes = manager.residency().resident_bytes(),
    "summary"
  );
}
