//! Presentation layer that logs instead of rendering.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use fractal_mesh::{FrameUpdate, Generation, GenerationId, PresentationLayer, ViewUpdate};
use tracing::{debug, info, trace, warn};

/// Tracks "uploaded" buffer sizes per generation and counts frames.
#[derive(Debug, Default)]
pub struct LoggingPresentation {
  uploads: Mutex<HashMap<GenerationId, usize>>,
  frames: AtomicU64,
}

impl LoggingPresentation {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn frames(&self) -> u64 {
    self.frames.load(Ordering::Relaxed)
  }

  /// Generations whose buffers have not been released yet.
  pub fn uploaded(&self) -> usize {
    self.uploads.lock().map_or(0, |uploads| uploads.len())
  }
}

impl PresentationLayer for LoggingPresentation {
  fn on_generation_ready(&self, generation: &Generation) {
    let bytes = generation.mesh().byte_len()
      + generation.ground().mesh().byte_len()
      + generation.edges().map_or(0, |edges| edges.byte_len());

    if let Ok(mut uploads) = self.uploads.lock() {
      uploads.insert(generation.id(), bytes);
    }

    info!(
      id = generation.id().raw(),
      depth = generation.depth(),
      shape = generation.variant().name(),
      color = %format!("#{:06x}", generation.color().to_hex()),
      triangles = generation.mesh().triangle_count(),
      edges = generation.edges().map_or(0, |edges| edges.segment_count()),
      bytes,
      build_us = generation.build_time_us(),
      "upload generation"
    );
  }

  fn on_generation_dispose(&self, id: GenerationId) {
    let released = self
      .uploads
      .lock()
      .ok()
      .and_then(|mut uploads| uploads.remove(&id));

    match released {
      Some(bytes) => debug!(id = id.raw(), bytes, "release generation"),
      None => warn!(id = id.raw(), "release of unknown generation"),
    }
  }

  fn on_view_changed(&self, view: &ViewUpdate) {
    debug!(
      camera_target = ?view.camera.target,
      distance = view.camera.distance,
      far = view.camera.far,
      light = ?view.light.position,
      shadow_half_width = view.light.half_width,
      shadow_far = view.light.far,
      "view changed"
    );
  }

  fn on_frame(&self, frame: &FrameUpdate<'_>) {
    let frame_index = self.frames.fetch_add(1, Ordering::Relaxed);
    trace!(
      frame = frame_index,
      rotation = frame.rotation_y,
      phase = frame.explode_phase,
      instances = frame.instance_positions.len(),
      "frame"
    );
  }
}
