//! LifecycleManager - owns the single live generation.
//!
//! ```text
//!            regenerate()                 regenerate()
//!   Empty ───────────────► Live(g1) ──────────────────► Live(g2)
//!     ▲                      │     dispose g1, then build g2
//!     └──────── dispose() ───┘
//! ```
//!
//! Every transition disposes the previous generation completely before the
//! next one is built, so at most one set of buffers is resident at a time.
//! Presentation callbacks fire in a fixed order: `on_generation_dispose` for
//! the old generation, then `on_generation_ready` and `on_view_changed` for
//! the new one.

use std::f32::consts::TAU;

use glam::Vec3;
use tracing::{debug, trace};

use crate::config::FractalConfig;
use crate::generation::{Generation, GenerationParams};
use crate::metrics::FractalMetrics;
use crate::packing::PackMode;
use crate::presentation::{FrameUpdate, NullPresentation, PresentationLayer};
use crate::residency::ResidencyTracker;
use crate::types::{Rgb, ShapeVariant};
use crate::view::{compute_view, displace_all, oscillation, ExplodeSettings, ViewUpdate};

/// Whether a generation is currently live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
  Empty,
  Live,
}

pub struct LifecycleManager<P: PresentationLayer = NullPresentation> {
  config: FractalConfig,
  presentation: P,
  residency: ResidencyTracker,
  current: Option<Generation>,
  view: Option<ViewUpdate>,

  // Animation
  rotation: f32,
  explode_phase: f32,
  positions: Vec<Vec3>,

  metrics: FractalMetrics,
}

impl LifecycleManager<NullPresentation> {
  /// Manager without a rendering bridge.
  pub fn headless(config: FractalConfig) -> Self {
    Self::new(config, NullPresentation)
  }
}

impl<P: PresentationLayer> LifecycleManager<P> {
  /// Create an Empty manager. Nothing is built until the first
  /// [`regenerate`](Self::regenerate) or [`apply_config`](Self::apply_config).
  pub fn new(config: FractalConfig, presentation: P) -> Self {
    Self {
      config,
      presentation,
      residency: ResidencyTracker::new(),
      current: None,
      view: None,
      rotation: 0.0,
      explode_phase: 0.0,
      positions: Vec::new(),
      metrics: FractalMetrics::new(),
    }
  }

  // ===========================================================================
  // Transitions
  // ===========================================================================

  /// Replace the live generation with one built at `depth`.
  ///
  /// `depth` is clamped to `[0, config.depth_limit()]`; negative values
  /// build depth 0.
  pub fn regenerate(&mut self, depth: i32, color: Rgb, variant: ShapeVariant) -> &Generation {
    let depth = self.config.clamp_depth(i64::from(depth));
    self.rebuild(depth, color, variant)
  }

  /// Apply a whole configuration and rebuild from it.
  pub fn apply_config(&mut self, config: FractalConfig) -> &Generation {
    self.config = config;
    let depth = self.config.clamp_depth(i64::from(self.config.depth));
    self.rebuild(depth, self.config.color, self.config.shape)
  }

  /// Release the live generation. No-op when Empty.
  pub fn dispose(&mut self) {
    if let Some(generation) = self.current.take() {
      debug!(
        id = generation.id().raw(),
        depth = generation.depth(),
        "disposing generation"
      );
      self.presentation.on_generation_dispose(generation.id());
      self.metrics.record_dispose(&generation);
      drop(generation);
    }
    self.view = None;
    self.positions.clear();
    self.explode_phase = 0.0;
  }

  /// Update explode settings.
  ///
  /// Toggling explode on a tetrahedron changes the packing layout, so a live
  /// generation is rebuilt with its current depth, colour and shape.
  pub fn set_explode(&mut self, enabled: bool, speed: f32, amount: f32) {
    let previous = self.config.pack_mode();
    self.config.explode = ExplodeSettings {
      enabled,
      speed,
      amount,
    };

    if self.config.pack_mode() == previous {
      return;
    }
    if let Some(params) = self.current.as_ref().map(|g| *g.params()) {
      self.rebuild(params.depth, params.color, params.variant);
    }
  }

  pub fn set_rotation_speed(&mut self, speed: f32) {
    self.config.rotation_speed = speed;
  }

  fn rebuild(&mut self, depth: u32, color: Rgb, variant: ShapeVariant) -> &Generation {
    self.dispose();

    self.config.depth = depth;
    self.config.color = color;
    self.config.shape = variant;

    let params = GenerationParams {
      depth,
      variant,
      color,
      scale: self.config.effective_scale(),
      mode: self.config.pack_mode(),
      outline: self.config.outline,
    };
    let generation = Generation::build(params, &self.residency);
    let view = compute_view(generation.stats(), variant);

    self
      .positions
      .extend(generation.instances().iter().map(|instance| instance.origin));
    self.metrics.record_build(&generation);

    debug!(
      id = generation.id().raw(),
      depth,
      shape = variant.name(),
      primitives = generation.primitive_count(),
      vertices = generation.mesh().vertex_count(),
      build_us = generation.build_time_us(),
      "generation ready"
    );

    self.presentation.on_generation_ready(&generation);
    self.presentation.on_view_changed(&view);
    self.view = Some(view);

    self.current.insert(generation)
  }

  // ===========================================================================
  // Animation
  // ===========================================================================

  /// Advance one frame.
  ///
  /// `elapsed` is the absolute animation time driving the explode
  /// oscillation; `delta` is the time since the previous tick driving the
  /// rotation. Rotation advances even when Empty, but only a live
  /// generation produces an `on_frame` notification.
  pub fn tick(&mut self, elapsed: f32, delta: f32) {
    self.rotation = (self.rotation + delta * self.config.rotation_speed).rem_euclid(TAU);

    let Some(generation) = self.current.as_ref() else {
      return;
    };

    if generation.mode() == PackMode::Local && self.config.explode_active() {
      let explode = self.config.explode;
      self.explode_phase = oscillation(elapsed, explode.speed);
      displace_all(
        generation.instances(),
        self.explode_phase,
        explode.amount,
        &mut self.positions,
      );
    } else {
      self.explode_phase = 0.0;
    }

    trace!(
      rotation = self.rotation,
      phase = self.explode_phase,
      "frame"
    );

    self.presentation.on_frame(&FrameUpdate {
      rotation_y: self.rotation,
      explode_phase: self.explode_phase,
      instance_positions: &self.positions,
    });
  }

  // ===========================================================================
  // Accessors
  // ===========================================================================

  pub fn state(&self) -> LifecycleState {
    if self.current.is_some() {
      LifecycleState::Live
    } else {
      LifecycleState::Empty
    }
  }

  pub fn generation(&self) -> Option<&Generation> {
    self.current.as_ref()
  }

  /// Camera and light of the live generation.
  pub fn view(&self) -> Option<&ViewUpdate> {
    self.view.as_ref()
  }

  /// Per-instance world positions as of the last tick (local mode only).
  pub fn instance_positions(&self) -> &[Vec3] {
    &self.positions
  }

  pub fn rotation(&self) -> f32 {
    self.rotation
  }

  pub fn explode_phase(&self) -> f32 {
    self.explode_phase
  }

  pub fn config(&self) -> &FractalConfig {
    &self.config
  }

  pub fn residency(&self) -> &ResidencyTracker {
    &self.residency
  }

  pub fn presentation(&self) -> &P {
    &self.presentation
  }

  pub fn metrics(&self) -> &FractalMetrics {
    &self.metrics
  }
}

impl<P: PresentationLayer> Drop for LifecycleManager<P> {
  fn drop(&mut self) {
    self.dispose();
  }
}

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;
