//! FractalConfig - in-memory generation and animation parameters.

use crate::constants::{DEFAULT_DEPTH, DEFAULT_ROTATION_SPEED, MAX_DEPTH};
use crate::packing::PackMode;
use crate::types::{Rgb, ShapeVariant};
use crate::view::ExplodeSettings;

/// Configuration recognized by the lifecycle manager.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalConfig {
  /// Requested recursion depth (clamped to `[0, depth_limit()]` on use).
  pub depth: u32,

  /// Configured maximum depth, itself capped at [`MAX_DEPTH`].
  pub max_depth: u32,

  pub color: Rgb,

  pub shape: ShapeVariant,

  /// Base shape scale (edge length is `2 * scale`).
  pub scale: f64,

  /// Rotation around +Y in radians per second.
  pub rotation_speed: f32,

  pub explode: ExplodeSettings,

  /// Build the outline edge buffer alongside the fill mesh.
  pub outline: bool,
}

impl Default for FractalConfig {
  fn default() -> Self {
    Self {
      depth: DEFAULT_DEPTH,
      max_depth: MAX_DEPTH,
      color: Rgb::default(),
      shape: ShapeVariant::default(),
      scale: 1.0,
      rotation_speed: DEFAULT_ROTATION_SPEED,
      explode: ExplodeSettings::default(),
      outline: true,
    }
  }
}

impl FractalConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_depth(mut self, depth: u32) -> Self {
    self.depth = depth;
    self
  }

  pub fn with_max_depth(mut self, max_depth: u32) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn with_color(mut self, color: Rgb) -> Self {
    self.color = color;
    self
  }

  pub fn with_shape(mut self, shape: ShapeVariant) -> Self {
    self.shape = shape;
    self
  }

  pub fn with_scale(mut self, scale: f64) -> Self {
    self.scale = scale;
    self
  }

  pub fn with_rotation_speed(mut self, speed: f32) -> Self {
    self.rotation_speed = speed;
    self
  }

  pub fn with_explode(mut self, enabled: bool, speed: f32, amount: f32) -> Self {
    self.explode = ExplodeSettings {
      enabled,
      speed,
      amount,
    };
    self
  }

  pub fn with_outline(mut self, outline: bool) -> Self {
    self.outline = outline;
    self
  }

  /// Effective inclusive upper bound for depth.
  #[inline]
  pub fn depth_limit(&self) -> u32 {
    self.max_depth.min(MAX_DEPTH)
  }

  /// Clamp any requested depth into `[0, depth_limit()]`.
  #[inline]
  pub fn clamp_depth(&self, requested: i64) -> u32 {
    requested.clamp(0, i64::from(self.depth_limit())) as u32
  }

  /// Scale actually used for the base shape.
  ///
  /// Negative scales are mirrored back to positive so tetrahedron faces keep
  /// their outward winding; zero and non-finite scales fall back to 1.
  #[inline]
  pub fn effective_scale(&self) -> f64 {
    let scale = self.scale.abs();
    if scale.is_finite() && scale > 0.0 {
      scale
    } else {
      1.0
    }
  }

  /// Packing implied by the shape and explode toggle.
  pub fn pack_mode(&self) -> PackMode {
    if self.explode.enabled && self.shape.supports_explode() {
      PackMode::Local
    } else {
      PackMode::Global
    }
  }

  /// Whether explode displacement should run each tick.
  pub fn explode_active(&self) -> bool {
    self.pack_mode() == PackMode::Local
  }
}
