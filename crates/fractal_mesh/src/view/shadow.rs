//! Directional light placement and shadow frustum fitting.

use glam::Vec3;

use crate::bounds::BoundingStats;
use crate::constants::{LIGHT_OFFSET, SHADOW_FAR_FACTOR, SHADOW_FAR_FLOOR, SHADOW_NEAR, SHADOW_PAD_FACTOR};

/// Directional light pose and its square orthographic shadow frustum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightFrame {
  pub position: Vec3,
  pub target: Vec3,
  /// Frustum half-width; the frustum spans [-half_width, half_width] on both axes.
  pub half_width: f32,
  pub near: f32,
  pub far: f32,
}

impl LightFrame {
  pub fn left(&self) -> f32 {
    -self.half_width
  }

  pub fn right(&self) -> f32 {
    self.half_width
  }

  pub fn top(&self) -> f32 {
    self.half_width
  }

  pub fn bottom(&self) -> f32 {
    -self.half_width
  }
}

/// Fit the shadow frustum around the bounding sphere.
///
/// half_width = radius * SHADOW_PAD_FACTOR, far = max(SHADOW_FAR_FLOOR,
/// radius * SHADOW_FAR_FACTOR). The light sits `2 * half_width` from the
/// centroid along [`LIGHT_OFFSET`].
pub fn fit_shadow(stats: &BoundingStats) -> LightFrame {
  let half_width = stats.radius * SHADOW_PAD_FACTOR;
  let offset = Vec3::from_array(LIGHT_OFFSET).normalize() * (2.0 * half_width);

  LightFrame {
    position: stats.centroid + offset,
    target: stats.centroid,
    half_width,
    near: SHADOW_NEAR,
    far: (stats.radius * SHADOW_FAR_FACTOR).max(SHADOW_FAR_FLOOR),
  }
}
