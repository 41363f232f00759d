//! Camera auto-framing.

use glam::Vec3;

use crate::bounds::BoundingStats;
use crate::constants::{CAMERA_FAR_FLOOR, CAMERA_NEAR, MAX_ORBIT_DISTANCE, MIN_CAMERA_DISTANCE};
use crate::types::ShapeVariant;

/// Camera placement that keeps the whole generation in view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
  /// Orbit/look-at target (the generation centroid).
  pub target: Vec3,
  pub position: Vec3,
  /// Distance from `position` to `target`.
  pub distance: f32,
  pub near: f32,
  pub far: f32,
  /// Orbit zoom limits.
  pub min_distance: f32,
  pub max_distance: f32,
}

/// Frame `stats` from the variant's preferred direction.
///
/// distance = max(MIN_CAMERA_DISTANCE, radius * framing_factor)
pub fn frame_camera(stats: &BoundingStats, variant: ShapeVariant) -> CameraFrame {
  frame_camera_with(stats, variant.view_direction(), variant.framing_factor())
}

/// Frame `stats` looking along `-direction` with a custom factor.
pub fn frame_camera_with(stats: &BoundingStats, direction: Vec3, framing_factor: f32) -> CameraFrame {
  let direction = direction.try_normalize().unwrap_or(Vec3::Z);
  let distance = (stats.radius * framing_factor).max(MIN_CAMERA_DISTANCE);

  CameraFrame {
    target: stats.centroid,
    position: stats.centroid + direction * distance,
    distance,
    near: CAMERA_NEAR,
    far: (distance + stats.radius * 4.0).max(CAMERA_FAR_FLOOR),
    min_distance: MIN_CAMERA_DISTANCE,
    max_distance: (distance * 4.0).max(MAX_ORBIT_DISTANCE),
  }
}
