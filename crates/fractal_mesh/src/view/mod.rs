//! Derived-view controller.
//!
//! Everything here is a pure function of a generation's [`BoundingStats`]
//! (plus time, for explode), so the view is always recomputed from the
//! published snapshot and never mutates it.
//!
//! - [`framing`]: camera target, distance and clip planes
//! - [`shadow`]: directional light placement and shadow frustum
//! - [`explode`]: per-instance radial displacement

pub mod explode;
pub mod framing;
pub mod shadow;

pub use explode::{displace_all, displaced_position, orient_instances, oscillation, ExplodeSettings};
pub use framing::{frame_camera, CameraFrame};
pub use shadow::{fit_shadow, LightFrame};

use crate::bounds::BoundingStats;
use crate::types::ShapeVariant;

/// Camera and light derived from one generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewUpdate {
  pub camera: CameraFrame,
  pub light: LightFrame,
}

/// Frame the camera and fit the shadow frustum in one step.
pub fn compute_view(stats: &BoundingStats, variant: ShapeVariant) -> ViewUpdate {
  ViewUpdate {
    camera: frame_camera(stats, variant),
    light: fit_shadow(stats),
  }
}
