//! Explode animation: radial displacement of locally packed primitives.
//!
//! ```text
//! position = origin + direction * (oscillation(t) * amount * (1 + distance))
//! oscillation(t) = (1 - cos(speed * t)) / 2        in [0, 1], 0 at t = 0
//! ```
//!
//! Farther primitives travel farther, so the fractal opens up from the
//! centre rather than translating as a block.

use glam::Vec3;

use crate::constants::{DEFAULT_EXPLODE_AMOUNT, DEFAULT_EXPLODE_SPEED, EXPLODE_EPSILON, FALLBACK_DIRECTION};
use crate::packing::PrimitiveInstance;

/// Explode toggle and its animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplodeSettings {
  pub enabled: bool,
  /// Angular frequency of the oscillation, in radians per second.
  pub speed: f32,
  /// Peak displacement per unit of (1 + distance).
  pub amount: f32,
}

impl Default for ExplodeSettings {
  fn default() -> Self {
    Self {
      enabled: false,
      speed: DEFAULT_EXPLODE_SPEED,
      amount: DEFAULT_EXPLODE_AMOUNT,
    }
  }
}

/// Periodic explode phase in [0, 1].
#[inline]
pub fn oscillation(elapsed: f32, speed: f32) -> f32 {
  0.5 * (1.0 - (elapsed * speed).cos())
}

/// Assign each instance its direction and distance from `centroid`.
///
/// Instances closer than [`EXPLODE_EPSILON`] to the centroid keep the
/// fallback +Y direction.
pub fn orient_instances(instances: &mut [PrimitiveInstance], centroid: Vec3) {
  for instance in instances {
    let offset = instance.origin - centroid;
    let distance = offset.length();
    instance.distance = distance;
    instance.direction = if distance < EXPLODE_EPSILON {
      Vec3::from_array(FALLBACK_DIRECTION)
    } else {
      offset / distance
    };
  }
}

/// Animated position of one instance at a given phase.
#[inline]
pub fn displaced_position(instance: &PrimitiveInstance, phase: f32, amount: f32) -> Vec3 {
  instance.origin + instance.direction * (phase * amount * (1.0 + instance.distance))
}

/// Recompute every instance position into `out`, reusing its allocation.
pub fn displace_all(instances: &[PrimitiveInstance], phase: f32, amount: f32, out: &mut Vec<Vec3>) {
  out.clear();
  out.extend(
    instances
      .iter()
      .map(|instance| displaced_position(instance, phase, amount)),
  );
}
