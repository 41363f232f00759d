//! Bounding analyzer: centroid, bounding sphere and box of a generation.
//!
//! Two fits are used depending on how the mesh was packed:
//!
//! - **Global**: centroid is the centre of the vertex bounding box and the
//!   radius is the farthest vertex from it. All box extents are exact.
//! - **Local**: centroid is the unweighted mean of the primitive origins.
//!   Only the minimum Y is tracked exactly (ground placement); the remaining
//!   extents are taken from the bounding sphere.

use glam::{DVec3, Vec3};

use crate::packing::PrimitiveInstance;
use crate::types::{MeshBuffer, MinMaxAABB};

/// Read-only bounding snapshot of one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingStats {
  pub centroid: Vec3,
  /// Bounding-sphere radius around `centroid` (>= 0).
  pub radius: f32,
  pub min: Vec3,
  pub max: Vec3,
}

impl BoundingStats {
  /// Largest side of the bounding box.
  pub fn max_extent(&self) -> f32 {
    (self.max - self.min).max_element().max(0.0)
  }

  pub fn aabb(&self) -> MinMaxAABB {
    MinMaxAABB::new(self.min, self.max)
  }

  pub fn is_empty(&self) -> bool {
    self.radius == 0.0 && self.min == self.max
  }
}

/// Fit stats over world-space positions.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "bounds::analyze_global"))]
pub fn analyze_global(mesh: &MeshBuffer) -> BoundingStats {
  if mesh.is_empty() {
    return BoundingStats::default();
  }

  let bounds = mesh.bounds();
  let centroid = bounds.center();
  let radius_sq = mesh
    .vertices()
    .map(|v| v.distance_squared(centroid))
    .fold(0.0f32, f32::max);

  BoundingStats {
    centroid,
    radius: radius_sq.sqrt(),
    min: bounds.min,
    max: bounds.max,
  }
}

/// Fit stats over centroid-relative positions placed by `instances`.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "bounds::analyze_local"))]
pub fn analyze_local(instances: &[PrimitiveInstance], mesh: &MeshBuffer) -> BoundingStats {
  if instances.is_empty() {
    return BoundingStats::default();
  }

  let sum: DVec3 = instances.iter().map(|i| i.origin.as_dvec3()).sum();
  let centroid = (sum / instances.len() as f64).as_vec3();

  let mut radius_sq = 0.0f32;
  let mut min_y = f32::INFINITY;
  for instance in instances {
    for v in instance.vertices.clone() {
      let world = instance.origin + mesh.vertex(v);
      radius_sq = radius_sq.max(world.distance_squared(centroid));
      min_y = min_y.min(world.y);
    }
  }

  let radius = radius_sq.sqrt();
  if !min_y.is_finite() {
    min_y = centroid.y - radius;
  }

  BoundingStats {
    centroid,
    radius,
    min: Vec3::new(centroid.x - radius, min_y, centroid.z - radius),
    max: centroid + Vec3::splat(radius),
  }
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;
