//! Buffer packer: primitives to flat, non-indexed triangle-list positions.
//!
//! ```text
//! PackMode::Global                      PackMode::Local
//! ────────────────                      ───────────────
//! facet vertices in world space         facet vertices relative to the
//!                                       primitive centroid
//! [ p0 facets | p1 facets | ... ]       [ p0 local | p1 local | ... ]
//!                                         │           │
//!                                         ▼           ▼
//!                                       PrimitiveInstance { vertices, origin }
//! ```
//!
//! Local mode separates shape (constant) from placement (animatable), so the
//! explode animation moves whole sub-meshes without touching vertex data.
//! Shared fractal vertices are emitted once per facet; no index buffer.

use std::ops::Range;

use glam::{DVec3, Vec3};
use rayon::prelude::*;

use crate::constants::{FALLBACK_DIRECTION, FLOATS_PER_VERTEX, PARALLEL_PACK_THRESHOLD};
use crate::types::{MeshBuffer, Primitive, PrimitiveKind};

/// Coordinate frame of packed vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PackMode {
  /// Absolute world coordinates.
  #[default]
  Global,
  /// Relative to each primitive's centroid, with one instance per primitive.
  Local,
}

/// Placement of one locally packed primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveInstance {
  /// Vertex range of this primitive inside the packed buffer.
  pub vertices: Range<usize>,
  /// Rest position: the primitive centroid in world space.
  pub origin: Vec3,
  /// Unit direction from the global centroid towards `origin`.
  pub direction: Vec3,
  /// Distance from the global centroid to `origin`.
  pub distance: f32,
}

impl PrimitiveInstance {
  /// Instance at rest with an unassigned (fallback) direction.
  pub fn new(vertices: Range<usize>, origin: Vec3) -> Self {
    Self {
      vertices,
      origin,
      direction: Vec3::from_array(FALLBACK_DIRECTION),
      distance: 0.0,
    }
  }
}

/// Packer output.
#[derive(Clone, Debug, Default)]
pub struct PackedMesh {
  pub mode: PackMode,
  pub mesh: MeshBuffer,
  /// One entry per primitive in local mode; empty in global mode.
  pub instances: Vec<PrimitiveInstance>,
}

#[inline]
fn origin_for(primitive: &Primitive, mode: PackMode) -> DVec3 {
  match mode {
    PackMode::Global => DVec3::ZERO,
    PackMode::Local => primitive.centroid(),
  }
}

/// Write every facet vertex of `primitive`, relative to `origin`, into `out`.
#[inline]
fn write_primitive(primitive: &Primitive, origin: DVec3, out: &mut [f32]) {
  let mut i = 0;
  for facet in primitive.facets() {
    for vertex in facet {
      let v = vertex - origin;
      out[i] = v.x as f32;
      out[i + 1] = v.y as f32;
      out[i + 2] = v.z as f32;
      i += FLOATS_PER_VERTEX;
    }
  }
}

/// Flatten `primitives` into a packed buffer.
///
/// Uniform inputs (the normal case: subdivision never mixes kinds) are
/// written into a preallocated buffer, in parallel once the input is large
/// enough. Output order always follows input order.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "packing::pack"))]
pub fn pack(primitives: &[Primitive], mode: PackMode) -> PackedMesh {
  let uniform = primitives
    .first()
    .map(Primitive::kind)
    .filter(|kind| primitives.iter().all(|p| p.kind() == *kind));

  let (positions, instances) = match uniform {
    Some(kind) => pack_uniform(primitives, kind, mode),
    None => pack_mixed(primitives, mode),
  };

  PackedMesh {
    mode,
    mesh: MeshBuffer::from_positions(positions),
    instances,
  }
}

fn pack_uniform(
  primitives: &[Primitive],
  kind: PrimitiveKind,
  mode: PackMode,
) -> (Vec<f32>, Vec<PrimitiveInstance>) {
  let stride = kind.packed_float_count();
  let mut positions = vec![0.0f32; primitives.len() * stride];

  if primitives.len() >= PARALLEL_PACK_THRESHOLD {
    positions
      .par_chunks_mut(stride)
      .zip(primitives.par_iter())
      .for_each(|(chunk, primitive)| write_primitive(primitive, origin_for(primitive, mode), chunk));
  } else {
    positions
      .chunks_mut(stride)
      .zip(primitives)
      .for_each(|(chunk, primitive)| write_primitive(primitive, origin_for(primitive, mode), chunk));
  }

  let instances = match mode {
    PackMode::Global => Vec::new(),
    PackMode::Local => {
      let per_primitive = kind.packed_vertex_count();
      primitives
        .iter()
        .enumerate()
        .map(|(i, primitive)| {
          let start = i * per_primitive;
          PrimitiveInstance::new(start..start + per_primitive, primitive.centroid().as_vec3())
        })
        .collect()
    }
  };

  (positions, instances)
}

fn pack_mixed(primitives: &[Primitive], mode: PackMode) -> (Vec<f32>, Vec<PrimitiveInstance>) {
  let total: usize = primitives.iter().map(|p| p.kind().packed_float_count()).sum();
  let mut positions = vec![0.0f32; total];
  let mut instances = Vec::new();
  let mut offset = 0;

  for primitive in primitives {
    let len = primitive.kind().packed_float_count();
    let origin = origin_for(primitive, mode);
    write_primitive(primitive, origin, &mut positions[offset..offset + len]);

    if mode == PackMode::Local {
      let start = offset / FLOATS_PER_VERTEX;
      instances.push(PrimitiveInstance::new(
        start..start + len / FLOATS_PER_VERTEX,
        origin.as_vec3(),
      ));
    }
    offset += len;
  }

  (positions, instances)
}

#[cfg(test)]
#[path = "packing_test.rs"]
mod packing_test;
