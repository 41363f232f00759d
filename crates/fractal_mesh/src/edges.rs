//! Outline extraction: feature edges of a packed triangle list.
//!
//! Vertices are matched by position because packed buffers carry no index
//! data. Positions are quantized to [`EDGE_HASH_PRECISION`] steps per unit,
//! refined for meshes smaller than one unit so deep levels of a small shape
//! still resolve. An edge shared by two faces is
//! kept only when their normals differ by more than the threshold angle;
//! edges owned by a single face are always kept.

use std::collections::HashMap;

use glam::Vec3;

use crate::constants::{EDGE_HASH_PRECISION, FLOATS_PER_VERTEX};
use crate::types::MeshBuffer;

/// Line-list positions: two vertices per segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeBuffer {
  positions: Vec<f32>,
}

impl EdgeBuffer {
  pub fn positions(&self) -> &[f32] {
    &self.positions
  }

  pub fn segment_count(&self) -> usize {
    self.positions.len() / (2 * FLOATS_PER_VERTEX)
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  pub fn byte_len(&self) -> usize {
    self.positions.len() * std::mem::size_of::<f32>()
  }

  /// Endpoints of segment `index`.
  pub fn segment(&self, index: usize) -> (Vec3, Vec3) {
    let i = index * 2 * FLOATS_PER_VERTEX;
    let p = &self.positions[i..i + 2 * FLOATS_PER_VERTEX];
    (Vec3::new(p[0], p[1], p[2]), Vec3::new(p[3], p[4], p[5]))
  }

  fn push(&mut self, start: Vec3, end: Vec3) {
    self.positions.extend_from_slice(&start.to_array());
    self.positions.extend_from_slice(&end.to_array());
  }
}

type VertexKey = [i64; 3];

#[inline]
fn vertex_key(v: Vec3, precision: f32) -> VertexKey {
  let q = |c: f32| (c * precision).round() as i64;
  [q(v.x), q(v.y), q(v.z)]
}

/// Quantization steps per unit for `mesh`: the fixed precision, scaled up by
/// the inverse extent when the mesh spans less than one unit.
fn hash_precision(mesh: &MeshBuffer) -> f32 {
  let extent = mesh.bounds().size().max_element();
  if extent.is_finite() && extent > 0.0 && extent < 1.0 {
    EDGE_HASH_PRECISION / extent
  } else {
    EDGE_HASH_PRECISION
  }
}

/// First face seen for a directed edge, waiting for its twin.
struct OpenEdge {
  start: Vec3,
  end: Vec3,
  normal: Vec3,
}

/// Collect feature edges of `mesh`.
///
/// Output order is deterministic: paired edges in face order, then unpaired
/// edges in first-seen order. Degenerate faces contribute nothing.
#[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "edges::extract_edges"))]
pub fn extract_edges(mesh: &MeshBuffer, threshold_degrees: f32) -> EdgeBuffer {
  let threshold_dot = threshold_degrees.to_radians().cos();
  let precision = hash_precision(mesh);
  let mut lookup: HashMap<(VertexKey, VertexKey), usize> = HashMap::new();
  let mut open: Vec<Option<OpenEdge>> = Vec::new();
  let mut edges = EdgeBuffer::default();

  for face in 0..mesh.triangle_count() {
    let v = [
      mesh.vertex(face * 3),
      mesh.vertex(face * 3 + 1),
      mesh.vertex(face * 3 + 2),
    ];
    let keys = v.map(|p| vertex_key(p, precision));
    if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
      continue;
    }
    let normal = (v[1] - v[0]).cross(v[2] - v[0]).normalize_or_zero();

    for j in 0..3 {
      let next = (j + 1) % 3;
      let forward = (keys[j], keys[next]);
      let reverse = (keys[next], keys[j]);

      let twin = lookup.get(&reverse).and_then(|&slot| open[slot].take());
      if let Some(twin) = twin {
        if normal.dot(twin.normal) <= threshold_dot {
          edges.push(v[j], v[next]);
        }
      } else if !lookup.contains_key(&forward) {
        lookup.insert(forward, open.len());
        open.push(Some(OpenEdge {
          start: v[j],
          end: v[next],
          normal,
        }));
      }
    }
  }

  for edge in open.into_iter().flatten() {
    edges.push(edge.start, edge.end);
  }

  edges
}

#[cfg(test)]
#[path = "edges_test.rs"]
mod edges_test;
