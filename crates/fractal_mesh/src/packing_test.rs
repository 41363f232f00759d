use glam::{DVec3, Vec3};

use super::*;
use crate::constants::PARALLEL_PACK_THRESHOLD;
use crate::subdivision::{subdivide, subdivide_variant};
use crate::types::ShapeVariant;

fn floats(points: &[DVec3]) -> Vec<f32> {
  points
    .iter()
    .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
    .collect()
}

// =============================================================================
// Global mode
// =============================================================================

#[test]
fn test_global_triangle_depth_one_layout() {
  let base = ShapeVariant::Triangle.base_primitive(1.0);
  let [a, b, c] = match base {
    Primitive::Triangle(corners) => corners,
    _ => panic!("Expected triangle"),
  };
  let ab = (a + b) * 0.5;
  let bc = (b + c) * 0.5;
  let ca = (c + a) * 0.5;

  let packed = pack(&subdivide(base, 1), PackMode::Global);

  assert_eq!(packed.mesh.vertex_count(), 9);
  assert_eq!(
    packed.mesh.positions(),
    floats(&[a, ab, ca, ab, b, bc, ca, bc, c]).as_slice()
  );
  assert!(packed.instances.is_empty());
}

#[test]
fn test_global_tetrahedron_emits_four_faces() {
  let base = ShapeVariant::Tetrahedron.base_primitive(1.0);
  let [a, b, c, d] = match base {
    Primitive::Tetrahedron(corners) => corners,
    _ => panic!("Expected tetrahedron"),
  };

  let packed = pack(&[base], PackMode::Global);

  assert_eq!(packed.mesh.vertex_count(), 12);
  assert_eq!(packed.mesh.triangle_count(), 4);
  assert_eq!(
    packed.mesh.positions(),
    floats(&[a, b, c, a, c, d, a, d, b, b, d, c]).as_slice()
  );
}

#[test]
fn test_global_buffer_size_scales_with_depth() {
  for depth in 0..=4 {
    let leaves = subdivide_variant(ShapeVariant::Tetrahedron, 1.0, depth);
    let packed = pack(&leaves, PackMode::Global);
    assert_eq!(packed.mesh.vertex_count(), 12 * 4usize.pow(depth));
  }
}

#[test]
fn test_global_bounds_match_base_shape() {
  let base = ShapeVariant::Triangle.base_primitive(1.0);
  let packed = pack(&subdivide(base, 4), PackMode::Global);
  let base_packed = pack(&[base], PackMode::Global);

  assert_eq!(packed.mesh.bounds(), base_packed.mesh.bounds());
}

// =============================================================================
// Local mode
// =============================================================================

#[test]
fn test_local_mode_records_one_instance_per_primitive() {
  let leaves = subdivide_variant(ShapeVariant::Tetrahedron, 1.0, 2);
  let packed = pack(&leaves, PackMode::Local);

  assert_eq!(packed.mode, PackMode::Local);
  assert_eq!(packed.instances.len(), leaves.len());

  for (i, (instance, primitive)) in packed.instances.iter().zip(&leaves).enumerate() {
    assert_eq!(instance.vertices, i * 12..(i + 1) * 12);
    assert_eq!(instance.origin, primitive.centroid().as_vec3());
  }
}

#[test]
fn test_local_vertices_reconstruct_world_positions() {
  let leaves = subdivide_variant(ShapeVariant::Tetrahedron, 1.0, 2);
  let local = pack(&leaves, PackMode::Local);
  let global = pack(&leaves, PackMode::Global);

  for instance in &local.instances {
    for v in instance.vertices.clone() {
      let world = local.mesh.vertex(v) + instance.origin;
      assert!(world.distance(global.mesh.vertex(v)) < 1e-5);
    }
  }
}

#[test]
fn test_local_shapes_are_centred() {
  let leaves = subdivide_variant(ShapeVariant::Tetrahedron, 1.0, 3);
  let packed = pack(&leaves, PackMode::Local);

  for instance in &packed.instances {
    // Each corner appears in exactly three of the twelve face vertices.
    let sum: Vec3 = instance.vertices.clone().map(|v| packed.mesh.vertex(v)).sum();
    assert!(sum.length() < 1e-5);
  }
}

// =============================================================================
// Parallel path
// =============================================================================

#[test]
fn test_parallel_pack_matches_per_primitive_pack() {
  let leaves = subdivide_variant(ShapeVariant::Tetrahedron, 1.0, 6);
  assert!(leaves.len() >= PARALLEL_PACK_THRESHOLD);

  for mode in [PackMode::Global, PackMode::Local] {
    let packed = pack(&leaves, mode);
    let mut expected = Vec::with_capacity(packed.mesh.positions().len());
    for primitive in &leaves {
      expected.extend_from_slice(pack(std::slice::from_ref(primitive), mode).mesh.positions());
    }
    assert_eq!(packed.mesh.positions(), expected.as_slice());
  }
}

#[test]
fn test_mixed_input_packs_sequentially() {
  let tri = ShapeVariant::Triangle.base_primitive(1.0);
  let tet = ShapeVariant::Tetrahedron.base_primitive(1.0);

  let packed = pack(&[tri, tet], PackMode::Local);

  assert_eq!(packed.mesh.vertex_count(), 3 + 12);
  assert_eq!(packed.instances[0].vertices, 0..3);
  assert_eq!(packed.instances[1].vertices, 3..15);
}

#[test]
fn test_empty_input() {
  let packed = pack(&[], PackMode::Global);
  assert!(packed.mesh.is_empty());
  assert!(packed.instances.is_empty());
}
