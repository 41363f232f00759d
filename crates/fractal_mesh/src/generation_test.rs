use glam::Vec3;

use super::*;

fn params(variant: ShapeVariant, depth: u32, mode: PackMode) -> GenerationParams {
  GenerationParams {
    depth,
    variant,
    color: Rgb::default(),
    scale: 1.0,
    mode,
    outline: true,
  }
}

#[test]
fn test_global_build_packs_world_space() {
  let tracker = ResidencyTracker::new();
  let generation = Generation::build(params(ShapeVariant::Triangle, 3, PackMode::Global), &tracker);

  assert_eq!(generation.primitive_count(), 27);
  assert_eq!(generation.mesh().vertex_count(), 27 * 3);
  assert!(generation.instances().is_empty());
  assert_eq!(generation.stats().min, generation.mesh().bounds().min);
  assert_eq!(generation.mode(), PackMode::Global);
}

#[test]
fn test_local_build_orients_instances() {
  let tracker = ResidencyTracker::new();
  let generation = Generation::build(params(ShapeVariant::Tetrahedron, 2, PackMode::Local), &tracker);

  assert_eq!(generation.instances().len(), 16);
  let centroid = generation.stats().centroid;
  for instance in generation.instances() {
    assert!((instance.direction.length() - 1.0).abs() < 1e-5);
    assert!((instance.distance - instance.origin.distance(centroid)).abs() < 1e-5);
  }
}

#[test]
fn test_edges_only_in_global_mode() {
  let tracker = ResidencyTracker::new();
  let global = Generation::build(params(ShapeVariant::Tetrahedron, 1, PackMode::Global), &tracker);
  let local = Generation::build(params(ShapeVariant::Tetrahedron, 1, PackMode::Local), &tracker);

  assert!(global.edges().is_some_and(|e| e.segment_count() == 4 * 6));
  assert!(local.edges().is_none());
}

#[test]
fn test_outline_can_be_disabled() {
  let tracker = ResidencyTracker::new();
  let mut p = params(ShapeVariant::Triangle, 2, PackMode::Global);
  p.outline = false;

  assert!(Generation::build(p, &tracker).edges().is_none());
}

#[test]
fn test_ground_sits_below_geometry() {
  let tracker = ResidencyTracker::new();
  for mode in [PackMode::Global, PackMode::Local] {
    let generation = Generation::build(params(ShapeVariant::Tetrahedron, 3, mode), &tracker);
    let ground = generation.ground();
    let stats = generation.stats();

    assert!(ground.height < stats.min.y);
    assert_eq!(ground.center.x, stats.centroid.x);
    assert_eq!(ground.center.z, stats.centroid.z);
    assert_eq!(ground.mesh().vertex_count(), 6);
    assert!(ground.mesh().vertices().all(|v| v.y == ground.height));
  }
}

#[test]
fn test_ground_faces_up() {
  let tracker = ResidencyTracker::new();
  let generation = Generation::build(params(ShapeVariant::Triangle, 0, PackMode::Global), &tracker);
  let mesh = generation.ground().mesh();

  for tri in 0..2 {
    let (a, b, c) = (mesh.vertex(tri * 3), mesh.vertex(tri * 3 + 1), mesh.vertex(tri * 3 + 2));
    assert!((b - a).cross(c - a).dot(Vec3::Y) > 0.0);
  }
}

#[test]
fn test_residency_follows_generation_lifetime() {
  let tracker = ResidencyTracker::new();
  let generation = Generation::build(params(ShapeVariant::Tetrahedron, 2, PackMode::Global), &tracker);
  let id = generation.id();

  assert!(tracker.is_resident(id));
  assert_eq!(tracker.resident_bytes(), generation.resident_bytes());
  assert!(generation.resident_bytes() >= generation.mesh().byte_len());

  drop(generation);
  assert!(!tracker.is_resident(id));
  assert_eq!(tracker.resident_bytes(), 0);
}

#[test]
fn test_generation_ids_increase() {
  let tracker = ResidencyTracker::new();
  let first = Generation::build(params(ShapeVariant::Triangle, 0, PackMode::Global), &tracker);
  let second = Generation::build(params(ShapeVariant::Triangle, 0, PackMode::Global), &tracker);

  assert!(second.id() > first.id());
}

#[test]
fn test_identical_params_produce_identical_buffers() {
  let tracker = ResidencyTracker::new();
  let p = params(ShapeVariant::Tetrahedron, 4, PackMode::Local);
  let a = Generation::build(p, &tracker);
  let b = Generation::build(p, &tracker);

  assert_eq!(a.mesh(), b.mesh());
  assert_eq!(a.instances(), b.instances());
  assert_eq!(a.stats(), b.stats());
}
