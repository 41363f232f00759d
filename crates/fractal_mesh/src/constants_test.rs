use super::*;

#[test]
fn test_max_depth_fits_frame_budget() {
  // 12 vertices per tetrahedron at the deepest level must stay under 1M.
  let vertices = TETRAHEDRON_VERTICES * TETRAHEDRON_CHILDREN.pow(MAX_DEPTH);
  assert!(vertices < 1_000_000);
}

#[test]
fn test_default_depth_in_range() {
  assert!(DEFAULT_DEPTH <= MAX_DEPTH);
}

#[test]
fn test_vertex_counts_match_faces() {
  assert_eq!(TRIANGLE_VERTICES, 3);
  assert_eq!(TETRAHEDRON_VERTICES, 4 * 3);
}

#[test]
fn test_fallback_direction_is_unit() {
  let [x, y, z] = FALLBACK_DIRECTION;
  assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-6);
}

#[test]
fn test_framing_factors_clear_geometry() {
  // Any factor below 1 would put the camera inside the bounding sphere.
  assert!(TRIANGLE_FRAMING_FACTOR > 1.0);
  assert!(TETRAHEDRON_FRAMING_FACTOR > 1.0);
  assert!(SHADOW_PAD_FACTOR > 1.0);
}
