//! Tuning constants for generation, framing, shadows and explode.
//!
//! # Depth Budget
//!
//! ```text
//! depth   triangles (3^d)   tetrahedra (4^d)   tetra vertices (12 * 4^d)
//!   0            1                  1                    12
//!   3           27                 64                   768
//!   5          243               1024                 12288
//!   8         6561              65536                786432
//! ```
//!
//! Depth 8 is the deepest rebuild that still completes inside a frame budget,
//! so [`MAX_DEPTH`] caps every configured maximum.
//!
//! # View Rig
//!
//! ```text
//!                 light (centroid + LIGHT_OFFSET * 2 * half_width)
//!                   \
//!                    \      ┌──────── shadow frustum ────────┐
//!                     \     │ half_width = radius * PAD      │
//!                      ▼    │ far = max(FLOOR, radius * FAR) │
//!                  centroid └────────────────────────────────┘
//!                      ▲
//!                      │ distance = max(MIN, radius * framing_factor)
//!                   camera
//! ```

/// Hard upper bound for any configured maximum depth.
pub const MAX_DEPTH: u32 = 8;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: u32 = 3;

/// Corner children produced per triangle subdivision step.
pub const TRIANGLE_CHILDREN: usize = 3;

/// Corner children produced per tetrahedron subdivision step.
pub const TETRAHEDRON_CHILDREN: usize = 4;

/// Floats per packed vertex (x, y, z).
pub const FLOATS_PER_VERTEX: usize = 3;

/// Vertices emitted per packed triangle primitive.
pub const TRIANGLE_VERTICES: usize = 3;

/// Vertices emitted per packed tetrahedron primitive (4 faces x 3).
pub const TETRAHEDRON_VERTICES: usize = 12;

/// Primitive count above which packing fans out over rayon.
pub const PARALLEL_PACK_THRESHOLD: usize = 4096;

// =============================================================================
// Framing
// =============================================================================

/// Closest the camera is ever placed to the view target.
pub const MIN_CAMERA_DISTANCE: f32 = 1.2;

/// Camera distance per unit of bounding radius for the triangle variant.
pub const TRIANGLE_FRAMING_FACTOR: f32 = 2.6;

/// Camera distance per unit of bounding radius for the tetrahedron variant.
pub const TETRAHEDRON_FRAMING_FACTOR: f32 = 3.0;

/// Default orbit limit when the framed distance is small.
pub const MAX_ORBIT_DISTANCE: f32 = 10.0;

/// Perspective near clip plane.
pub const CAMERA_NEAR: f32 = 0.1;

/// Smallest far clip plane handed to the camera.
pub const CAMERA_FAR_FLOOR: f32 = 100.0;

// =============================================================================
// Shadows
// =============================================================================

/// Shadow frustum half-width per unit of bounding radius.
pub const SHADOW_PAD_FACTOR: f32 = 1.6;

/// Shadow far plane per unit of bounding radius.
pub const SHADOW_FAR_FACTOR: f32 = 6.0;

/// Smallest shadow far plane.
pub const SHADOW_FAR_FLOOR: f32 = 50.0;

/// Shadow camera near plane.
pub const SHADOW_NEAR: f32 = 0.1;

/// Unnormalized direction from the centroid towards the directional light.
pub const LIGHT_OFFSET: [f32; 3] = [5.0, 10.0, 7.0];

// =============================================================================
// Explode
// =============================================================================

/// Below this centroid distance an instance uses [`FALLBACK_DIRECTION`].
pub const EXPLODE_EPSILON: f32 = 1e-6;

/// Direction used when an instance sits on the global centroid.
pub const FALLBACK_DIRECTION: [f32; 3] = [0.0, 1.0, 0.0];

pub const DEFAULT_EXPLODE_SPEED: f32 = 1.0;

pub const DEFAULT_EXPLODE_AMOUNT: f32 = 0.5;

// =============================================================================
// Scene
// =============================================================================

/// `0xRRGGBB` fill colour of a fresh configuration.
pub const DEFAULT_COLOR: u32 = 0x44c88d;

/// Rotation around +Y in radians per second.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.4;

/// Ground plane half-size per unit of bounding radius.
pub const GROUND_SIZE_FACTOR: f32 = 3.0;

/// Gap between the lowest vertex and the ground plane.
pub const GROUND_CLEARANCE: f32 = 0.001;

/// Dihedral angle (degrees) above which a shared edge is drawn in the outline.
pub const EDGE_THRESHOLD_DEGREES: f32 = 1.0;

/// Quantization applied to positions when matching outline edges.
pub const EDGE_HASH_PRECISION: f32 = 1e4;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
