//! Generation - the complete output of one rebuild.
//!
//! A generation owns every buffer derived from a single parameter set:
//!
//! ```text
//! GenerationParams ──► subdivide ──► pack ──► analyze ──► orient ──► ground/edges
//!                                      │         │           │
//!                                   MeshBuffer  Stats   PrimitiveInstance[]
//! ```
//!
//! Dropping a generation releases all of it, including its residency entry.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;
use web_time::Instant;

use crate::bounds::{analyze_global, analyze_local, BoundingStats};
use crate::constants::{EDGE_THRESHOLD_DEGREES, GROUND_CLEARANCE, GROUND_SIZE_FACTOR};
use crate::edges::{extract_edges, EdgeBuffer};
use crate::packing::{pack, PackMode, PrimitiveInstance};
use crate::residency::{ResidencyGuard, ResidencyTracker};
use crate::subdivision::subdivide_variant;
use crate::types::{MeshBuffer, Rgb, ShapeVariant};
use crate::view::orient_instances;

// =============================================================================
// GenerationId - unique identifier
// =============================================================================

/// Atomic counter for generating unique GenerationIds.
static GENERATION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque generation identifier, increasing with every rebuild.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GenerationId(u64);

impl GenerationId {
  /// Generate a new unique GenerationId.
  pub fn new() -> Self {
    Self(GENERATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for GenerationId {
  fn default() -> Self {
    Self::new()
  }
}

// =============================================================================
// GroundPlane
// =============================================================================

/// Ground quad placed just below the lowest vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundPlane {
  pub height: f32,
  /// Quad centre (centroid X/Z at `height`).
  pub center: Vec3,
  pub half_size: f32,
  mesh: MeshBuffer,
}

impl GroundPlane {
  pub fn from_stats(stats: &BoundingStats) -> Self {
    let height = stats.min.y - GROUND_CLEARANCE;
    let center = Vec3::new(stats.centroid.x, height, stats.centroid.z);
    let half_size = stats.radius * GROUND_SIZE_FACTOR;

    let corner = |x: f32, z: f32| center + Vec3::new(x * half_size, 0.0, z * half_size);
    let (p0, p1, p2, p3) = (
      corner(-1.0, -1.0),
      corner(-1.0, 1.0),
      corner(1.0, 1.0),
      corner(1.0, -1.0),
    );
    // Two triangles wound to face +Y.
    let positions = [p0, p1, p2, p0, p2, p3]
      .iter()
      .flat_map(|p| p.to_array())
      .collect();

    Self {
      height,
      center,
      half_size,
      mesh: MeshBuffer::from_positions(positions),
    }
  }

  pub fn mesh(&self) -> &MeshBuffer {
    &self.mesh
  }
}

// =============================================================================
// Generation
// =============================================================================

/// Inputs of one rebuild, already clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationParams {
  pub depth: u32,
  pub variant: ShapeVariant,
  pub color: Rgb,
  pub scale: f64,
  pub mode: PackMode,
  /// Build the outline edge buffer (global mode only).
  pub outline: bool,
}

/// One live set of buffers and derived data.
#[derive(Debug)]
pub struct Generation {
  id: GenerationId,
  params: GenerationParams,
  primitive_count: usize,
  mesh: MeshBuffer,
  instances: Vec<PrimitiveInstance>,
  stats: BoundingStats,
  ground: GroundPlane,
  edges: Option<EdgeBuffer>,
  build_time_us: u64,
  resident_bytes: usize,
  _residency: ResidencyGuard,
}

impl Generation {
  /// Run the full pipeline for `params` and register the result.
  #[cfg_attr(feature = "profiling", tracing::instrument(skip_all, name = "generation::build"))]
  pub fn build(params: GenerationParams, tracker: &ResidencyTracker) -> Self {
    let start = Instant::now();

    let primitives = subdivide_variant(params.variant, params.scale, params.depth);
    let primitive_count = primitives.len();
    let packed = pack(&primitives, params.mode);
    drop(primitives);

    let stats = match packed.mode {
      PackMode::Global => analyze_global(&packed.mesh),
      PackMode::Local => analyze_local(&packed.instances, &packed.mesh),
    };

    let mut instances = packed.instances;
    orient_instances(&mut instances, stats.centroid);

    let ground = GroundPlane::from_stats(&stats);
    let edges = (params.outline && packed.mode == PackMode::Global)
      .then(|| extract_edges(&packed.mesh, EDGE_THRESHOLD_DEGREES));

    let id = GenerationId::new();
    let bytes = packed.mesh.byte_len()
      + instances.len() * std::mem::size_of::<PrimitiveInstance>()
      + ground.mesh().byte_len()
      + edges.as_ref().map_or(0, EdgeBuffer::byte_len);
    let _residency = tracker.admit(id, bytes);

    Self {
      id,
      params,
      primitive_count,
      mesh: packed.mesh,
      instances,
      stats,
      ground,
      edges,
      build_time_us: start.elapsed().as_micros() as u64,
      resident_bytes: bytes,
      _residency,
    }
  }

  pub fn id(&self) -> GenerationId {
    self.id
  }

  pub fn params(&self) -> &GenerationParams {
    &self.params
  }

  pub fn depth(&self) -> u32 {
    self.params.depth
  }

  pub fn variant(&self) -> ShapeVariant {
    self.params.variant
  }

  pub fn color(&self) -> Rgb {
    self.params.color
  }

  pub fn mode(&self) -> PackMode {
    self.params.mode
  }

  pub fn primitive_count(&self) -> usize {
    self.primitive_count
  }

  /// Packed positions: world space in global mode, centroid-relative in local.
  pub fn mesh(&self) -> &MeshBuffer {
    &self.mesh
  }

  /// Per-primitive placements (local mode only).
  pub fn instances(&self) -> &[PrimitiveInstance] {
    &self.instances
  }

  pub fn stats(&self) -> &BoundingStats {
    &self.stats
  }

  pub fn ground(&self) -> &GroundPlane {
    &self.ground
  }

  pub fn edges(&self) -> Option<&EdgeBuffer> {
    self.edges.as_ref()
  }

  pub fn build_time_us(&self) -> u64 {
    self.build_time_us
  }

  /// Bytes this generation reported to the residency ledger.
  pub fn resident_bytes(&self) -> usize {
    self.resident_bytes
  }
}

#[cfg(test)]
#[path = "generation_test.rs"]
mod generation_test;
