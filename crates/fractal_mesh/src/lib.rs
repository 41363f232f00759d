//! fractal_mesh - Engine-independent Sierpinski fractal meshing
//!
//! This crate builds Sierpinski triangles and tetrahedra by recursive corner
//! subdivision, packs them into flat GPU-ready position buffers, measures
//! them, and manages live regeneration with camera, shadow and explode
//! views derived from each result.
//!
//! # Features
//!
//! - **Subdivision**: deterministic depth-first corner subdivision
//! - **Packing**: world-space (global) or per-primitive (local) layouts
//! - **Bounds**: centroid, radius and box extents for framing
//! - **Lifecycle**: dispose-then-rebuild transitions with residency tracking
//! - **Views**: camera framing, shadow frustum fitting and explode animation
//!
//! # Example
//!
//! ```ignore
//! use fractal_mesh::{FractalConfig, LifecycleManager, Rgb, ShapeVariant};
//!
//! let mut manager = LifecycleManager::headless(FractalConfig::default());
//! let generation = manager.regenerate(4, Rgb::from_hex(0x44c88d), ShapeVariant::Tetrahedron);
//!
//! println!("{} primitives, {} vertices",
//!     generation.primitive_count(), generation.mesh().vertex_count());
//!
//! manager.tick(0.016, 0.016);
//! ```

pub mod constants;
pub mod types;

// Re-export commonly used items
pub use constants::{DEFAULT_DEPTH, MAX_DEPTH};
pub use types::{MeshBuffer, MinMaxAABB, Point3, Primitive, PrimitiveKind, Rgb, ShapeVariant};

// Subdivision engine
pub mod subdivision;
pub use subdivision::{expected_count, subdivide, subdivide_variant};

// Buffer packing
pub mod packing;
pub use packing::{pack, PackMode, PackedMesh, PrimitiveInstance};

// Bounding analysis
pub mod bounds;
pub use bounds::{analyze_global, analyze_local, BoundingStats};

// Feature-edge outline
pub mod edges;
pub use edges::{extract_edges, EdgeBuffer};

// Camera, shadow and explode views
pub mod view;
pub use view::{CameraFrame, ExplodeSettings, LightFrame, ViewUpdate};

// Generation lifecycle
pub mod generation;
pub use generation::{Generation, GenerationId, GenerationParams, GroundPlane};

pub mod residency;
pub use residency::{ResidencyGuard, ResidencyTracker};

pub mod config;
pub use config::FractalConfig;

pub mod lifecycle;
pub use lifecycle::{LifecycleManager, LifecycleState};

// Presentation abstraction (engine bridges implement this)
pub mod presentation;
pub use presentation::{FrameUpdate, NullPresentation, PresentationLayer};

// Metrics collection (feature-gated)
pub mod metrics;
pub use metrics::{FractalMetrics, RollingWindow};

#[cfg(test)]
pub(crate) mod test_utils;
