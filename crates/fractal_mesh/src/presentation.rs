//! PresentationLayer - callback interface for rendering bridges.
//!
//! The core never touches a renderer. It publishes generations, view updates
//! and per-frame placements through this trait; the bridge uploads buffers,
//! positions the camera and light, and releases GPU copies on dispose.

use glam::Vec3;

use crate::generation::{Generation, GenerationId};
use crate::view::ViewUpdate;

/// Per-frame animation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate<'a> {
  /// Accumulated rotation around +Y in radians, wrapped to [0, 2π).
  pub rotation_y: f32,
  /// Current explode phase in [0, 1]; 0 when explode is inactive.
  pub explode_phase: f32,
  /// World position of every primitive instance (empty in global mode).
  pub instance_positions: &'a [Vec3],
}

/// Callback interface for rendering bridges.
///
/// # Example
///
/// ```ignore
/// struct GpuBridge { uploads: Mutex<HashMap<GenerationId, BufferHandle>> }
///
/// impl PresentationLayer for GpuBridge {
///     fn on_generation_ready(&self, generation: &Generation) {
///         let handle = upload(generation.mesh().positions());
///         self.uploads.lock().unwrap().insert(generation.id(), handle);
///     }
///     fn on_generation_dispose(&self, id: GenerationId) {
///         self.uploads.lock().unwrap().remove(&id);
///     }
///     // ...
/// }
/// ```
pub trait PresentationLayer: Send + Sync {
  /// A new generation has been built and should replace the displayed one.
  fn on_generation_ready(&self, generation: &Generation);

  /// The generation is being released; drop every copy of its buffers.
  fn on_generation_dispose(&self, id: GenerationId);

  /// Camera framing and light/shadow bounds changed.
  fn on_view_changed(&self, view: &ViewUpdate);

  /// Called once per tick with the current animation state.
  fn on_frame(&self, frame: &FrameUpdate<'_>);
}

/// No-op implementation for testing and headless operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl PresentationLayer for NullPresentation {
  fn on_generation_ready(&self, _generation: &Generation) {
    // No-op
  }

  fn on_generation_dispose(&self, _id: GenerationId) {
    // No-op
  }

  fn on_view_changed(&self, _view: &ViewUpdate) {
    // No-op
  }

  fn on_frame(&self, _frame: &FrameUpdate<'_>) {
    // No-op
  }
}
