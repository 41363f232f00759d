//! Shared test helpers.

use std::sync::{Arc, Mutex};

use crate::generation::{Generation, GenerationId};
use crate::presentation::{FrameUpdate, PresentationLayer};
use crate::view::ViewUpdate;

/// Presentation callback as observed by [`RecordingPresentation`].
#[derive(Clone, Debug, PartialEq)]
pub enum PresentationEvent {
  Ready { id: GenerationId, depth: u32 },
  Dispose(GenerationId),
  View(ViewUpdate),
  Frame { rotation_y: f32, explode_phase: f32, instances: usize },
}

/// Records every callback. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresentation {
  events: Arc<Mutex<Vec<PresentationEvent>>>,
}

impl RecordingPresentation {
  pub fn new() -> Self {
    Self::default()
  }

  fn push(&self, event: PresentationEvent) {
    self.events.lock().unwrap().push(event);
  }

  pub fn events(&self) -> Vec<PresentationEvent> {
    self.events.lock().unwrap().clone()
  }

  /// Drain recorded events.
  pub fn take(&self) -> Vec<PresentationEvent> {
    std::mem::take(&mut *self.events.lock().unwrap())
  }

  pub fn frame_count(&self) -> usize {
    self
      .events()
      .iter()
      .filter(|e| matches!(e, PresentationEvent::Frame { .. }))
      .count()
  }
}

impl PresentationLayer for RecordingPresentation {
  fn on_generation_ready(&self, generation: &Generation) {
    self.push(PresentationEvent::Ready {
      id: generation.id(),
      depth: generation.depth(),
    });
  }

  fn on_generation_dispose(&self, id: GenerationId) {
    self.push(PresentationEvent::Dispose(id));
  }

  fn on_view_changed(&self, view: &ViewUpdate) {
    self.push(PresentationEvent::View(*view));
  }

  fn on_frame(&self, frame: &FrameUpdate<'_>) {
    self.push(PresentationEvent::Frame {
      rotation_y: frame.rotation_y,
      explode_phase: frame.explode_phase,
      instances: frame.instance_positions.len(),
    });
  }
}
