//! Residency tracking for generation resources.
//!
//! Every [`Generation`](crate::generation::Generation) holds a
//! [`ResidencyGuard`] for as long as its buffers are alive. The tracker is the
//! ledger of those guards, which makes leaks across rebuilds observable: after
//! any sequence of rebuilds exactly one entry may remain.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::generation::GenerationId;

/// Shared ledger of resident generations and their buffer sizes.
#[derive(Clone, Debug, Default)]
pub struct ResidencyTracker {
  resident: Arc<Mutex<HashMap<GenerationId, usize>>>,
}

impl ResidencyTracker {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<GenerationId, usize>> {
    // Entries are plain integers, a poisoned map is still consistent.
    self.resident.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Record `id` as resident with `bytes` of buffer data.
  pub fn admit(&self, id: GenerationId, bytes: usize) -> ResidencyGuard {
    self.lock().insert(id, bytes);
    ResidencyGuard {
      tracker: self.clone(),
      id,
    }
  }

  fn release(&self, id: GenerationId) {
    self.lock().remove(&id);
  }

  pub fn is_resident(&self, id: GenerationId) -> bool {
    self.lock().contains_key(&id)
  }

  /// Resident generation ids, oldest first.
  pub fn resident_ids(&self) -> Vec<GenerationId> {
    let mut ids: Vec<_> = self.lock().keys().copied().collect();
    ids.sort();
    ids
  }

  pub fn resident_count(&self) -> usize {
    self.lock().len()
  }

  /// Total buffer bytes across resident generations.
  pub fn resident_bytes(&self) -> usize {
    self.lock().values().sum()
  }
}

/// Keeps a generation registered until dropped.
#[derive(Debug)]
pub struct ResidencyGuard {
  tracker: ResidencyTracker,
  id: GenerationId,
}

impl ResidencyGuard {
  pub fn id(&self) -> GenerationId {
    self.id
  }
}

impl Drop for ResidencyGuard {
  fn drop(&mut self) {
    self.tracker.release(self.id);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_guard_releases_on_drop() {
    let tracker = ResidencyTracker::new();
    let id = GenerationId::new();

    let guard = tracker.admit(id, 128);
    assert!(tracker.is_resident(id));
    assert_eq!(tracker.resident_bytes(), 128);

    drop(guard);
    assert!(!tracker.is_resident(id));
    assert_eq!(tracker.resident_count(), 0);
    assert_eq!(tracker.resident_bytes(), 0);
  }

  #[test]
  fn test_clones_share_ledger() {
    let tracker = ResidencyTracker::new();
    let view = tracker.clone();

    let a = tracker.admit(GenerationId::new(), 10);
    let b = tracker.admit(GenerationId::new(), 20);

    assert_eq!(view.resident_count(), 2);
    assert_eq!(view.resident_bytes(), 30);
    assert_eq!(view.resident_ids(), vec![a.id(), b.id()]);
  }
}
