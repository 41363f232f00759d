//! Engine-agnostic metrics for fractal rebuild statistics.
//!
//! Feature-gated and runtime-toggled so disabled builds pay nothing.
//!
//! # Usage
//!
//! ```ignore
//! use fractal_mesh::metrics::{FractalMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! metrics.record_build(&generation);
//! metrics.record_dispose(&generation);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::generation::Generation;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window of recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl<T: Copy + Default + std::ops::Add<Output = T>> RollingWindow<T> {
  pub fn sum(&self) -> T {
    self.buffer.iter().copied().fold(T::default(), |acc, x| acc + x)
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(64)
  }
}

/// Rebuild statistics maintained by the lifecycle manager.
#[derive(Debug, Clone, Default)]
pub struct FractalMetrics {
  // Live generation
  pub live_depth: u32,
  pub live_primitives: u64,
  pub live_vertices: u64,
  /// Bytes reported to the residency ledger by the live generation.
  pub live_bytes: u64,

  // Timing
  /// Rolling window of full rebuild times in microseconds.
  pub build_timings: RollingWindow<u64>,
  pub last_build_us: u64,

  // Cumulative
  pub generations_built: u64,
  pub generations_disposed: u64,
}

impl FractalMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset live and timing values. Cumulative counters are kept.
  pub fn reset(&mut self) {
    self.live_depth = 0;
    self.live_primitives = 0;
    self.live_vertices = 0;
    self.live_bytes = 0;
    self.build_timings.clear();
    self.last_build_us = 0;
  }

  /// Record a generation that just became live.
  pub fn record_build(&mut self, generation: &Generation) {
    if !is_enabled() {
      return;
    }

    self.live_depth = generation.depth();
    self.live_primitives = generation.primitive_count() as u64;
    self.live_vertices = generation.mesh().vertex_count() as u64;
    self.live_bytes = generation.resident_bytes() as u64;
    self.build_timings.push(generation.build_time_us());
    self.last_build_us = generation.build_time_us();
    self.generations_built += 1;
  }

  /// Record the live generation being released.
  pub fn record_dispose(&mut self, generation: &Generation) {
    if !is_enabled() {
      return;
    }

    self.live_primitives = self
      .live_primitives
      .saturating_sub(generation.primitive_count() as u64);
    self.live_vertices = self
      .live_vertices
      .saturating_sub(generation.mesh().vertex_count() as u64);
    self.live_bytes = self.live_bytes.saturating_sub(generation.resident_bytes() as u64);
    self.generations_disposed += 1;
  }

  pub fn avg_build_timing_us(&self) -> f64 {
    self.build_timings.average()
  }

  pub fn live_memory_mb(&self) -> f64 {
    self.live_bytes as f64 / 1_048_576.0
  }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
  use super::*;
  use crate::generation::GenerationParams;
  use crate::packing::PackMode;
  use crate::residency::ResidencyTracker;
  use crate::types::{Rgb, ShapeVariant};

  fn build(depth: u32, tracker: &ResidencyTracker) -> Generation {
    Generation::build(
      GenerationParams {
        depth,
        variant: ShapeVariant::Triangle,
        color: Rgb::default(),
        scale: 1.0,
        mode: PackMode::Global,
        outline: false,
      },
      tracker,
    )
  }

  #[test]
  fn test_rolling_window() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());
    assert_eq!(window.min_max(), None);

    window.push(10u64);
    window.push(20);
    window.push(30);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 60);
    assert_eq!(window.average(), 20.0);

    // Oldest evicted
    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.average(), 30.0);
    assert_eq!(window.min_max(), Some((20, 40)));
    assert_eq!(window.last(), Some(&40));
  }

  #[test]
  fn test_build_and_dispose() {
    let tracker = ResidencyTracker::new();
    let mut metrics = FractalMetrics::new();

    let generation = build(2, &tracker);
    metrics.record_build(&generation);
    assert_eq!(metrics.live_depth, 2);
    assert_eq!(metrics.live_primitives, 9);
    assert_eq!(metrics.live_vertices, 27);
    assert_eq!(metrics.live_bytes, generation.resident_bytes() as u64);
    assert_eq!(metrics.generations_built, 1);
    assert_eq!(metrics.build_timings.len(), 1);

    metrics.record_dispose(&generation);
    assert_eq!(metrics.live_primitives, 0);
    assert_eq!(metrics.live_bytes, 0);
    assert_eq!(metrics.generations_disposed, 1);
  }

  #[test]
  fn test_reset_keeps_cumulative_counters() {
    let tracker = ResidencyTracker::new();
    let mut metrics = FractalMetrics::new();
    metrics.record_build(&build(1, &tracker));

    metrics.reset();
    assert_eq!(metrics.live_primitives, 0);
    assert!(metrics.build_timings.is_empty());
    assert_eq!(metrics.generations_built, 1);
  }
}
