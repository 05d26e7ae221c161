// Latency samples and throughput counting for one benchmark run.
use std::time::{Duration, Instant};

/// Append-only latency store, in microseconds.
#[derive(Debug, Default, Clone)]
pub struct LatencyTracker {
   samples: Vec<f64>,
}

impl LatencyTracker {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_capacity(capacity: usize) -> Self {
      Self { samples: Vec::with_capacity(capacity) }
   }

   #[inline]
   pub fn record(&mut self, micros: f64) {
      self.samples.push(micros);
   }

   /// Value at fraction `p` of the sorted samples, `p` in `[0, 1]`.
   ///
   /// Index is `floor(p * len)` clamped to the last sample. Sorts a copy;
   /// the recorded order is left untouched. `0.0` when empty.
   pub fn percentile(&self, p: f64) -> f64 {
      if self.samples.is_empty() {
         return 0.0;
      }
      let mut sorted = self.samples.clone();
      sorted.sort_unstable_by(f64::total_cmp);

      // `as usize` saturates: negative and NaN fractions land on index 0
      let idx = ((p * sorted.len() as f64) as usize).min(sorted.len() - 1);
      sorted[idx]
   }

   pub fn p50(&self) -> f64 { self.percentile(0.50) }
   pub fn p99(&self) -> f64 { self.percentile(0.99) }
   pub fn p999(&self) -> f64 { self.percentile(0.999) }

   pub fn mean(&self) -> f64 {
      if self.samples.is_empty() {
         return 0.0;
      }
      self.samples.iter().sum::<f64>() / self.samples.len() as f64
   }

   pub fn min(&self) -> f64 {
      self.samples.iter().copied().reduce(f64::min).unwrap_or(0.0)
   }

   pub fn max(&self) -> f64 {
      self.samples.iter().copied().reduce(f64::max).unwrap_or(0.0)
   }

   pub fn count(&self) -> usize {
      self.samples.len()
   }

   pub fn reset(&mut self) {
      self.samples.clear();
   }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterState {
   Idle,
   Running,
   Stopped,
}

/// Items per second over a start/stop window.
#[derive(Debug, Clone)]
pub struct ThroughputMeter {
   items: u64,
   start: Option<Instant>,
   end  : Option<Instant>,
   state: MeterState,
}

impl Default for ThroughputMeter {
   fn default() -> Self {
      Self::new()
   }
}

impl ThroughputMeter {
   pub fn new() -> Self {
      Self { items: 0, start: None, end: None, state: MeterState::Idle }
   }

   /// Starts a fresh window and zeroes the item count.
   pub fn start(&mut self) {
      self.start = Some(Instant::now());
      self.end = None;
      self.items = 0;
      self.state = MeterState::Running;
   }

   pub fn stop(&mut self) {
      self.end = Some(Instant::now());
      self.state = MeterState::Stopped;
   }

   // Counting is also accepted outside `Running`.
   #[inline]
   pub fn add_item(&mut self) {
      self.items += 1;
   }

   #[inline]
   pub fn add_items(&mut self, count: u64) {
      self.items += count;
   }

   /// Now minus start while running, stop minus start afterwards, zero if
   /// never started.
   pub fn elapsed(&self) -> Duration {
      match (self.start, self.state) {
         (None, _) => Duration::ZERO,
         (Some(start), MeterState::Running) => start.elapsed(),
         (Some(start), _) => self
            .end
            .map(|end| end.saturating_duration_since(start))
            .unwrap_or(Duration::ZERO),
      }
   }

   pub fn elapsed_seconds(&self) -> f64 {
      self.elapsed().as_secs_f64()
   }

   pub fn throughput(&self) -> f64 {
      if self.items == 0 {
         return 0.0;
      }
      let secs = self.elapsed_seconds();
      if secs == 0.0 {
         return 0.0;
      }
      self.items as f64 / secs
   }

   pub fn item_count(&self) -> u64 {
      self.items
   }

   pub fn state(&self) -> MeterState {
      self.state
   }
}
