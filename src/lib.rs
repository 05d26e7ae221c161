pub mod spsc;
pub mod record;
pub mod generator;
pub mod analytics;
pub mod metrics;
pub mod harness;
pub mod report;
pub mod config;
pub mod affinity;
pub mod error;

pub use spsc::{BlockingQueue, LockFreeQueue};
pub use record::{Record, Side};
pub use generator::{GeneratorConfig, TickGenerator};
pub use analytics::AnalyticsEngine;
pub use metrics::{LatencyTracker, MeterState, ThroughputMeter};
pub use report::{BenchmarkResult, Comparison, SweepReport};
pub use config::BenchConfig;
pub use error::{BenchError, Result};

/// Common interface for both hand-off queues.
///
/// A queue is built empty and then split into its two halves. Neither half is
/// `Clone`, so whoever holds the `Producer` is the only thread that can push
/// and whoever holds the `Consumer` is the only thread that can pop.
pub trait SpscQueue<T: Send>: Default + Send + 'static {
   type Producer: Producer<T>;
   type Consumer: Consumer<T>;

   /// Label used in benchmark results.
   const NAME: &'static str;

   fn split(self) -> (Self::Producer, Self::Consumer);
}

/// Tail side of a queue.
pub trait Producer<T: Send>: Send + 'static {
   /// Enqueues `item`. Queues are unbounded, so this never fails.
   fn push(&mut self, item: T);
}

/// Head side of a queue.
pub trait Consumer<T: Send>: Send + 'static {
   /// Dequeues the oldest item, `None` when nothing is visible yet.
   fn pop(&mut self) -> Option<T>;
   /// Snapshot: only stays true once the producer has stopped pushing.
   fn is_empty(&self) -> bool;
}
