// Producer/consumer benchmark driver
//
// One run = one queue, one producer thread, one consumer thread. The producer
// pushes `count` generated records and then raises `done` with a release
// store. The consumer pops until it has seen `done` (acquire) *and* finds the
// queue empty. Since every push is sequenced before the release store, the
// acquire load makes all of them visible, so the emptiness check that follows
// cannot miss a record.
use crate::affinity;
use crate::analytics::AnalyticsEngine;
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::generator::TickGenerator;
use crate::metrics::{LatencyTracker, ThroughputMeter};
use crate::record::{latency_micros, monotonic_nanos, Record};
use crate::report::{BenchmarkResult, Comparison, SweepReport};
use crate::spsc::{BlockingQueue, LockFreeQueue};
use crate::{Consumer, Producer, SpscQueue};
use std::{
   sync::{
      atomic::{AtomicBool, Ordering},
      Arc,
   },
   thread,
};
use tracing::{debug, info, warn};

/// Raises the termination flag when dropped, including on unwind, so a
/// failing producer never leaves the consumer spinning.
struct DoneOnDrop<'a>(&'a AtomicBool);

impl Drop for DoneOnDrop<'_> {
   fn drop(&mut self) {
      self.0.store(true, Ordering::Release);
   }
}

/// Producer side: pushes every item, then sets `done`.
pub fn feed<T, P, I>(producer: &mut P, items: I, done: &AtomicBool)
where
   T: Send,
   P: Producer<T>,
   I: IntoIterator<Item = T>,
{
   let _done = DoneOnDrop(done);
   for item in items {
      producer.push(item);
   }
}

/// Consumer side: hands every popped item to `on_item` until the producer is
/// done and the queue is drained. Returns the number of items consumed.
///
/// Spins with `yield_now` while the queue is empty and the producer is still
/// running; CPU spent there grows with the producer's idle gaps.
pub fn drain<T, C, F>(consumer: &mut C, done: &AtomicBool, mut on_item: F) -> usize
where
   T: Send,
   C: Consumer<T>,
   F: FnMut(T),
{
   let mut consumed = 0;
   loop {
      if let Some(item) = consumer.pop() {
         on_item(item);
         consumed += 1;
         continue;
      }

      if done.load(Ordering::Acquire) {
         if consumer.is_empty() {
            break;
         }
         continue;
      }
      thread::yield_now();
   }
   consumed
}

fn pin(core: Option<usize>, role: &'static str) {
   if let Some(core) = core {
      match affinity::pin_current_thread(core) {
         Ok(()) => debug!(role, core, "thread pinned"),
         Err(err) => warn!(role, %err, "running unpinned"),
      }
   }
}

/// Runs `count` generated records through a fresh `Q`.
pub fn run_benchmark<Q>(name: &str, count: usize, config: &BenchConfig) -> Result<BenchmarkResult>
where
   Q: SpscQueue<Record>,
{
   if config.rolling_window == 0 {
      return Err(BenchError::Config("rolling window must be greater than 0".into()));
   }
   info!(name, count, "running benchmark");

   let mut generator = TickGenerator::new(config.generator.clone())?;
   let (mut producer, mut consumer) = Q::default().split();
   let done = Arc::new(AtomicBool::new(false));

   let producer_thread = {
      let done = Arc::clone(&done);
      let core = config.producer_core;
      thread::Builder::new()
         .name("producer".into())
         .spawn(move || {
            pin(core, "producer");
            feed(&mut producer, (0..count).map(|_| generator.next_record()), &done);
            debug!(count, "producer finished");
         })
         .map_err(|source| BenchError::Spawn { role: "producer", source })?
   };

   let consumer_thread = {
      let done = Arc::clone(&done);
      let core = config.consumer_core;
      let window = config.rolling_window;
      thread::Builder::new()
         .name("consumer".into())
         .spawn(move || {
            pin(core, "consumer");
            let mut latency = LatencyTracker::with_capacity(count);
            let mut meter = ThroughputMeter::new();
            let mut analytics = AnalyticsEngine::new(window);

            meter.start();
            drain(&mut consumer, &done, |record: Record| {
               latency.record(latency_micros(record.timestamp_ns(), monotonic_nanos()));
               analytics.observe(&record);
               meter.add_item();
            });
            meter.stop();

            debug!(
               consumed = meter.item_count(),
               vwap = analytics.vwap(),
               rolling_average = analytics.rolling_average(),
               imbalance = analytics.imbalance(),
               "consumer finished"
            );
            (latency, meter)
         })
   };
   let consumer_thread = match consumer_thread {
      Ok(handle) => handle,
      Err(source) => {
         // the producer never blocks on the consumer, so it still finishes
         let _ = producer_thread.join();
         return Err(BenchError::Spawn { role: "consumer", source });
      }
   };

   let produced = producer_thread.join();
   let (latency, meter) = consumer_thread
      .join()
      .map_err(|_| BenchError::WorkerPanicked("consumer"))?;
   produced.map_err(|_| BenchError::WorkerPanicked("producer"))?;

   if latency.count() != count {
      warn!(name, expected = count, consumed = latency.count(), "record count mismatch");
   }

   let result = BenchmarkResult::from_measurements(name, &latency, &meter);
   info!(
      name,
      elapsed_s = result.elapsed_seconds,
      throughput = result.throughput,
      p99_us = result.latency_p99,
      "benchmark complete"
   );
   Ok(result)
}

/// `run_benchmark` under the queue's own name, e.g. `Mutex Queue (10000)`.
pub fn run_queue<Q>(count: usize, config: &BenchConfig) -> Result<BenchmarkResult>
where
   Q: SpscQueue<Record>,
{
   run_benchmark::<Q>(&format!("{} ({})", Q::NAME, count), count, config)
}

/// Every configured size, lock-free queue first, then the mutex baseline.
pub fn run_sweep(config: &BenchConfig) -> Result<SweepReport> {
   config.validate()?;

   let mut report = SweepReport::default();
   for &size in &config.sizes {
      let lock_free = run_queue::<LockFreeQueue<Record>>(size, config)?;
      let baseline = run_queue::<BlockingQueue<Record>>(size, config)?;

      let comparison = Comparison::between(&lock_free, &baseline);
      info!(
         size,
         speedup = comparison.speedup,
         p99_improvement = comparison.p99_improvement,
         "lock-free vs mutex"
      );

      report.results.push(lock_free);
      report.results.push(baseline);
      report.comparisons.push(comparison);
   }
   Ok(report)
}
