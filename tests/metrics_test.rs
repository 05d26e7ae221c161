// tick_queues/tests/metrics_test.rs

use tick_queues::{LatencyTracker, MeterState, ThroughputMeter};

use std::thread;
use std::time::Duration;

fn tracker_with(samples: &[f64]) -> LatencyTracker {
   let mut tracker = LatencyTracker::new();
   for &s in samples {
      tracker.record(s);
   }
   tracker
}

#[test]
fn test_percentile_picks_floor_index() {
   let tracker = tracker_with(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

   // floor(0.5 * 10) = 5 -> sixth element
   assert_eq!(tracker.percentile(0.5), 6.0);
   assert_eq!(tracker.p50(), 6.0);
   // floor(0.99 * 10) = 9 -> last element
   assert_eq!(tracker.percentile(0.99), 10.0);
   assert_eq!(tracker.p99(), 10.0);
   assert_eq!(tracker.p999(), 10.0);
}

#[test]
fn test_percentile_boundaries() {
   let tracker = tracker_with(&[7.5, 0.25, 3.0, 12.0, 1.0]);

   assert_eq!(tracker.percentile(0.0), 0.25);
   assert_eq!(tracker.percentile(1.0), 12.0);
   assert_eq!(tracker.percentile(5.0), 12.0);
   assert_eq!(tracker.percentile(-1.0), 0.25);
}

#[test]
fn test_percentile_is_monotonic() {
   let samples: Vec<f64> = (0..997).map(|i| ((i * 7919) % 1000) as f64 / 3.0).collect();
   let tracker = tracker_with(&samples);

   let mut prev = tracker.percentile(0.0);
   for step in 1..=100 {
      let p = step as f64 / 100.0;
      let cur = tracker.percentile(p);
      assert!(cur >= prev, "percentile({}) = {} < {}", p, cur, prev);
      prev = cur;
   }
}

#[test]
fn test_percentile_leaves_samples_unsorted() {
   let tracker = tracker_with(&[5.0, 1.0, 3.0]);
   assert_eq!(tracker.percentile(0.0), 1.0);

   // a second read of the same tracker sees the same data
   assert_eq!(tracker.percentile(0.0), 1.0);
   assert_eq!(tracker.count(), 3);
   assert_eq!(tracker.min(), 1.0);
   assert_eq!(tracker.max(), 5.0);
}

#[test]
fn test_empty_tracker_reports_zero() {
   let tracker = LatencyTracker::new();

   assert_eq!(tracker.count(), 0);
   assert_eq!(tracker.percentile(0.0), 0.0);
   assert_eq!(tracker.percentile(0.5), 0.0);
   assert_eq!(tracker.percentile(1.0), 0.0);
   assert_eq!(tracker.p999(), 0.0);
   assert_eq!(tracker.mean(), 0.0);
   assert_eq!(tracker.min(), 0.0);
   assert_eq!(tracker.max(), 0.0);
}

#[test]
fn test_mean_min_max_and_reset() {
   let mut tracker = tracker_with(&[2.0, 4.0, 9.0, 1.0]);

   assert_eq!(tracker.mean(), 4.0);
   assert_eq!(tracker.min(), 1.0);
   assert_eq!(tracker.max(), 9.0);

   tracker.reset();
   assert_eq!(tracker.count(), 0);
   assert_eq!(tracker.mean(), 0.0);
}

#[test]
fn test_tracker_keeps_duplicates() {
   let tracker = tracker_with(&[3.0, 3.0, 3.0, 1.0]);
   assert_eq!(tracker.count(), 4);
   assert_eq!(tracker.percentile(0.25), 3.0);
   assert_eq!(tracker.mean(), 2.5);
}

#[test]
fn test_meter_before_start_is_zero() {
   let mut meter = ThroughputMeter::new();
   assert_eq!(meter.state(), MeterState::Idle);
   assert_eq!(meter.elapsed(), Duration::ZERO);
   assert_eq!(meter.throughput(), 0.0);

   meter.add_items(10);
   assert_eq!(meter.item_count(), 10);
   // no start time, so no elapsed time to divide by
   assert_eq!(meter.throughput(), 0.0);
}

#[test]
fn test_meter_with_no_items_reports_zero() {
   let mut meter = ThroughputMeter::new();
   meter.start();
   thread::sleep(Duration::from_millis(5));
   meter.stop();

   assert!(meter.elapsed() >= Duration::from_millis(5));
   assert_eq!(meter.throughput(), 0.0);
}

#[test]
fn test_meter_counts_items_over_window() {
   let mut meter = ThroughputMeter::new();
   meter.start();
   assert_eq!(meter.state(), MeterState::Running);

   for _ in 0..1_000 {
      meter.add_item();
   }
   meter.add_items(1_000);
   thread::sleep(Duration::from_millis(10));
   meter.stop();
   assert_eq!(meter.state(), MeterState::Stopped);

   assert_eq!(meter.item_count(), 2_000);
   let elapsed = meter.elapsed_seconds();
   assert!(elapsed >= 0.010);
   let expected = 2_000.0 / elapsed;
   assert!((meter.throughput() - expected).abs() < 1e-6 * expected);
}

#[test]
fn test_meter_elapsed_frozen_after_stop() {
   let mut meter = ThroughputMeter::new();
   meter.start();
   meter.add_item();
   meter.stop();

   let first = meter.elapsed();
   thread::sleep(Duration::from_millis(5));
   assert_eq!(meter.elapsed(), first);
}

#[test]
fn test_meter_restart_resets_count() {
   let mut meter = ThroughputMeter::new();
   meter.start();
   meter.add_items(42);
   meter.stop();

   // counting after stop is tolerated
   meter.add_item();
   assert_eq!(meter.item_count(), 43);

   meter.start();
   assert_eq!(meter.item_count(), 0);
   assert_eq!(meter.state(), MeterState::Running);
}
