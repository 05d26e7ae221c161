// tick_queues/tests/feed_test.rs
//
// Record, generator and analytics collaborators.

use tick_queues::analytics::{RollingAverage, TradeImbalance, Vwap};
use tick_queues::record::{latency_micros, monotonic_nanos};
use tick_queues::{AnalyticsEngine, BenchError, GeneratorConfig, Record, Side, TickGenerator};

fn tick(price: f64, volume: u32, side: Side) -> Record {
   Record::new("SPY", price, volume, side, 0)
}

fn seeded(seed: u64) -> TickGenerator {
   TickGenerator::new(GeneratorConfig { seed, ..GeneratorConfig::default() }).unwrap()
}

#[test]
fn test_record_accessors() {
   let r = Record::new("AAPL", 100.5, 500, Side::Buy, 1_234);
   assert_eq!(r.symbol(), "AAPL");
   assert_eq!(r.price(), 100.5);
   assert_eq!(r.volume(), 500);
   assert_eq!(r.side(), Side::Buy);
   assert_eq!(r.timestamp_ns(), 1_234);
   assert_eq!(Side::Buy.as_char(), 'B');
   assert_eq!(Side::Sell.to_string(), "S");
}

#[test]
fn test_latency_micros() {
   assert_eq!(latency_micros(1_000, 6_000), 5.0);
   assert_eq!(latency_micros(6_000, 1_000), 0.0);
}

#[test]
fn test_monotonic_clock_never_goes_back() {
   let mut prev = monotonic_nanos();
   for _ in 0..1_000 {
      let now = monotonic_nanos();
      assert!(now >= prev);
      prev = now;
   }
}

#[test]
fn test_generator_is_reproducible_with_seed() {
   let mut a = seeded(42);
   let mut b = seeded(42);

   for _ in 0..500 {
      let (ra, rb) = (a.next_record(), b.next_record());
      assert_eq!(ra.price(), rb.price());
      assert_eq!(ra.volume(), rb.volume());
      assert_eq!(ra.side(), rb.side());
   }
}

#[test]
fn test_generator_stays_in_bounds() {
   let config = GeneratorConfig {
      symbol    : "QQQ".into(),
      base_price: 0.02,
      price_step: 0.05,
      min_volume: 10,
      max_volume: 20,
      seed      : 7,
   };
   let mut generator = TickGenerator::new(config).unwrap();

   let mut prev_price = generator.current_price();
   let mut prev_ts = 0;
   for record in generator.generate(2_000) {
      assert_eq!(record.symbol(), "QQQ");
      assert!(record.price() >= 0.01);
      assert!((record.price() - prev_price).abs() <= 0.05 + 1e-9);
      assert!((10..=20).contains(&record.volume()));
      assert!(record.timestamp_ns() >= prev_ts);
      prev_price = record.price();
      prev_ts = record.timestamp_ns();
   }
}

#[test]
fn test_generator_produces_both_sides() {
   let records = seeded(3).generate(1_000);
   assert!(records.iter().any(|r| r.side() == Side::Buy));
   assert!(records.iter().any(|r| r.side() == Side::Sell));
}

#[test]
fn test_generator_reset_price() {
   let mut generator = seeded(9);
   generator.generate(10);
   generator.reset_price(250.0);
   assert_eq!(generator.current_price(), 250.0);
}

#[test]
fn test_generator_rejects_bad_config() {
   let inverted = GeneratorConfig { min_volume: 50, max_volume: 5, ..GeneratorConfig::default() };
   assert!(matches!(TickGenerator::new(inverted), Err(BenchError::Config(_))));

   let negative = GeneratorConfig { base_price: -1.0, ..GeneratorConfig::default() };
   assert!(matches!(TickGenerator::new(negative), Err(BenchError::Config(_))));

   let bad_step = GeneratorConfig { price_step: f64::NAN, ..GeneratorConfig::default() };
   assert!(matches!(TickGenerator::new(bad_step), Err(BenchError::Config(_))));
}

#[test]
fn test_vwap() {
   let mut vwap = Vwap::default();
   assert_eq!(vwap.value(), 0.0);

   vwap.observe(&tick(10.0, 100, Side::Buy));
   vwap.observe(&tick(20.0, 300, Side::Sell));
   assert_eq!(vwap.value(), 17.5);
   assert_eq!(vwap.total_volume(), 400);

   vwap.reset();
   assert_eq!(vwap.value(), 0.0);
}

#[test]
fn test_trade_imbalance() {
   let mut imbalance = TradeImbalance::default();
   imbalance.observe(&tick(1.0, 300, Side::Buy));
   imbalance.observe(&tick(1.0, 500, Side::Sell));
   imbalance.observe(&tick(1.0, 100, Side::Buy));

   assert_eq!(imbalance.buy_volume(), 400);
   assert_eq!(imbalance.sell_volume(), 500);
   assert_eq!(imbalance.value(), -100);
}

#[test]
fn test_rolling_average_window() {
   let mut avg = RollingAverage::new(3);
   assert_eq!(avg.value(), 0.0);

   for price in [1.0, 2.0, 3.0, 4.0, 5.0] {
      avg.observe(&tick(price, 1, Side::Buy));
   }
   assert_eq!(avg.count(), 3);
   assert!((avg.value() - 4.0).abs() < 1e-12);

   avg.reset();
   assert_eq!(avg.count(), 0);
}

#[test]
#[should_panic(expected = "rolling window must be greater than 0")]
fn test_rolling_average_zero_window_panics() {
   let _avg = RollingAverage::new(0);
}

#[test]
fn test_engine_feeds_every_accumulator() {
   let mut engine = AnalyticsEngine::new(2);
   engine.observe(&tick(10.0, 100, Side::Buy));
   engine.observe(&tick(12.0, 100, Side::Sell));
   engine.observe(&tick(14.0, 200, Side::Buy));

   assert_eq!(engine.record_count(), 3);
   assert_eq!(engine.vwap(), 12.5);
   assert_eq!(engine.rolling_average(), 13.0);
   assert_eq!(engine.buy_volume(), 300);
   assert_eq!(engine.sell_volume(), 100);
   assert_eq!(engine.imbalance(), 200);

   engine.reset();
   assert_eq!(engine.record_count(), 0);
   assert_eq!(engine.vwap(), 0.0);
   assert_eq!(engine.imbalance(), 0);
}
