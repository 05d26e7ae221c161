// Per-record accumulators run on the consumer thread.
use crate::record::{Record, Side};
use std::collections::VecDeque;

/// Volume-weighted average price: Σ(price · volume) / Σ(volume).
#[derive(Debug, Default, Clone)]
pub struct Vwap {
   price_volume: f64,
   volume      : u64,
}

impl Vwap {
   pub fn observe(&mut self, record: &Record) {
      self.price_volume += record.price() * f64::from(record.volume());
      self.volume += u64::from(record.volume());
   }

   /// `0.0` until some volume has been seen.
   pub fn value(&self) -> f64 {
      if self.volume == 0 {
         return 0.0;
      }
      self.price_volume / self.volume as f64
   }

   pub fn total_volume(&self) -> u64 {
      self.volume
   }

   pub fn reset(&mut self) {
      *self = Self::default();
   }
}

/// Buy volume minus sell volume.
#[derive(Debug, Default, Clone)]
pub struct TradeImbalance {
   buy : i64,
   sell: i64,
}

impl TradeImbalance {
   pub fn observe(&mut self, record: &Record) {
      let volume = i64::from(record.volume());
      match record.side() {
         Side::Buy  => self.buy += volume,
         Side::Sell => self.sell += volume,
      }
   }

   /// Positive means buy pressure.
   pub fn value(&self) -> i64 {
      self.buy - self.sell
   }

   pub fn buy_volume(&self) -> i64 { self.buy }
   pub fn sell_volume(&self) -> i64 { self.sell }

   pub fn reset(&mut self) {
      *self = Self::default();
   }
}

/// Simple moving average of the last `window` prices.
#[derive(Debug, Clone)]
pub struct RollingAverage {
   prices: VecDeque<f64>,
   window: usize,
   sum   : f64,
}

impl RollingAverage {
   pub fn new(window: usize) -> Self {
      assert!(window > 0, "rolling window must be greater than 0");
      Self { prices: VecDeque::with_capacity(window + 1), window, sum: 0.0 }
   }

   pub fn observe(&mut self, record: &Record) {
      self.prices.push_back(record.price());
      self.sum += record.price();
      if self.prices.len() > self.window {
         if let Some(oldest) = self.prices.pop_front() {
            self.sum -= oldest;
         }
      }
   }

   pub fn value(&self) -> f64 {
      if self.prices.is_empty() {
         return 0.0;
      }
      self.sum / self.prices.len() as f64
   }

   /// Number of prices currently in the window.
   pub fn count(&self) -> usize {
      self.prices.len()
   }

   pub fn reset(&mut self) {
      self.prices.clear();
      self.sum = 0.0;
   }
}

/// All accumulators behind one `observe`.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
   vwap     : Vwap,
   imbalance: TradeImbalance,
   rolling  : RollingAverage,
   records  : usize,
}

impl AnalyticsEngine {
   pub fn new(rolling_window: usize) -> Self {
      Self {
         vwap     : Vwap::default(),
         imbalance: TradeImbalance::default(),
         rolling  : RollingAverage::new(rolling_window),
         records  : 0,
      }
   }

   pub fn observe(&mut self, record: &Record) {
      self.vwap.observe(record);
      self.imbalance.observe(record);
      self.rolling.observe(record);
      self.records += 1;
   }

   pub fn vwap(&self) -> f64 { self.vwap.value() }
   pub fn imbalance(&self) -> i64 { self.imbalance.value() }
   pub fn rolling_average(&self) -> f64 { self.rolling.value() }
   pub fn buy_volume(&self) -> i64 { self.imbalance.buy_volume() }
   pub fn sell_volume(&self) -> i64 { self.imbalance.sell_volume() }
   pub fn record_count(&self) -> usize { self.records }

   pub fn reset(&mut self) {
      self.vwap.reset();
      self.imbalance.reset();
      self.rolling.reset();
      self.records = 0;
   }
}
