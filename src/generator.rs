// Synthetic tick source: bounded random walk on price, uniform volume and side.
use crate::error::{BenchError, Result};
use crate::record::{monotonic_nanos, Record, Side};
use rand::{distributions::Uniform, rngs::SmallRng, Rng, SeedableRng};

/// Lowest price the walk may reach.
const PRICE_FLOOR: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
   pub symbol    : String,
   pub base_price: f64,
   /// Largest move per tick, in either direction.
   pub price_step: f64,
   pub min_volume: u32,
   pub max_volume: u32,
   /// `0` seeds from OS entropy; anything else is reproducible.
   pub seed      : u64,
}

impl Default for GeneratorConfig {
   fn default() -> Self {
      Self {
         symbol    : "SPY".to_string(),
         base_price: 100.0,
         price_step: 0.01,
         min_volume: 100,
         max_volume: 1000,
         seed      : 0,
      }
   }
}

impl GeneratorConfig {
   pub fn validate(&self) -> Result<()> {
      if !(self.base_price.is_finite() && self.base_price > 0.0) {
         return Err(BenchError::Config(format!("base price must be positive, got {}", self.base_price)));
      }
      if !(self.price_step.is_finite() && self.price_step >= 0.0) {
         return Err(BenchError::Config(format!("price step must be non-negative, got {}", self.price_step)));
      }
      if self.min_volume > self.max_volume {
         return Err(BenchError::Config(format!(
            "volume range is empty: {}..={}",
            self.min_volume, self.max_volume
         )));
      }
      Ok(())
   }
}

pub struct TickGenerator {
   symbol    : String,
   price     : f64,
   price_step: f64,
   volume    : Uniform<u32>,
   rng       : SmallRng,
}

impl TickGenerator {
   pub fn new(config: GeneratorConfig) -> Result<Self> {
      config.validate()?;
      let rng = match config.seed {
         0    => SmallRng::from_entropy(),
         seed => SmallRng::seed_from_u64(seed),
      };
      Ok(Self {
         symbol    : config.symbol,
         price     : config.base_price,
         price_step: config.price_step,
         volume    : Uniform::new_inclusive(config.min_volume, config.max_volume),
         rng,
      })
   }

   pub fn next_record(&mut self) -> Record {
      let step = self.rng.gen_range(-1.0..=1.0) * self.price_step;
      self.price = (self.price + step).max(PRICE_FLOOR);

      let volume = self.rng.sample(self.volume);
      let side = if self.rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };

      Record::new(self.symbol.as_str(), self.price, volume, side, monotonic_nanos())
   }

   pub fn generate(&mut self, count: usize) -> Vec<Record> {
      (0..count).map(|_| self.next_record()).collect()
   }

   pub fn current_price(&self) -> f64 {
      self.price
   }

   pub fn reset_price(&mut self, base_price: f64) {
      self.price = base_price;
   }
}
