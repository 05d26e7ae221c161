// Benchmark sweep configuration, with environment overrides.
use crate::error::{BenchError, Result};
use crate::generator::GeneratorConfig;
use std::{path::PathBuf, str::FromStr};

pub const ENV_SIZES : &str = "TICK_BENCH_SIZES";
pub const ENV_SEED  : &str = "TICK_BENCH_SEED";
pub const ENV_WINDOW: &str = "TICK_BENCH_WINDOW";
pub const ENV_CSV   : &str = "TICK_BENCH_CSV";
pub const ENV_JSON  : &str = "TICK_BENCH_JSON";
pub const ENV_PIN   : &str = "TICK_BENCH_PIN";

const DEFAULT_SIZES: [usize; 5] = [10_000, 50_000, 100_000, 500_000, 1_000_000];

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
   /// Record counts to sweep, each run against both queues.
   pub sizes         : Vec<usize>,
   pub generator     : GeneratorConfig,
   pub rolling_window: usize,
   pub csv_path      : PathBuf,
   pub json_path     : Option<PathBuf>,
   pub producer_core : Option<usize>,
   pub consumer_core : Option<usize>,
}

impl Default for BenchConfig {
   fn default() -> Self {
      Self {
         sizes         : DEFAULT_SIZES.to_vec(),
         generator     : GeneratorConfig::default(),
         rolling_window: 100,
         csv_path      : PathBuf::from("benchmark_results.csv"),
         json_path     : None,
         producer_core : None,
         consumer_core : None,
      }
   }
}

impl BenchConfig {
   pub fn from_env() -> Result<Self> {
      Self::from_lookup(|key| std::env::var(key).ok())
   }

   /// Defaults overridden by whatever `lookup` returns for the `TICK_BENCH_*`
   /// keys.
   pub fn from_lookup<F>(lookup: F) -> Result<Self>
   where
      F: Fn(&str) -> Option<String>,
   {
      let mut config = Self::default();

      if let Some(raw) = lookup(ENV_SIZES) {
         config.sizes = parse_list(ENV_SIZES, &raw)?;
      }
      if let Some(raw) = lookup(ENV_SEED) {
         config.generator.seed = parse_one(ENV_SEED, &raw)?;
      }
      if let Some(raw) = lookup(ENV_WINDOW) {
         config.rolling_window = parse_one(ENV_WINDOW, &raw)?;
      }
      if let Some(raw) = lookup(ENV_CSV) {
         config.csv_path = PathBuf::from(raw.trim());
      }
      if let Some(raw) = lookup(ENV_JSON) {
         let raw = raw.trim();
         config.json_path = (!raw.is_empty()).then(|| PathBuf::from(raw));
      }
      if let Some(raw) = lookup(ENV_PIN) {
         match parse_list::<usize>(ENV_PIN, &raw)?.as_slice() {
            [producer, consumer] => {
               config.producer_core = Some(*producer);
               config.consumer_core = Some(*consumer);
            }
            other => {
               return Err(BenchError::Config(format!(
                  "{ENV_PIN} expects `producer,consumer` core ids, got {} values",
                  other.len()
               )))
            }
         }
      }

      config.validate()?;
      Ok(config)
   }

   pub fn validate(&self) -> Result<()> {
      if self.sizes.is_empty() {
         return Err(BenchError::Config("no record counts to run".into()));
      }
      if self.sizes.contains(&0) {
         return Err(BenchError::Config("record counts must be greater than 0".into()));
      }
      if self.rolling_window == 0 {
         return Err(BenchError::Config("rolling window must be greater than 0".into()));
      }
      self.generator.validate()
   }
}

fn parse_one<T: FromStr>(key: &str, raw: &str) -> Result<T> {
   raw.trim()
      .parse()
      .map_err(|_| BenchError::Config(format!("{key}: cannot parse {raw:?}")))
}

fn parse_list<T: FromStr>(key: &str, raw: &str) -> Result<Vec<T>> {
   raw.split(',')
      .map(str::trim)
      .filter(|part| !part.is_empty())
      .map(|part| parse_one(key, part))
      .collect()
}
