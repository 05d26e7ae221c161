// Market record carried through the queues, plus the clock used to stamp it.
use std::{fmt, sync::OnceLock, time::Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
   Buy,
   Sell,
}

impl Side {
   pub fn as_char(self) -> char {
      match self {
         Side::Buy  => 'B',
         Side::Sell => 'S',
      }
   }
}

impl fmt::Display for Side {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "{}", self.as_char())
   }
}

/// One timestamped trade. Immutable once built; fields are read through
/// accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
   symbol      : String,
   price       : f64,
   volume      : u32,
   side        : Side,
   timestamp_ns: u64, // monotonic, see `monotonic_nanos`
}

impl Record {
   pub fn new(symbol: impl Into<String>, price: f64, volume: u32, side: Side, timestamp_ns: u64) -> Self {
      Self { symbol: symbol.into(), price, volume, side, timestamp_ns }
   }

   pub fn symbol(&self) -> &str { &self.symbol }
   pub fn price(&self) -> f64 { self.price }
   pub fn volume(&self) -> u32 { self.volume }
   pub fn side(&self) -> Side { self.side }
   pub fn timestamp_ns(&self) -> u64 { self.timestamp_ns }
}

static CLOCK_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Nanoseconds elapsed since the first call in this process.
///
/// Backed by `Instant`, so it never goes backwards and is comparable across
/// threads.
pub fn monotonic_nanos() -> u64 {
   let anchor = CLOCK_ANCHOR.get_or_init(Instant::now);
   anchor.elapsed().as_nanos() as u64
}

/// Latency between two `monotonic_nanos` stamps, in microseconds.
/// Clamped to zero if `end_ns` precedes `start_ns`.
#[inline]
pub fn latency_micros(start_ns: u64, end_ns: u64) -> f64 {
   end_ns.saturating_sub(start_ns) as f64 / 1_000.0
}
