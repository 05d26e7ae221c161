// Benchmark results and their export formats.
use crate::error::{BenchError, Result};
use crate::metrics::{LatencyTracker, ThroughputMeter};
use serde::Serialize;
use std::{
   fmt,
   fs::File,
   io::{self, BufWriter, Write},
   path::Path,
};

pub const CSV_HEADER: &str =
   "Name,Ticks,Throughput_TPS,Latency_Mean,Latency_P50,Latency_P99,Latency_P999,Latency_Min,Latency_Max,Elapsed_Sec";

/// Outcome of one producer/consumer run. Latencies are in microseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
   pub name           : String,
   pub record_count   : usize,
   pub throughput     : f64,
   pub latency_mean   : f64,
   pub latency_min    : f64,
   pub latency_max    : f64,
   pub latency_p50    : f64,
   pub latency_p99    : f64,
   pub latency_p999   : f64,
   pub elapsed_seconds: f64,
}

impl BenchmarkResult {
   pub fn from_measurements(name: impl Into<String>, latency: &LatencyTracker, meter: &ThroughputMeter) -> Self {
      Self {
         name           : name.into(),
         record_count   : latency.count(),
         throughput     : meter.throughput(),
         latency_mean   : latency.mean(),
         latency_min    : latency.min(),
         latency_max    : latency.max(),
         latency_p50    : latency.p50(),
         latency_p99    : latency.p99(),
         latency_p999   : latency.p999(),
         elapsed_seconds: meter.elapsed_seconds(),
      }
   }
}

impl fmt::Display for BenchmarkResult {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      writeln!(f, "=== {} ===", self.name)?;
      writeln!(f, "Records processed: {}", self.record_count)?;
      writeln!(f, "Elapsed time:      {:.6} s", self.elapsed_seconds)?;
      writeln!(f, "Throughput:        {:.0} records/s", self.throughput)?;
      writeln!(f, "Latency (us):")?;
      writeln!(f, "  mean  {:.3}", self.latency_mean)?;
      writeln!(f, "  min   {:.3}", self.latency_min)?;
      writeln!(f, "  p50   {:.3}", self.latency_p50)?;
      writeln!(f, "  p99   {:.3}", self.latency_p99)?;
      writeln!(f, "  p999  {:.3}", self.latency_p999)?;
      write!(f, "  max   {:.3}", self.latency_max)
   }
}

/// Lock-free run measured against the mutex baseline at the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
   pub record_count   : usize,
   /// Lock-free throughput over baseline throughput.
   pub speedup        : f64,
   /// Baseline p99 over lock-free p99.
   pub p99_improvement: f64,
}

impl Comparison {
   pub fn between(lock_free: &BenchmarkResult, baseline: &BenchmarkResult) -> Self {
      Self {
         record_count   : lock_free.record_count,
         speedup        : ratio(lock_free.throughput, baseline.throughput),
         p99_improvement: ratio(baseline.latency_p99, lock_free.latency_p99),
      }
   }
}

fn ratio(num: f64, den: f64) -> f64 {
   if den == 0.0 { 0.0 } else { num / den }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SweepReport {
   pub results    : Vec<BenchmarkResult>,
   pub comparisons: Vec<Comparison>,
}

/*──────────────────────────────── export ──────────────────────────────────*/

/// Header line, then one comma-separated row per result.
pub fn write_csv<W: Write>(results: &[BenchmarkResult], mut out: W) -> io::Result<()> {
   writeln!(out, "{CSV_HEADER}")?;
   for r in results {
      writeln!(
         out,
         "{},{},{},{},{},{},{},{},{},{}",
         csv_field(&r.name),
         r.record_count,
         r.throughput,
         r.latency_mean,
         r.latency_p50,
         r.latency_p99,
         r.latency_p999,
         r.latency_min,
         r.latency_max,
         r.elapsed_seconds,
      )?;
   }
   out.flush()
}

pub fn export_csv(results: &[BenchmarkResult], path: impl AsRef<Path>) -> Result<()> {
   let path = path.as_ref();
   let export_err = |source| BenchError::Export { path: path.to_path_buf(), source };

   let file = File::create(path).map_err(export_err)?;
   write_csv(results, BufWriter::new(file)).map_err(export_err)
}

pub fn export_json(results: &[BenchmarkResult], path: impl AsRef<Path>) -> Result<()> {
   let path = path.as_ref();
   let export_err = |source| BenchError::Export { path: path.to_path_buf(), source };

   let body = serde_json::to_vec_pretty(results)?;
   let mut out = BufWriter::new(File::create(path).map_err(export_err)?);
   out.write_all(&body).map_err(export_err)?;
   out.flush().map_err(export_err)
}

fn csv_field(raw: &str) -> String {
   if raw.contains([',', '"', '\n']) {
      format!("\"{}\"", raw.replace('"', "\"\""))
   } else {
      raw.to_string()
   }
}
