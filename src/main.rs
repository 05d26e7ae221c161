use std::process::ExitCode;

use tick_queues::{affinity, harness, report, BenchConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
   tracing_subscriber::registry()
      .with(
         tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into()),
      )
      .with(tracing_subscriber::fmt::layer())
      .init();

   let config = match BenchConfig::from_env() {
      Ok(config) => config,
      Err(err) => {
         error!(%err, "bad configuration");
         return ExitCode::FAILURE;
      }
   };
   info!(sizes = ?config.sizes, cores = affinity::available_cores(), "starting sweep");

   let sweep = match harness::run_sweep(&config) {
      Ok(sweep) => sweep,
      Err(err) => {
         error!(%err, "benchmark failed");
         return ExitCode::FAILURE;
      }
   };

   for result in &sweep.results {
      println!("\n{result}");
   }
   println!();
   for cmp in &sweep.comparisons {
      println!(
         "{:>9} records: {:.2}x throughput, {:.2}x better p99",
         cmp.record_count, cmp.speedup, cmp.p99_improvement
      );
   }

   // results stay valid even if an export target cannot be written
   match report::export_csv(&sweep.results, &config.csv_path) {
      Ok(()) => info!(path = %config.csv_path.display(), "results exported"),
      Err(err) => error!(%err, "csv export failed"),
   }
   if let Some(path) = &config.json_path {
      match report::export_json(&sweep.results, path) {
         Ok(()) => info!(path = %path.display(), "results exported"),
         Err(err) => error!(%err, "json export failed"),
      }
   }
   ExitCode::SUCCESS
}
