use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures surfaced by the benchmark harness and its surroundings.
///
/// Queue operations never fail: an empty queue is `None`, and allocation
/// failure aborts the process.
#[derive(Debug, Error)]
pub enum BenchError {
   #[error("invalid configuration: {0}")]
   Config(String),

   #[error("failed to export results to {}: {source}", path.display())]
   Export {
      path: PathBuf,
      #[source]
      source: io::Error,
   },

   #[error("failed to serialize results: {0}")]
   Serialize(#[from] serde_json::Error),

   #[error("failed to spawn {role} thread: {source}")]
   Spawn {
      role: &'static str,
      #[source]
      source: io::Error,
   },

   #[error("{0} thread panicked")]
   WorkerPanicked(&'static str),

   #[error("cannot pin thread to core {core}: {reason}")]
   Affinity { core: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, BenchError>;
