// Pin benchmark threads to fixed cores so producer and consumer never share one.
use crate::error::{BenchError, Result};

/// Number of cores the process may run on.
pub fn available_cores() -> usize {
   std::thread::available_parallelism()
      .map(|n| n.get())
      .unwrap_or(1)
}

/// Restricts the calling thread to `core`.
#[cfg(target_os = "linux")]
pub fn pin_current_thread(core: usize) -> Result<()> {
   use nix::sched::{sched_setaffinity, CpuSet};
   use nix::unistd::Pid;

   let fail = |err: nix::errno::Errno| BenchError::Affinity { core, reason: err.desc().to_string() };

   let mut set = CpuSet::new();
   set.set(core).map_err(fail)?;
   // pid 0 is the calling thread
   sched_setaffinity(Pid::from_raw(0), &set).map_err(fail)
}

#[cfg(not(target_os = "linux"))]
pub fn pin_current_thread(core: usize) -> Result<()> {
   Err(BenchError::Affinity { core, reason: "not supported on this platform".to_string() })
}
