use crate::error::Result;

use super::sample::{SystemCpuSample, SystemMemorySample};

/// Raw cumulative counters exposed by the kernel.
///
/// System-wide reads are fatal on failure. Per-process reads return `None`
/// when the process is gone or its record is unreadable; callers drop that
/// pid for the current cycle.
pub trait CounterSource {
    fn sample_system_cpu(&self) -> Result<SystemCpuSample>;
    fn sample_system_memory(&self) -> Result<SystemMemorySample>;

    /// utime + stime of `pid`, in clock ticks.
    fn sample_process_cpu(&self, pid: u32) -> Option<u64>;

    /// Resident set size of `pid`, in kB.
    fn sample_process_memory(&self, pid: u32) -> Option<u64>;

    /// Best-effort command name, `"?"` when it cannot be read.
    fn process_display_name(&self, pid: u32) -> String;
}

pub trait ProcessEnumerator {
    fn list_pids(&self) -> Result<Vec<u32>>;
}
