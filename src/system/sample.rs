/// Aggregate CPU counters from the first line of `/proc/stat`.
///
/// Both fields are cumulative since boot; `idle` already includes iowait.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemCpuSample {
    pub total: u64,
    pub idle: u64,
}

impl SystemCpuSample {
    /// Ticks elapsed between `prev` and `self`. Saturates at 0 if the
    /// counters went backwards.
    pub fn total_delta(&self, prev: &SystemCpuSample) -> u64 {
        self.total.saturating_sub(prev.total)
    }

    pub fn idle_delta(&self, prev: &SystemCpuSample) -> u64 {
        self.idle.saturating_sub(prev.idle)
    }

    /// Busy share of the interval since `prev`, in percent.
    ///
    /// Returns exactly 0.0 when no ticks elapsed.
    pub fn usage_since(&self, prev: &SystemCpuSample) -> f64 {
        let total_delta = self.total_delta(prev);
        if total_delta == 0 {
            return 0.0;
        }
        let busy = total_delta.saturating_sub(self.idle_delta(prev));
        100.0 * busy as f64 / total_delta as f64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemMemorySample {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl SystemMemorySample {
    pub fn used_kb(&self) -> u64 {
        self.total_kb.saturating_sub(self.available_kb)
    }

    pub fn usage_pct(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        100.0 * self.used_kb() as f64 / self.total_kb as f64
    }
}

/// One live process as seen during a single cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub cumulative_cpu_ticks: u64,
    pub resident_kb: u64,
    pub display_name: String,
}
