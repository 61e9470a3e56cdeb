use super::rank::RankedProcess;
use super::sample::SystemMemorySample;

/// Everything shown for one refresh cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedReport {
    pub cpu_usage_percent: f64,
    /// Raw system-wide tick delta the percentages are relative to.
    pub total_delta: u64,
    pub memory: SystemMemorySample,
    pub processes: Vec<RankedProcess>,
}

impl RankedReport {
    pub fn memory_used_kb(&self) -> u64 {
        self.memory.used_kb()
    }

    pub fn memory_usage_percent(&self) -> f64 {
        self.memory.usage_pct()
    }
}
