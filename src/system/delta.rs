use std::collections::HashMap;

/// A pid's cumulative tick count as read in the current cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickObservation {
    pub pid: u32,
    pub ticks: u64,
}

/// Remembers the last cumulative tick count of every live pid and turns the
/// next reading into a share of the system-wide tick delta.
///
/// A cycle is two-phase: every percentage is computed against the table as
/// it stood before the cycle, then all new readings are committed at once
/// and pids that were not observed are evicted.
#[derive(Debug, Default)]
pub struct DeltaEngine {
    last_ticks: HashMap<u32, u64>,
}

impl DeltaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table, e.g. to resume from a known state in tests.
    pub fn with_state(last_ticks: HashMap<u32, u64>) -> Self {
        Self { last_ticks }
    }

    /// Ticks consumed by `pid` since its previous reading. Unseen pids count
    /// from 0; a reading below the stored one (pid reuse) clamps to 0.
    pub fn tick_delta(&self, pid: u32, ticks: u64) -> u64 {
        let prev = self.last_ticks.get(&pid).copied().unwrap_or(0);
        ticks.saturating_sub(prev)
    }

    /// Computes the CPU percent for every observation, then commits the new
    /// readings and drops pids missing from `observations`.
    ///
    /// Results are returned in the same order as `observations`.
    pub fn advance(&mut self, observations: &[TickObservation], total_delta: u64) -> Vec<f64> {
        let percents = observations
            .iter()
            .map(|obs| cpu_percent(self.tick_delta(obs.pid, obs.ticks), total_delta))
            .collect();
        self.commit(observations);
        percents
    }

    fn commit(&mut self, observations: &[TickObservation]) {
        let mut next = HashMap::with_capacity(observations.len());
        for obs in observations {
            next.insert(obs.pid, obs.ticks);
        }
        self.last_ticks = next;
    }

    pub fn last_ticks(&self, pid: u32) -> Option<u64> {
        self.last_ticks.get(&pid).copied()
    }

    pub fn tracked(&self) -> usize {
        self.last_ticks.len()
    }
}

/// `delta` as a percentage of `total_delta`; 0 when no ticks elapsed.
pub fn cpu_percent(delta: u64, total_delta: u64) -> f64 {
    if total_delta == 0 {
        return 0.0;
    }
    100.0 * delta as f64 / total_delta as f64
}
