use std::time::Duration;

use tracing::{debug, trace};

use crate::error::Result;
use crate::format::truncate_unicode;

use super::delta::{DeltaEngine, TickObservation};
use super::procfs::Procfs;
use super::rank::{RankedProcess, TOP_N, rank};
use super::sample::{ProcessSnapshot, SystemCpuSample};
use super::snapshot::RankedReport;
use super::source::{CounterSource, ProcessEnumerator};

/// Fixed wait between two cycles.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub const DEFAULT_NAME_WIDTH: usize = 32;

/// Runs sampling cycles against a counter source and keeps the state that
/// carries over between them: the previous system CPU sample and the
/// per-pid tick table.
pub struct Collector<S = Procfs> {
    source: S,
    engine: DeltaEngine,
    prev_cpu: SystemCpuSample,
    name_width: usize,
}

impl<S> Collector<S>
where
    S: CounterSource + ProcessEnumerator,
{
    /// Takes the baseline CPU sample; fails if the system counters cannot
    /// be read at all.
    pub fn new(source: S) -> Result<Self> {
        let prev_cpu = source.sample_system_cpu()?;
        Ok(Collector {
            source,
            engine: DeltaEngine::new(),
            prev_cpu,
            name_width: DEFAULT_NAME_WIDTH,
        })
    }

    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width.max(1);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn engine(&self) -> &DeltaEngine {
        &self.engine
    }

    /// One full cycle: system counters, enumeration, per-process sampling,
    /// correlation, ranking.
    pub fn refresh(&mut self) -> Result<RankedReport> {
        let cur_cpu = self.source.sample_system_cpu()?;
        let total_delta = cur_cpu.total_delta(&self.prev_cpu);
        let cpu_usage_percent = cur_cpu.usage_since(&self.prev_cpu);

        let memory = self.source.sample_system_memory()?;

        let pids = self.source.list_pids()?;
        let snapshots = self.sample_processes(&pids);

        let observations: Vec<TickObservation> = snapshots
            .iter()
            .map(|p| TickObservation {
                pid: p.pid,
                ticks: p.cumulative_cpu_ticks,
            })
            .collect();
        let percents = self.engine.advance(&observations, total_delta);

        let entries = snapshots
            .into_iter()
            .zip(percents)
            .map(|(process, cpu_percent)| RankedProcess {
                process,
                cpu_percent,
            })
            .collect();
        let processes = rank(entries, TOP_N);

        debug!(
            pids = pids.len(),
            sampled = observations.len(),
            tracked = self.engine.tracked(),
            total_delta,
            "cycle complete"
        );

        self.prev_cpu = cur_cpu;

        Ok(RankedReport {
            cpu_usage_percent,
            total_delta,
            memory,
            processes,
        })
    }

    fn sample_processes(&self, pids: &[u32]) -> Vec<ProcessSnapshot> {
        let mut snapshots = Vec::with_capacity(pids.len());
        for &pid in pids {
            let Some(ticks) = self.source.sample_process_cpu(pid) else {
                trace!(pid, "dropped: stat unreadable");
                continue;
            };
            let Some(resident_kb) = self.source.sample_process_memory(pid) else {
                trace!(pid, "dropped: statm unreadable");
                continue;
            };
            let name = self.source.process_display_name(pid);
            snapshots.push(ProcessSnapshot {
                pid,
                cumulative_cpu_ticks: ticks,
                resident_kb,
                display_name: truncate_unicode(&name, self.name_width),
            });
        }
        snapshots
    }
}
