use std::cmp::Ordering;

use super::sample::ProcessSnapshot;

/// Number of processes shown per report.
pub const TOP_N: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct RankedProcess {
    pub process: ProcessSnapshot,
    pub cpu_percent: f64,
}

/// Busiest first; equal CPU goes to the larger resident set, then the lower
/// pid, so the order is total.
fn by_usage(a: &RankedProcess, b: &RankedProcess) -> Ordering {
    b.cpu_percent
        .total_cmp(&a.cpu_percent)
        .then_with(|| b.process.resident_kb.cmp(&a.process.resident_kb))
        .then_with(|| a.process.pid.cmp(&b.process.pid))
}

pub fn rank(mut entries: Vec<RankedProcess>, limit: usize) -> Vec<RankedProcess> {
    entries.sort_by(by_usage);
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pid: u32, cpu_percent: f64, resident_kb: u64) -> RankedProcess {
        RankedProcess {
            process: ProcessSnapshot {
                pid,
                cumulative_cpu_ticks: 0,
                resident_kb,
                display_name: format!("p{pid}"),
            },
            cpu_percent,
        }
    }

    fn pids(ranked: &[RankedProcess]) -> Vec<u32> {
        ranked.iter().map(|r| r.process.pid).collect()
    }

    #[test]
    fn sorts_by_cpu_descending() {
        let ranked = rank(
            vec![entry(1, 5.0, 10), entry(2, 50.0, 10), entry(3, 12.5, 10)],
            TOP_N,
        );
        assert_eq!(pids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn equal_cpu_prefers_larger_resident_set() {
        let ranked = rank(vec![entry(1, 10.0, 100), entry(2, 10.0, 900)], TOP_N);
        assert_eq!(pids(&ranked), vec![2, 1]);
    }

    #[test]
    fn full_ties_fall_back_to_pid() {
        let ranked = rank(
            vec![entry(30, 0.0, 0), entry(4, 0.0, 0), entry(17, 0.0, 0)],
            TOP_N,
        );
        assert_eq!(pids(&ranked), vec![4, 17, 30]);
    }

    #[test]
    fn truncates_to_limit() {
        let entries = (1..=20).map(|pid| entry(pid, pid as f64, 1)).collect();
        let ranked = rank(entries, TOP_N);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].process.pid, 20);
        assert_eq!(ranked[TOP_N - 1].process.pid, 9);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(rank(Vec::new(), TOP_N).is_empty());
    }
}
