use std::collections::HashMap;

use proptest::prelude::*;
use systop::system::delta::{DeltaEngine, TickObservation};
use systop::system::rank::{RankedProcess, TOP_N, rank};
use systop::system::sample::{ProcessSnapshot, SystemCpuSample};

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

proptest! {
    #[test]
    fn system_usage_stays_in_range(
        prev_total in 0u64..1_000_000_000,
        total_step in 0u64..1_000_000,
        prev_idle in 0u64..1_000_000_000,
        idle_frac in 0.0f64..=1.0,
    ) {
        let idle_step = (total_step as f64 * idle_frac) as u64;
        let prev = SystemCpuSample { total: prev_total, idle: prev_idle };
        let cur = SystemCpuSample {
            total: prev_total + total_step,
            idle: prev_idle + idle_step,
        };
        let usage = cur.usage_since(&prev);
        prop_assert!((0.0..=100.0).contains(&usage), "usage out of range: {}", usage);
        if total_step == 0 {
            prop_assert_eq!(usage, 0.0);
        }
    }

    #[test]
    fn process_percent_is_never_negative_or_nan(
        prev in proptest::option::of(0u64..1_000_000),
        cur in 0u64..1_000_000,
        total_delta in 0u64..1_000_000,
    ) {
        let state: HashMap<u32, u64> = prev.into_iter().map(|p| (1, p)).collect();
        let mut engine = DeltaEngine::with_state(state);
        let percents = engine.advance(&[TickObservation { pid: 1, ticks: cur }], total_delta);
        let pct = percents[0];
        prop_assert!(pct.is_finite());
        prop_assert!(pct >= 0.0);
        if total_delta == 0 {
            prop_assert_eq!(pct, 0.0);
        }
        if prev.is_some_and(|p| cur < p) {
            prop_assert_eq!(pct, 0.0);
        }
        prop_assert_eq!(engine.last_ticks(1), Some(cur));
    }

    #[test]
    fn state_tracks_exactly_the_observed_pids(
        first in prop::collection::hash_map(1u32..500, 0u64..10_000, 0..50),
        second in prop::collection::hash_map(1u32..500, 0u64..10_000, 0..50),
    ) {
        let to_obs = |m: &HashMap<u32, u64>| -> Vec<TickObservation> {
            m.iter().map(|(&pid, &ticks)| TickObservation { pid, ticks }).collect()
        };
        let mut engine = DeltaEngine::new();
        engine.advance(&to_obs(&first), 100);
        engine.advance(&to_obs(&second), 100);

        prop_assert_eq!(engine.tracked(), second.len());
        for (pid, ticks) in &second {
            prop_assert_eq!(engine.last_ticks(*pid), Some(*ticks));
        }
        for pid in first.keys().filter(|p| !second.contains_key(p)) {
            prop_assert_eq!(engine.last_ticks(*pid), None);
        }
    }

    #[test]
    fn ranking_is_ordered_truncated_and_deterministic(
        rows in prop::collection::vec((0u32..20, 0u64..5), 0..40),
    ) {
        let entries: Vec<RankedProcess> = rows
            .iter()
            .enumerate()
            .map(|(i, &(cpu, mem))| entry(i as u32 + 1, f64::from(cpu) * 2.5, mem))
            .collect();
        let mut reversed = entries.clone();
        reversed.reverse();

        let ranked = rank(entries.clone(), TOP_N);
        prop_assert_eq!(ranked.len(), entries.len().min(TOP_N));
        for w in ranked.windows(2) {
            prop_assert!(w[0].cpu_percent >= w[1].cpu_percent);
            if w[0].cpu_percent == w[1].cpu_percent {
                prop_assert!(w[0].process.resident_kb >= w[1].process.resident_kb);
            }
        }
        prop_assert_eq!(ranked, rank(reversed, TOP_N));
    }
}

#[test]
fn documented_scenarios() {
    let mut engine = DeltaEngine::with_state(HashMap::from([(1, 100)]));
    let percents = engine.advance(
        &[
            TickObservation { pid: 1, ticks: 150 },
            TickObservation { pid: 2, ticks: 40 },
        ],
        200,
    );
    assert_eq!(percents, vec![25.0, 20.0]);

    let percents = engine.advance(&[TickObservation { pid: 2, ticks: 40 }], 350);
    assert_eq!(percents, vec![0.0]);
}
