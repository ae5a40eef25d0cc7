//! Property tests for the safe-sequence enumerator and the efficiency
//! heuristic.

use std::collections::HashSet;

use banker_core::banker::{efficiency, find_safe_sequences, need, replay, Process, Units};
use proptest::prelude::*;

/// Up to `n` processes over `dims` resources, each with allocation <= max.
fn system(n: usize, dims: usize) -> impl Strategy<Value = (Vec<Units>, Vec<Process>)> {
    let process = prop::collection::vec((0u64..4, 0u64..4), dims);
    (
        prop::collection::vec(0u64..6, dims),
        prop::collection::vec(process, 0..=n),
    )
        .prop_map(|(available, rows)| {
            let processes = rows
                .into_iter()
                .enumerate()
                .map(|(i, pairs)| {
                    let allocated = pairs.iter().map(|&(a, _)| a).collect();
                    let max = pairs.iter().map(|&(a, extra)| a + extra).collect();
                    Process::new(i as u32, max, allocated)
                })
                .collect();
            (available, processes)
        })
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

proptest! {
    #[test]
    fn abundant_resources_yield_every_permutation(n in 0usize..6) {
        let processes: Vec<Process> = (0..n)
            .map(|i| Process::new(i as u32, vec![3, 2], vec![1, 0]))
            .collect();

        let sequences = find_safe_sequences(&[100, 100], &processes).unwrap();
        prop_assert_eq!(sequences.len(), factorial(n));

        let distinct: HashSet<&Vec<usize>> = sequences.iter().collect();
        prop_assert_eq!(distinct.len(), sequences.len());
        for sequence in &sequences {
            let mut sorted = sequence.clone();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn every_sequence_replays_cleanly((available, processes) in system(5, 3)) {
        let sequences = find_safe_sequences(&available, &processes).unwrap();
        for sequence in &sequences {
            prop_assert_eq!(sequence.len(), processes.len());
            let steps = replay(sequence, &available, &processes).unwrap();
            prop_assert!(steps.iter().all(|step| step.runnable));
        }
    }

    #[test]
    fn unreachable_claim_makes_state_unsafe((available, mut processes) in system(4, 2)) {
        // A max above everything the system could ever hold.
        let capacity: Units = available.iter().sum::<Units>()
            + processes.iter().map(Process::held_units).sum::<Units>();
        processes.push(Process::new(99, vec![capacity + 1, 0], vec![0, 0]));

        prop_assert!(find_safe_sequences(&available, &processes).unwrap().is_empty());
    }

    #[test]
    fn efficiency_matches_weighted_release_sum((available, processes) in system(5, 3)) {
        for sequence in find_safe_sequences(&available, &processes).unwrap() {
            let len = sequence.len();
            let expected: f64 = sequence
                .iter()
                .enumerate()
                .map(|(k, &pid)| (processes[pid].held_units() * (len - k) as u64) as f64)
                .sum();
            prop_assert_eq!(efficiency(&sequence, &available, &processes), expected);
        }
    }

    #[test]
    fn need_never_exceeds_max((_, processes) in system(5, 3)) {
        for process in &processes {
            let need = need(process).unwrap();
            for (i, units) in need.iter().enumerate() {
                prop_assert!(*units <= process.max[i]);
            }
        }
    }
}

#[test]
fn swapped_pair_scores_differ() {
    let processes = vec![
        Process::new(0, vec![5, 1], vec![4, 1]),
        Process::new(1, vec![2, 2], vec![1, 0]),
    ];
    let ab = efficiency(&[0, 1], &[2, 2], &processes);
    let ba = efficiency(&[1, 0], &[2, 2], &processes);
    assert_eq!(ab, 5.0 * 2.0 + 1.0);
    assert_eq!(ba, 1.0 * 2.0 + 5.0);
    assert!(ab > ba);
}
