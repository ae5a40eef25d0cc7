//! Sequence scoring strategies.
//!
//! Any safe sequence is a correct answer; scoring only decides which one
//! is reported as optimal.

use crate::types::ScoringStrategy;

use super::types::{Process, Units};

/// Assigns a desirability score to a safe sequence. Higher is better.
#[cfg_attr(test, mockall::automock)]
pub trait SequenceScorer: Send + Sync {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Score `sequence`, replayed from `available` over `processes`.
    ///
    /// Indices in `sequence` are expected to be valid for `processes`.
    fn score(&self, sequence: &[usize], available: &[Units], processes: &[Process]) -> f64;
}

/// Rewards sequences that free large allocations early.
///
/// `sum_k(released_k * (len - k))`, where `released_k` is the growth of
/// the pool total when the `k`-th process finishes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseWeightedScorer;

impl SequenceScorer for ReleaseWeightedScorer {
    fn name(&self) -> &str {
        "release-weighted"
    }

    fn score(&self, sequence: &[usize], available: &[Units], processes: &[Process]) -> f64 {
        let mut pool: Units = available
            .iter()
            .fold(0, |acc: Units, &units| acc.saturating_add(units));
        let len = sequence.len();

        let mut efficiency = 0.0;
        for (k, &pid) in sequence.iter().enumerate() {
            let before = pool;
            // Unknown indices release nothing.
            let held = processes.get(pid).map_or(0, Process::held_units);
            pool = pool.saturating_add(held);
            let released = pool - before;

            let position_weight = (len - k) as f64;
            efficiency += released as f64 * position_weight;
        }
        efficiency
    }
}

/// Scores every sequence the same, so the first discovered one wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScorer;

impl SequenceScorer for UniformScorer {
    fn name(&self) -> &str {
        "uniform"
    }

    fn score(&self, _sequence: &[usize], _available: &[Units], _processes: &[Process]) -> f64 {
        0.0
    }
}

/// Build the scorer for a configured strategy.
pub fn scorer_for(strategy: ScoringStrategy) -> Box<dyn SequenceScorer> {
    match strategy {
        ScoringStrategy::ReleaseWeighted => Box::new(ReleaseWeightedScorer),
        ScoringStrategy::Uniform => Box::new(UniformScorer),
    }
}

/// Release-weighted efficiency of one sequence.
pub fn efficiency(sequence: &[usize], available: &[Units], processes: &[Process]) -> f64 {
    ReleaseWeightedScorer.score(sequence, available, processes)
}
