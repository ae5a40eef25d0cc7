//! Request evaluation.
//!
//! Validate → Simulate → Search → Decide. Validation failures and unsafe
//! outcomes are reported in the returned [`BankerResult`]; only malformed
//! input (unknown process, ragged vectors) is an `Err`.

use tracing::{debug, info};

use crate::types::{NarrationConfig, Result};
use crate::validation::{validate_dimensions, validate_process_index, validate_processes};

use super::narration::describe_result;
use super::need::need;
use super::scoring::{ReleaseWeightedScorer, SequenceScorer};
use super::search::find_safe_sequences;
use super::types::{BankerResult, Process, Rejection, Request, SafeSequence, Units};

/// Outcome of the validation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Rejected(Rejection),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// Refusal reason, empty when valid.
    pub fn reason(&self) -> String {
        match self {
            Validation::Valid => String::new(),
            Validation::Rejected(rejection) => rejection.to_string(),
        }
    }
}

/// Check a request against the process's need, then against availability.
///
/// The first offending resource index is reported.
pub fn validate_request(
    process_id: usize,
    request: &[Units],
    available: &[Units],
    processes: &[Process],
) -> Result<Validation> {
    validate_process_index(process_id, processes)?;
    let need = need(&processes[process_id])?;
    validate_dimensions(|| "request/need".to_string(), need.len(), request.len())?;
    validate_dimensions(
        || "request/available".to_string(),
        available.len(),
        request.len(),
    )?;

    if let Some((resource, (&requested, &need))) = request
        .iter()
        .zip(&need)
        .enumerate()
        .find(|(_, (r, n))| r > n)
    {
        return Ok(Validation::Rejected(Rejection::ExceedsNeed {
            resource,
            requested,
            need,
        }));
    }

    if let Some((resource, (&requested, &available))) = request
        .iter()
        .zip(available)
        .enumerate()
        .find(|(_, (r, a))| r > a)
    {
        return Ok(Validation::Rejected(Rejection::ExceedsAvailable {
            resource,
            requested,
            available,
        }));
    }

    Ok(Validation::Valid)
}

/// Decide a request with the release-weighted scorer.
pub fn evaluate_request(
    process_id: usize,
    request: &[Units],
    available: &[Units],
    processes: &[Process],
) -> Result<BankerResult> {
    evaluate_request_with(&ReleaseWeightedScorer, process_id, request, available, processes)
}

/// Decide a request, ranking safe sequences with `scorer`.
pub fn evaluate_request_with(
    scorer: &dyn SequenceScorer,
    process_id: usize,
    request: &[Units],
    available: &[Units],
    processes: &[Process],
) -> Result<BankerResult> {
    let request = Request::new(process_id, request.to_vec());
    evaluate(scorer, &NarrationConfig::default(), Some(&request), available, processes)
}

/// Safety check of the current state, with no request applied.
pub fn check_state(available: &[Units], processes: &[Process]) -> Result<BankerResult> {
    evaluate(
        &ReleaseWeightedScorer,
        &NarrationConfig::default(),
        None,
        available,
        processes,
    )
}

pub(crate) fn evaluate(
    scorer: &dyn SequenceScorer,
    narration: &NarrationConfig,
    request: Option<&Request>,
    available: &[Units],
    processes: &[Process],
) -> Result<BankerResult> {
    validate_processes(processes, available)?;
    let process_names: Vec<String> = processes.iter().map(|p| p.label().to_string()).collect();

    // Validate
    if let Some(request) = request {
        let validation =
            validate_request(request.process_id, &request.resources, available, processes)?;
        if let Validation::Rejected(rejection) = validation {
            info!(
                process = request.process_id,
                reason = %rejection,
                "request rejected during validation"
            );
            let mut result = BankerResult::rejected(rejection, process_names);
            describe_result(&mut result, Some(request), available, processes, narration);
            return Ok(result);
        }
    }

    // Simulate
    let (work, hypothetical) = match request {
        Some(request) => simulate(request, available, processes),
        None => (available.to_vec(), processes.to_vec()),
    };
    debug!(available = ?work, "simulated allocation");

    // Search
    let sequences = find_safe_sequences(&work, &hypothetical)?;
    debug!(found = sequences.len(), "safe sequence search finished");

    // Decide
    let mut result = if sequences.is_empty() {
        BankerResult::rejected(Rejection::UnsafeState, process_names)
    } else {
        let safe_sequences = rank(scorer, sequences, &work, &hypothetical);
        BankerResult {
            is_safe: true,
            optimal_sequence: safe_sequences.first().map(|s| s.sequence.clone()),
            safe_sequences,
            process_names,
            ..BankerResult::default()
        }
    };
    info!(
        safe = result.is_safe,
        sequences = result.safe_sequences.len(),
        optimal = ?result.optimal_sequence,
        "admission decided"
    );

    describe_result(&mut result, request, &work, &hypothetical, narration);
    Ok(result)
}

/// Hypothetical state after granting `request`, on private copies.
///
/// Validation has already guaranteed `request <= available` elementwise.
fn simulate(
    request: &Request,
    available: &[Units],
    processes: &[Process],
) -> (Vec<Units>, Vec<Process>) {
    let work = available
        .iter()
        .zip(&request.resources)
        .map(|(&a, &r)| a - r)
        .collect();

    let mut hypothetical = processes.to_vec();
    let target = &mut hypothetical[request.process_id];
    for (held, &extra) in target.allocated.iter_mut().zip(&request.resources) {
        *held += extra;
    }
    (work, hypothetical)
}

/// Score and rank sequences, best first. The sort is stable, so equal
/// scores keep discovery order.
fn rank(
    scorer: &dyn SequenceScorer,
    sequences: Vec<Vec<usize>>,
    available: &[Units],
    processes: &[Process],
) -> Vec<SafeSequence> {
    let mut ranked: Vec<SafeSequence> = sequences
        .into_iter()
        .map(|sequence| SafeSequence {
            efficiency: scorer.score(&sequence, available, processes),
            sequence,
        })
        .collect();
    ranked.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banker::scoring::MockSequenceScorer;
    use crate::types::Error;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn scenario_a() -> (Vec<Units>, Vec<Process>) {
        let processes = vec![
            Process::new(0, vec![1], vec![0]),
            Process::new(1, vec![2], vec![0]),
            Process::new(2, vec![2], vec![0]),
        ];
        (vec![3], processes)
    }

    #[test]
    fn test_validation_checks_need_before_available() {
        let processes = vec![Process::new(0, vec![2, 2], vec![0, 0])];
        let validation = validate_request(0, &[3, 5], &[1, 1], &processes).unwrap();
        assert_eq!(
            validation,
            Validation::Rejected(Rejection::ExceedsNeed {
                resource: 0,
                requested: 3,
                need: 2,
            })
        );
        assert!(!validation.is_valid());
        assert_eq!(validation.reason(), "request exceeds maximum need");
    }

    #[test]
    fn test_validation_reports_first_short_resource() {
        let processes = vec![Process::new(0, vec![2, 2], vec![0, 0])];
        let validation = validate_request(0, &[1, 2], &[1, 1], &processes).unwrap();
        assert_eq!(
            validation,
            Validation::Rejected(Rejection::ExceedsAvailable {
                resource: 1,
                requested: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_validation_accepts_exact_fit() {
        let processes = vec![Process::new(0, vec![2, 2], vec![1, 0])];
        let validation = validate_request(0, &[1, 2], &[1, 2], &processes).unwrap();
        assert!(validation.is_valid());
        assert_eq!(validation.reason(), "");
    }

    #[test]
    fn test_structural_errors_propagate() {
        let (available, processes) = scenario_a();
        assert!(matches!(
            evaluate_request(5, &[1], &available, &processes),
            Err(Error::UnknownProcess { index: 5, count: 3 })
        ));
        assert!(matches!(
            evaluate_request(0, &[1, 0], &available, &processes),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_caller_data_is_untouched() {
        let (available, processes) = scenario_a();
        let before = processes.clone();
        let result = evaluate_request(0, &[1], &available, &processes).unwrap();
        assert!(result.is_safe);
        assert_eq!(processes, before);
        assert_eq!(available, vec![3]);
    }

    #[test]
    fn test_simulation_moves_units_to_target() {
        let (available, processes) = scenario_a();
        let (work, hypothetical) = simulate(&Request::new(1, vec![2]), &available, &processes);
        assert_eq!(work, vec![1]);
        assert_eq!(hypothetical[1].allocated, vec![2]);
        assert_eq!(hypothetical[0].allocated, vec![0]);
    }

    #[test]
    fn test_unsafe_grant_is_refused() {
        // Granting P0 the last unit leaves nobody able to finish.
        let processes = vec![
            Process::new(0, vec![3], vec![1]),
            Process::new(1, vec![3], vec![1]),
        ];
        let result = evaluate_request(0, &[1], &[1], &processes).unwrap();
        assert!(!result.is_safe);
        assert_eq!(result.rejection, Some(Rejection::UnsafeState));
        assert!(result.safe_sequences.is_empty());
        assert_eq!(result.optimal_sequence, None);
    }

    #[test]
    fn test_highest_score_wins_with_stable_ties() {
        let (available, processes) = scenario_a();
        let mut scorer = MockSequenceScorer::new();
        // Tie between [1, 0, 2] and [2, 0, 1]; the earlier discovery must win.
        scorer.expect_score().returning(|sequence, _, _| match sequence {
            [1, 0, 2] | [2, 0, 1] => 10.0,
            _ => 1.0,
        });

        let result = evaluate_request_with(&scorer, 0, &[0], &available, &processes).unwrap();
        assert!(result.is_safe);
        assert_eq!(result.safe_sequences.len(), 6);
        assert_eq!(result.optimal_sequence, Some(vec![1, 0, 2]));
        assert_eq!(result.safe_sequences[1].sequence, vec![2, 0, 1]);
        assert!(result
            .safe_sequences
            .windows(2)
            .all(|w| w[0].efficiency >= w[1].efficiency));
    }

    #[test]
    fn test_scorer_sees_hypothetical_state() {
        let (available, processes) = scenario_a();
        let mut scorer = MockSequenceScorer::new();
        scorer
            .expect_score()
            .times(3)
            .returning(|_, available, processes| {
                assert_eq!(available, &[1u64][..]);
                assert_eq!(processes[2].allocated, vec![2]);
                0.0
            });

        // P2 now holds two units and one unit stays free.
        let result = evaluate_request_with(&scorer, 2, &[2], &available, &processes).unwrap();
        assert!(result.is_safe);
    }

    #[test]
    fn test_check_state_on_empty_system() {
        let result = check_state(&[2], &[]).unwrap();
        assert!(result.is_safe);
        assert_eq!(result.optimal_sequence, Some(vec![]));
    }

    #[test]
    #[traced_test]
    fn test_decision_is_logged() {
        let (available, processes) = scenario_a();
        evaluate_request(0, &[1], &available, &processes).unwrap();
        assert!(logs_contain("admission decided"));
    }
}
