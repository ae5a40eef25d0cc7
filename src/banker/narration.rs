//! Human-readable trace of a decision.
//!
//! Formatting only: this module reads a finished [`BankerResult`] and fills
//! its `steps` and `result_message`. It never changes the verdict.

use crate::types::NarrationConfig;

use super::need::need;
use super::search::replay;
use super::types::{BankerResult, Process, Rejection, Request, Units};

/// Fill `steps` and `result_message` for `result`.
///
/// `available` and `processes` must be the state the decision was made
/// on: the hypothetical state after a grant, or the caller's state when
/// the request was refused during validation.
pub fn describe_result(
    result: &mut BankerResult,
    request: Option<&Request>,
    available: &[Units],
    processes: &[Process],
    config: &NarrationConfig,
) {
    let (message, steps) = match &result.rejection {
        Some(rejection @ (Rejection::ExceedsNeed { .. } | Rejection::ExceedsAvailable { .. })) => {
            let message = format!("Error: {rejection}");
            let steps = vec![format!("{message}, request denied")];
            (message, steps)
        }
        Some(Rejection::UnsafeState) => {
            let mut steps = preamble("Starting safety check...", request, available, processes);
            steps.push("Safety check failed: no safe sequence found".to_string());
            steps.push("Current allocation could lead to deadlock, request denied".to_string());
            (
                "System would enter an unsafe state! Request denied".to_string(),
                steps,
            )
        }
        None => describe_safe(result, request, available, processes, config),
    };

    result.result_message = message;
    result.steps = steps;
}

fn describe_safe(
    result: &BankerResult,
    request: Option<&Request>,
    available: &[Units],
    processes: &[Process],
    config: &NarrationConfig,
) -> (String, Vec<String>) {
    let optimal = result.optimal_sequence.as_deref().unwrap_or_default();
    let optimal_str = sequence_label(optimal, processes);
    let message = format!(
        "System is safe (found {} sequences). Optimal sequence: {optimal_str}",
        result.safe_sequences.len()
    );

    let mut steps = preamble("Safety check steps:", request, available, processes);
    steps.push("Checking each process's need:".to_string());
    for (index, process) in processes.iter().enumerate() {
        // Dimensions were validated before the search ran.
        if let Ok(need) = need(process) {
            steps.push(format!(
                "  {}: need = {}",
                process_label(index, processes),
                join(&need)
            ));
        }
    }
    steps.push("Searching for safe sequences...".to_string());
    for (rank, safe) in result
        .safe_sequences
        .iter()
        .take(config.max_listed_sequences)
        .enumerate()
    {
        steps.push(format!(
            "Safe sequence {}: {} (efficiency score: {:.2})",
            rank + 1,
            sequence_label(&safe.sequence, processes),
            safe.efficiency
        ));
    }
    steps.push(format!("Using most efficient sequence: {optimal_str}"));
    steps.extend(walkthrough(optimal, available, processes));

    (message, steps)
}

fn preamble(
    title: &str,
    request: Option<&Request>,
    available: &[Units],
    processes: &[Process],
) -> Vec<String> {
    let mut steps = vec![
        title.to_string(),
        format!("Available resources: {}", join(available)),
    ];
    if let Some(request) = request {
        steps.push(format!(
            "Process {} requests: {}",
            process_label(request.process_id, processes),
            join(&request.resources)
        ));
    }
    steps
}

/// Step-by-step replay of the optimal sequence.
fn walkthrough(sequence: &[usize], available: &[Units], processes: &[Process]) -> Vec<String> {
    let Ok(replayed) = replay(sequence, available, processes) else {
        return Vec::new();
    };

    let mut steps = vec!["Optimal sequence walkthrough:".to_string()];
    for (k, step) in replayed.iter().enumerate() {
        let label = process_label(step.process, processes);
        steps.push(format!("Step {}: run {label}", k + 1));
        steps.push(format!("  • available before: {}", join(&step.available_before)));
        steps.push(format!("  • need of P{}: {}", step.process, join(&step.need)));
        steps.push(format!(
            "  • can run: {}",
            if step.runnable { "✅ yes" } else { "❌ no" }
        ));
        steps.push(format!("  • P{} releases: {}", step.process, join(&step.released)));
        steps.push(format!("  • available after: {}", join(&step.available_after)));
        if k + 1 < replayed.len() {
            steps.push("  ↓".to_string());
        }
    }

    let last = replayed
        .last()
        .map(|step| step.available_after.as_slice())
        .unwrap_or(available);
    steps.push("✅ All processes finished, system is safe!".to_string());
    steps.push(format!("Final available resources: {}", join(last)));
    steps
}

/// `P3 (name)`, or just `P3` for unnamed processes.
fn process_label(index: usize, processes: &[Process]) -> String {
    processes
        .get(index)
        .map(|process| process.display_name(index))
        .unwrap_or_else(|| format!("P{index}"))
}

fn sequence_label(sequence: &[usize], processes: &[Process]) -> String {
    sequence
        .iter()
        .map(|&index| process_label(index, processes))
        .collect::<Vec<_>>()
        .join(" → ")
}

fn join(units: &[Units]) -> String {
    units
        .iter()
        .map(Units::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banker::types::SafeSequence;
    use pretty_assertions::assert_eq;

    fn named_pair() -> Vec<Process> {
        vec![
            Process::new(0, vec![2], vec![1]).with_name("editor"),
            Process::new(1, vec![3], vec![1]),
        ]
    }

    #[test]
    fn test_validation_rejection_has_single_step() {
        let mut result = BankerResult::rejected(
            Rejection::ExceedsNeed {
                resource: 0,
                requested: 5,
                need: 1,
            },
            vec![],
        );
        describe_result(&mut result, None, &[1], &named_pair(), &NarrationConfig::default());

        assert_eq!(result.result_message, "Error: request exceeds maximum need");
        assert_eq!(
            result.steps,
            vec!["Error: request exceeds maximum need, request denied".to_string()]
        );
    }

    #[test]
    fn test_unsafe_trace_mentions_deadlock() {
        let mut result = BankerResult::rejected(Rejection::UnsafeState, vec![]);
        let request = Request::new(0, vec![1]);
        describe_result(
            &mut result,
            Some(&request),
            &[0],
            &named_pair(),
            &NarrationConfig::default(),
        );

        assert_eq!(
            result.result_message,
            "System would enter an unsafe state! Request denied"
        );
        assert_eq!(result.steps[2], "Process P0 (editor) requests: 1");
        assert!(result.steps.last().unwrap().contains("deadlock"));
    }

    #[test]
    fn test_safe_trace_walks_optimal_sequence() {
        let processes = named_pair();
        let mut result = BankerResult {
            is_safe: true,
            safe_sequences: vec![
                SafeSequence {
                    sequence: vec![0, 1],
                    efficiency: 3.0,
                },
                SafeSequence {
                    sequence: vec![1, 0],
                    efficiency: 3.0,
                },
            ],
            optimal_sequence: Some(vec![0, 1]),
            ..BankerResult::default()
        };
        let config = NarrationConfig {
            max_listed_sequences: 1,
        };
        describe_result(&mut result, None, &[2], &processes, &config);

        assert_eq!(
            result.result_message,
            "System is safe (found 2 sequences). Optimal sequence: P0 (editor) → P1"
        );
        assert_eq!(
            result.steps[..6],
            [
                "Safety check steps:",
                "Available resources: 2",
                "Checking each process's need:",
                "  P0 (editor): need = 1",
                "  P1: need = 2",
                "Searching for safe sequences...",
            ]
        );
        assert_eq!(
            result.steps[6],
            "Safe sequence 1: P0 (editor) → P1 (efficiency score: 3.00)"
        );
        assert!(!result.steps.iter().any(|s| s.starts_with("Safe sequence 2")));
        assert_eq!(result.steps.last().unwrap(), "Final available resources: 4");
        assert_eq!(result.steps.iter().filter(|s| *s == "  ↓").count(), 1);
    }
}
