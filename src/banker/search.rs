//! Safe-sequence enumeration.
//!
//! Depth-first backtracking over process completion order. Every branch
//! owns its own copy of the work vector, the finish flags and the path, so
//! sibling branches never observe each other's releases.
//!
//! Discovery order is part of the contract: at each branch point the
//! unfinished processes are tried in ascending index order, and complete
//! sequences are returned in the order the traversal reaches them. Score
//! ties are broken by this order.

use serde::Serialize;
use tracing::trace;

use crate::types::Result;
use crate::validation::{validate_process_index, validate_processes};

use super::need::{fits, need};
use super::types::{Process, Units};

/// Find every complete safe sequence reachable from `work`.
///
/// An empty process set yields exactly one empty sequence.
pub fn find_safe_sequences(work: &[Units], processes: &[Process]) -> Result<Vec<Vec<usize>>> {
    validate_processes(processes, work)?;
    let needs = processes.iter().map(need).collect::<Result<Vec<_>>>()?;

    let search = Search {
        processes,
        needs: &needs,
    };
    let mut sequences = Vec::new();
    search.explore(work, &vec![false; processes.len()], &[], &mut sequences);
    Ok(sequences)
}

struct Search<'a> {
    processes: &'a [Process],
    needs: &'a [Vec<Units>],
}

impl Search<'_> {
    fn explore(&self, work: &[Units], finish: &[bool], path: &[usize], out: &mut Vec<Vec<usize>>) {
        let mut has_next = false;

        for (i, process) in self.processes.iter().enumerate() {
            if finish[i] || !fits(&self.needs[i], work) {
                continue;
            }
            has_next = true;

            let work = release(work, &process.allocated);
            let mut finish = finish.to_vec();
            finish[i] = true;
            let mut path = path.to_vec();
            path.push(i);

            self.explore(&work, &finish, &path, out);
        }

        if !has_next && path.len() == self.processes.len() {
            trace!(sequence = ?path, "safe sequence found");
            out.push(path.to_vec());
        }
    }
}

/// `work + allocated`, on a fresh vector.
fn release(work: &[Units], allocated: &[Units]) -> Vec<Units> {
    work.iter()
        .zip(allocated)
        .map(|(&w, &a)| w.saturating_add(a))
        .collect()
}

/// One process run while replaying a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub process: usize,
    pub available_before: Vec<Units>,
    pub need: Vec<Units>,
    pub runnable: bool,
    pub released: Vec<Units>,
    pub available_after: Vec<Units>,
}

/// Run `sequence` against `work`, recording availability at each step.
///
/// Releases happen even when a step is not runnable, so the trace always
/// covers the whole sequence; check [`ReplayStep::runnable`] to judge it.
pub fn replay(
    sequence: &[usize],
    work: &[Units],
    processes: &[Process],
) -> Result<Vec<ReplayStep>> {
    validate_processes(processes, work)?;

    let mut available = work.to_vec();
    let mut steps = Vec::with_capacity(sequence.len());
    for &index in sequence {
        validate_process_index(index, processes)?;
        let process = &processes[index];
        let need = need(process)?;
        let after = release(&available, &process.allocated);
        steps.push(ReplayStep {
            process: index,
            runnable: fits(&need, &available),
            available_before: std::mem::replace(&mut available, after.clone()),
            need,
            released: process.allocated.clone(),
            available_after: after,
        });
    }
    Ok(steps)
}
