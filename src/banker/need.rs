//! Need calculation and the feasibility check.

use crate::types::{Error, Result};
use crate::validation::validate_dimensions;

use super::types::{Process, Units};

/// Remaining requirement of a process: `max[i] - allocated[i]`.
pub fn need(process: &Process) -> Result<Vec<Units>> {
    validate_dimensions(
        || format!("{} max/allocated", process.id),
        process.max.len(),
        process.allocated.len(),
    )?;

    process
        .max
        .iter()
        .zip(&process.allocated)
        .enumerate()
        .map(|(resource, (&max, &allocated))| {
            max.checked_sub(allocated)
                .ok_or(Error::AllocationExceedsMax {
                    process: process.id,
                    resource,
                    allocated,
                    max,
                })
        })
        .collect()
}

/// Whether the process's whole remaining need fits in `available`.
pub fn can_run(process: &Process, available: &[Units]) -> Result<bool> {
    let need = need(process)?;
    validate_dimensions(
        || format!("{} need/available", process.id),
        available.len(),
        need.len(),
    )?;
    Ok(fits(&need, available))
}

/// Elementwise `need <= available`. Callers guarantee equal lengths.
pub(crate) fn fits(need: &[Units], available: &[Units]) -> bool {
    need.iter().zip(available).all(|(n, a)| n <= a)
}
