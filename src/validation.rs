//! Input shape validation.
//!
//! Every banker operation works on vectors that must be parallel to the
//! availability vector. These checks run once, up front, so the search
//! itself never has to handle ragged input.

use crate::banker::{Process, Units};
use crate::types::{Error, Result};

/// Validate that a vector has the expected number of resource dimensions.
pub fn validate_dimensions(
    context: impl FnOnce() -> String,
    expected: usize,
    actual: usize,
) -> Result<()> {
    if expected != actual {
        return Err(Error::dimension_mismatch(context(), expected, actual));
    }
    Ok(())
}

/// Validate that every process is parallel to `available`.
pub fn validate_processes(processes: &[Process], available: &[Units]) -> Result<()> {
    for (index, process) in processes.iter().enumerate() {
        validate_dimensions(
            || format!("process {index} max"),
            available.len(),
            process.max.len(),
        )?;
        validate_dimensions(
            || format!("process {index} allocated"),
            available.len(),
            process.allocated.len(),
        )?;
    }
    Ok(())
}

/// Validate that `index` names a process.
pub fn validate_process_index(index: usize, processes: &[Process]) -> Result<()> {
    if index >= processes.len() {
        return Err(Error::UnknownProcess {
            index,
            count: processes.len(),
        });
    }
    Ok(())
}
