//! Banker types: Resource, Process, SystemState, Request and results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ProcessId, ResourceId};

/// Count of resource units.
pub type Units = u64;

/// A system-wide resource pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub available: Units,
}

impl Resource {
    pub fn new(id: u32, name: impl Into<String>, available: Units) -> Self {
        Self {
            id: ResourceId::new(id),
            name: name.into(),
            available,
        }
    }
}

/// A process with its maximum claim and current allocation.
///
/// `max` and `allocated` are parallel to the resource set. The need
/// (`max - allocated`) is always derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub max: Vec<Units>,
    pub allocated: Vec<Units>,
}

impl Process {
    pub fn new(id: u32, max: Vec<Units>, allocated: Vec<Units>) -> Self {
        Self {
            id: ProcessId::new(id),
            name: None,
            max,
            allocated,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display label; empty when the process is unnamed.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// `P3 (name)` for position `index`, or just `P3` when unnamed.
    pub fn display_name(&self, index: usize) -> String {
        match self.label() {
            "" => format!("P{index}"),
            name => format!("P{index} ({name})"),
        }
    }

    /// Total units currently held across all resources.
    pub fn held_units(&self) -> Units {
        self.allocated
            .iter()
            .fold(0, |acc: Units, &units| acc.saturating_add(units))
    }
}

/// Resources, processes and the availability vector of one system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SystemState {
    pub resources: Vec<Resource>,
    pub processes: Vec<Process>,
    /// Parallel to `resources`. Treated as authoritative by every
    /// operation; it is never reconciled against the resource list.
    #[serde(default)]
    pub available: Vec<Units>,
}

impl SystemState {
    /// Build a state whose availability vector is derived from `resources`.
    pub fn new(resources: Vec<Resource>, processes: Vec<Process>) -> Self {
        let available = resources.iter().map(|r| r.available).collect();
        Self {
            resources,
            processes,
            available,
        }
    }

    /// Whether `available` agrees with the resource set.
    pub fn is_consistent(&self) -> bool {
        self.available.len() == self.resources.len()
            && self
                .resources
                .iter()
                .zip(&self.available)
                .all(|(r, &units)| r.available == units)
    }

    /// Process labels, in index order.
    pub fn process_names(&self) -> Vec<String> {
        self.processes.iter().map(|p| p.label().to_string()).collect()
    }
}

/// A request for additional units on behalf of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Index of the target process in the process list.
    pub process_id: usize,
    pub resources: Vec<Units>,
}

impl Request {
    pub fn new(process_id: usize, resources: Vec<Units>) -> Self {
        Self {
            process_id,
            resources,
        }
    }

    /// A request for nothing; evaluating it checks the current state.
    pub fn zero(process_id: usize, dims: usize) -> Self {
        Self::new(process_id, vec![0; dims])
    }
}

/// One complete safe ordering of process indices and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeSequence {
    pub sequence: Vec<usize>,
    pub efficiency: f64,
}

/// Why a request was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The request asks for more than the process may still claim.
    #[error("request exceeds maximum need")]
    ExceedsNeed {
        resource: usize,
        requested: Units,
        need: Units,
    },

    /// The request asks for more than is currently free.
    #[error("insufficient available resources")]
    ExceedsAvailable {
        resource: usize,
        requested: Units,
        available: Units,
    },

    /// Granting the request leaves no complete safe sequence.
    #[error("system would enter an unsafe state")]
    UnsafeState,
}

/// Outcome of one admission check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BankerResult {
    pub is_safe: bool,
    /// Human-readable trace, filled by [`narration`](super::narration).
    pub steps: Vec<String>,
    pub result_message: String,
    /// Every safe sequence found, ranked by descending efficiency.
    pub safe_sequences: Vec<SafeSequence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_sequence: Option<Vec<usize>>,
    pub process_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl BankerResult {
    /// A refusal carrying no sequences.
    pub fn rejected(rejection: Rejection, process_names: Vec<String>) -> Self {
        Self {
            is_safe: false,
            rejection: Some(rejection),
            process_names,
            ..Self::default()
        }
    }

    /// Whether the request may be committed by the caller.
    pub fn is_admitted(&self) -> bool {
        self.is_safe && self.rejection.is_none()
    }
}
