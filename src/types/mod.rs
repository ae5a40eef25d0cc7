//! Core types for the banker.
//!
//! This module provides foundational types used throughout the crate:
//! - **IDs**: Strongly-typed identifiers (ProcessId, ResourceId)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for limits, scoring and logging

mod config;
mod errors;
mod ids;

pub use config::{
    Config, NarrationConfig, ObservabilityConfig, ScoringConfig, ScoringStrategy, SearchLimits,
};
pub use errors::{Error, Result};
pub use ids::{ProcessId, ResourceId};
