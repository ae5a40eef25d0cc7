//! # Banker Core - Deadlock Avoidance Kernel
//!
//! Rust implementation of the Banker's Algorithm providing:
//! - Need calculation and per-process feasibility checks
//! - Exhaustive enumeration of every safe completion sequence
//! - Pluggable scoring to pick an optimal sequence
//! - Request admission: validate, simulate, search, decide
//!
//! ## Architecture
//!
//! Every evaluation is a pure function over copies of the caller's state:
//! ```text
//!                    ┌────────────────────────────────────────┐
//!   Request      →   │          Request Evaluator             │
//!                    │  Validate → Simulate → Search → Decide │
//!                    │               │                        │
//!                    │     ┌─────────▼────────┐ ┌─────────┐   │
//!                    │     │  Safe-Sequence   │ │ Scorer  │   │
//!                    │     │   Enumerator     │ │         │   │
//!                    │     └─────────┬────────┘ └─────────┘   │
//!                    │     ┌─────────▼────────┐               │
//!                    │     │ Need/Feasibility │               │
//!                    │     └──────────────────┘               │
//!                    └────────────────────────────────────────┘
//!                                    │
//!                              BankerResult  →  caller commits if safe
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod banker;
pub mod types;

// Internal utilities
pub mod observability;
pub mod validation;

pub use banker::{Banker, BankerResult, Process, Rejection, Request, Resource, SystemState};
pub use types::{Config, Error, Result};
