//! Banker - the admission-check facade.
//!
//! The [`Banker`] owns a configuration and a scoring strategy and decides
//! requests against caller-owned [`SystemState`]s. It keeps no state
//! between calls; each evaluation works on private copies and the caller
//! commits an admitted request itself.

use std::fmt;

use tracing::{debug, warn};

use crate::types::{Config, Error, Result};

pub mod evaluator;
pub mod narration;
pub mod need;
pub mod scoring;
pub mod search;
pub mod types;

pub use evaluator::{
    check_state, evaluate_request, evaluate_request_with, validate_request, Validation,
};
pub use need::{can_run, need};
pub use scoring::{
    efficiency, scorer_for, ReleaseWeightedScorer, SequenceScorer, UniformScorer,
};
pub use search::{find_safe_sequences, replay, ReplayStep};
pub use types::{
    BankerResult, Process, Rejection, Request, Resource, SafeSequence, SystemState, Units,
};

/// Admission checker bound to one configuration.
pub struct Banker {
    config: Config,
    scorer: Box<dyn SequenceScorer>,
}

impl Banker {
    /// Banker using the scoring strategy named in `config`.
    pub fn new(config: Config) -> Self {
        let scorer = scorer_for(config.scoring.strategy);
        Self::with_scorer(config, scorer)
    }

    /// Banker with a custom scoring strategy.
    pub fn with_scorer(config: Config, scorer: Box<dyn SequenceScorer>) -> Self {
        debug!(scorer = scorer.name(), "banker created");
        Self { config, scorer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scorer(&self) -> &dyn SequenceScorer {
        self.scorer.as_ref()
    }

    /// Decide whether granting `request` keeps `state` safe.
    pub fn evaluate(&self, state: &SystemState, request: &Request) -> Result<BankerResult> {
        self.enforce_limits(state)?;
        evaluator::evaluate(
            self.scorer.as_ref(),
            &self.config.narration,
            Some(request),
            &state.available,
            &state.processes,
        )
    }

    /// Decide whether `state` itself is safe.
    pub fn check(&self, state: &SystemState) -> Result<BankerResult> {
        self.enforce_limits(state)?;
        evaluator::evaluate(
            self.scorer.as_ref(),
            &self.config.narration,
            None,
            &state.available,
            &state.processes,
        )
    }

    fn enforce_limits(&self, state: &SystemState) -> Result<()> {
        let limits = &self.config.limits;
        if state.processes.len() > limits.max_processes {
            warn!(
                processes = state.processes.len(),
                limit = limits.max_processes,
                "process limit exceeded"
            );
            return Err(Error::limit_exceeded(format!(
                "{} processes exceeds the limit of {}",
                state.processes.len(),
                limits.max_processes
            )));
        }
        if state.available.len() > limits.max_resources {
            warn!(
                resources = state.available.len(),
                limit = limits.max_resources,
                "resource limit exceeded"
            );
            return Err(Error::limit_exceeded(format!(
                "{} resource types exceeds the limit of {}",
                state.available.len(),
                limits.max_resources
            )));
        }
        if !state.is_consistent() {
            debug!("available vector disagrees with resource set; using available as given");
        }
        Ok(())
    }
}

impl Default for Banker {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl fmt::Debug for Banker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Banker")
            .field("config", &self.config)
            .field("scorer", &self.scorer.name())
            .finish()
    }
}
