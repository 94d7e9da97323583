//! Trial Engine
//!
//! Runs simulated gym days against a fresh rack and aggregates the results.
//!
//! # Architecture
//!
//! ```text
//! For each trial i in 0..trial_count:
//! 1. Seed a private RNG with trial_seed(master_seed, i)
//! 2. Build a fully organized RackState
//! 3. Run all organized actions, then all disorganized actions
//! 4. Record the disorder score, drop the rack
//! Then reduce the scores to mean / population std dev / 95% CI.
//! ```
//!
//! The organized-then-disorganized order is fixed. Actions are not
//! interleaved.
//!
//! # Example
//!
//! ```rust
//! use gym_disorder_core::{RackConfig, SimulationConfig, TrialRunner};
//!
//! let config = SimulationConfig {
//!     rack: RackConfig::default(),
//!     organized_count: 70,
//!     disorganized_count: 30,
//!     trial_count: 50,
//!     rng_seed: Some(12345),
//! };
//!
//! let runner = TrialRunner::new(config).unwrap();
//! let summary = runner.run_many_trials().unwrap();
//!
//! assert_eq!(summary.outcomes.len(), 50);
//! assert!(summary.confidence_interval.0 <= summary.mean);
//! ```

use crate::models::actor::ActorBehavior;
use crate::models::rack::{RackConfig, RackError, RackState};
use crate::rng::{trial_seed, RandomChoice, RngManager};
use crate::stats::SimulationSummary;
use log::{debug, info, trace};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of steps between 0% and 100% disorganized in a sweep
pub const SWEEP_STEPS: usize = 10;

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete configuration of a multi-trial run
///
/// # Fields
///
/// * `rack` - Weight classes and capacities
/// * `organized_count` - Organized actions per simulated day
/// * `disorganized_count` - Disorganized actions per simulated day
/// * `trial_count` - Number of independent simulated days
/// * `rng_seed` - Master seed; `None` draws a fresh one per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rack: RackConfig,
    pub organized_count: usize,
    pub disorganized_count: usize,
    pub trial_count: usize,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl SimulationConfig {
    /// Unseeded config
    pub fn new(
        rack: RackConfig,
        organized_count: usize,
        disorganized_count: usize,
        trial_count: usize,
    ) -> Self {
        Self {
            rack,
            organized_count,
            disorganized_count,
            trial_count,
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Total actions in one simulated day
    pub fn total_people(&self) -> usize {
        self.organized_count + self.disorganized_count
    }

    /// Reject degenerate configurations before any trial runs
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trial_count < 1 {
            return Err(SimulationError::InvalidConfiguration(
                "trial_count must be >= 1".to_string(),
            ));
        }
        self.rack
            .validate()
            .map_err(SimulationError::InvalidConfiguration)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while running trials
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Rack error: {0}")]
    Rack(#[from] RackError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ============================================================================
// Single Trial
// ============================================================================

/// Simulate one day against a fresh rack and return its disorder score
///
/// All `organized_count` organized actions run first, then all
/// `disorganized_count` disorganized actions.
///
/// # Errors
///
/// Fails with `SimulationError::Rack(RackError::EmptyPool)` if actions are
/// requested against a rack with no units.
pub fn run_one_trial<R>(
    rack_config: &RackConfig,
    organized_count: usize,
    disorganized_count: usize,
    rng: &mut R,
) -> Result<usize, SimulationError>
where
    R: RandomChoice + ?Sized,
{
    let mut rack = RackState::new(rack_config);

    let schedule = std::iter::repeat(ActorBehavior::Organized)
        .take(organized_count)
        .chain(std::iter::repeat(ActorBehavior::Disorganized).take(disorganized_count));

    for behavior in schedule {
        let outcome = behavior.act(&mut rack, rng)?;
        trace!(
            "{:?}: took {} from {}, placed in {}",
            behavior,
            outcome.label,
            outcome.taken_from,
            outcome.placed_in
        );
    }

    Ok(rack.disorder_score())
}

// ============================================================================
// Trial Runner
// ============================================================================

/// Validated multi-trial runner
///
/// Each trial owns an `RngManager` seeded from the master seed and the trial
/// index, so sequential and parallel execution produce identical outcomes.
#[derive(Debug, Clone)]
pub struct TrialRunner {
    config: SimulationConfig,
    master_seed: u64,
}

impl TrialRunner {
    /// Validate `config` and fix the master seed
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidConfiguration` for an empty rack, a zero
    /// capacity, or `trial_count < 1`.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let master_seed = config.rng_seed.unwrap_or_else(fresh_seed);

        Ok(Self {
            config,
            master_seed,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Run trial number `index` with its own random stream
    pub fn run_trial(&self, index: usize) -> Result<usize, SimulationError> {
        let mut rng = RngManager::new(trial_seed(self.master_seed, index));
        let score = run_one_trial(
            &self.config.rack,
            self.config.organized_count,
            self.config.disorganized_count,
            &mut rng,
        )?;
        debug!("trial {} finished with disorder {}", index, score);
        Ok(score)
    }

    /// Run every trial in order on the current thread
    pub fn run_many_trials(&self) -> Result<SimulationSummary, SimulationError> {
        self.log_start("sequential");

        let outcomes = (0..self.config.trial_count)
            .map(|i| self.run_trial(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.summarize(outcomes))
    }

    /// Run trials on the rayon pool; outcomes keep trial order
    pub fn run_many_trials_parallel(&self) -> Result<SimulationSummary, SimulationError> {
        self.log_start("parallel");

        let outcomes = (0..self.config.trial_count)
            .into_par_iter()
            .map(|i| self.run_trial(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(self.summarize(outcomes))
    }

    fn log_start(&self, mode: &str) {
        info!(
            "running {} trials ({}): {} organized, {} disorganized, {} weight classes, seed {}",
            self.config.trial_count,
            mode,
            self.config.organized_count,
            self.config.disorganized_count,
            self.config.rack.num_classes(),
            self.master_seed
        );
    }

    fn summarize(&self, outcomes: Vec<usize>) -> SimulationSummary {
        let summary = SimulationSummary::from_outcomes(outcomes);
        info!(
            "mean disorder {:.2} (std {:.2}, 95% CI [{:.2}, {:.2}])",
            summary.mean,
            summary.std_dev,
            summary.confidence_interval.0,
            summary.confidence_interval.1
        );
        summary
    }
}

/// Validate `config` and run all of its trials sequentially
pub fn run_many_trials(config: &SimulationConfig) -> Result<SimulationSummary, SimulationError> {
    TrialRunner::new(config.clone())?.run_many_trials()
}

// ============================================================================
// Sensitivity Sweep
// ============================================================================

/// Mean disorder for one share of disorganized people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub fraction_disorganized: f64,
    pub organized_count: usize,
    pub disorganized_count: usize,
    pub mean_disorder: f64,
}

/// Mean disorder at 0%, 10%, ..., 100% disorganized people
///
/// The disorganized count at step `k` is `floor(total_people * k / 10)`,
/// computed in integers; the rest are organized. Each step runs its own
/// `run_many_trials` with a seed derived from the sweep seed and `k`.
///
/// # Example
///
/// ```rust
/// use gym_disorder_core::{sensitivity_sweep, RackConfig};
///
/// let points = sensitivity_sweep(&RackConfig::default(), 15, 20, Some(9)).unwrap();
///
/// assert_eq!(points.len(), 11);
/// assert_eq!(points[0].mean_disorder, 0.0);
/// assert_eq!(points[3].disorganized_count, 4);
/// assert_eq!(points[3].organized_count, 11);
/// ```
pub fn sensitivity_sweep(
    rack_config: &RackConfig,
    total_people: usize,
    trial_count: usize,
    rng_seed: Option<u64>,
) -> Result<Vec<SweepPoint>, SimulationError> {
    let sweep_seed = rng_seed.unwrap_or_else(fresh_seed);

    (0..=SWEEP_STEPS)
        .map(|step| {
            let disorganized_count = total_people * step / SWEEP_STEPS;
            let organized_count = total_people - disorganized_count;

            let config = SimulationConfig {
                rack: rack_config.clone(),
                organized_count,
                disorganized_count,
                trial_count,
                rng_seed: Some(trial_seed(sweep_seed, step)),
            };
            let summary = run_many_trials(&config)?;

            Ok(SweepPoint {
                fraction_disorganized: step as f64 / SWEEP_STEPS as f64,
                organized_count,
                disorganized_count,
                mean_disorder: summary.mean,
            })
        })
        .collect()
}

/// Fresh master seed for unseeded runs
fn fresh_seed() -> u64 {
    let (high, low) = uuid::Uuid::new_v4().as_u64_pair();
    high ^ low
}
