//! Gym Disorder Simulator Core - Rust Engine
//!
//! Monte Carlo model of how a dumbbell rack drifts out of order when
//! organized and disorganized gym-goers take and return weights.
//!
//! # Architecture
//!
//! - **models**: Rack state and actor behaviour
//! - **orchestrator**: Trial loop, sensitivity sweep, run reports
//! - **stats**: Mean, population std dev, confidence interval, histograms
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Units are never created or destroyed, only moved between buckets
//! 2. Every trial starts from a fully organized rack and owns its RNG stream
//! 3. FFI boundary is minimal and safe

pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod stats;

// Re-exports for convenience
pub use models::{
    actor::{ActionOutcome, ActorBehavior},
    rack::{RackConfig, RackError, RackState, WeightId},
};
pub use orchestrator::{
    run_many_trials, run_one_trial, sensitivity_sweep, RunReport, SimulationConfig,
    SimulationError, SweepPoint, TrialRunner,
};
pub use rng::{RandomChoice, RngManager};
pub use stats::{Histogram, HistogramBin, SimulationSummary};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn gym_disorder_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::runner::py_run_many_trials, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::runner::py_sensitivity_sweep, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::runner::py_default_rack, m)?)?;
    Ok(())
}
