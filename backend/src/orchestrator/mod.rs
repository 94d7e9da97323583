//! Orchestrator - trial loop and run reporting
//!
//! See `engine.rs` for the trial loop and `report.rs` for run metadata.

pub mod engine;
pub mod report;

pub use engine::{
    run_many_trials, run_one_trial, sensitivity_sweep, SimulationConfig, SimulationError,
    SweepPoint, TrialRunner, SWEEP_STEPS,
};
pub use report::{config_fingerprint, RunReport};
