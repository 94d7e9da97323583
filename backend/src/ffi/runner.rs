//! PyO3 functions for running simulations
//!
//! # Example (from Python)
//!
//! ```python
//! from gym_disorder_core import default_rack, run_many_trials, sensitivity_sweep
//!
//! result = run_many_trials(default_rack(), 70, 30, 1000)
//! print(result["mean"], result["confidence_interval"])
//!
//! for fraction, mean in sensitivity_sweep(default_rack(), 100, 500):
//!     print(f"{fraction:.0%}: {mean:.2f}")
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{
    non_negative_count, parse_rack_config, rack_to_py, simulation_error_to_py, summary_to_py,
};
use crate::models::rack::RackConfig;
use crate::orchestrator::{sensitivity_sweep, SimulationConfig, TrialRunner};

/// Run `trials` simulated days and return outcomes plus statistics
///
/// Raises ValueError for invalid configuration (empty rack, non-positive
/// capacity, negative counts, `trials < 1`).
#[pyfunction]
#[pyo3(name = "run_many_trials", signature = (rack, organized, disorganized, trials, seed=None, parallel=false))]
pub fn py_run_many_trials(
    py: Python<'_>,
    rack: &Bound<'_, PyDict>,
    organized: i64,
    disorganized: i64,
    trials: i64,
    seed: Option<u64>,
    parallel: bool,
) -> PyResult<Py<PyDict>> {
    let config = SimulationConfig {
        rack: parse_rack_config(rack)?,
        organized_count: non_negative_count("organized", organized)?,
        disorganized_count: non_negative_count("disorganized", disorganized)?,
        trial_count: non_negative_count("trials", trials)?,
        rng_seed: seed,
    };

    let runner = TrialRunner::new(config).map_err(simulation_error_to_py)?;
    let summary = py
        .allow_threads(|| {
            if parallel {
                runner.run_many_trials_parallel()
            } else {
                runner.run_many_trials()
            }
        })
        .map_err(simulation_error_to_py)?;

    summary_to_py(py, &summary, runner.master_seed())
}

/// Mean disorder at 0%, 10%, ..., 100% disorganized people
///
/// Returns a list of `(fraction_disorganized, mean_disorder)` tuples.
#[pyfunction]
#[pyo3(name = "sensitivity_sweep", signature = (rack, total_people, trials, seed=None))]
pub fn py_sensitivity_sweep(
    py: Python<'_>,
    rack: &Bound<'_, PyDict>,
    total_people: i64,
    trials: i64,
    seed: Option<u64>,
) -> PyResult<Vec<(f64, f64)>> {
    let rack = parse_rack_config(rack)?;
    let total_people = non_negative_count("total_people", total_people)?;
    let trials = non_negative_count("trials", trials)?;

    let points = py
        .allow_threads(|| sensitivity_sweep(&rack, total_people, trials, seed))
        .map_err(simulation_error_to_py)?;

    Ok(points
        .into_iter()
        .map(|p| (p.fraction_disorganized, p.mean_disorder))
        .collect())
}

/// The standard gym rack as a `{weight: capacity}` dict
#[pyfunction]
#[pyo3(name = "default_rack")]
pub fn py_default_rack(py: Python<'_>) -> PyResult<Py<PyDict>> {
    rack_to_py(py, &RackConfig::default())
}
