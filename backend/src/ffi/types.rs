//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).
//! Counts and capacities arrive as signed Python ints so negative values are
//! reported as configuration errors rather than overflow errors.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::models::rack::{RackConfig, WeightId};
use crate::orchestrator::SimulationError;
use crate::stats::SimulationSummary;

// ========================================================================
// Configuration Parsers
// ========================================================================

/// Convert a Python `{weight: capacity}` dict to a RackConfig
///
/// # Errors
///
/// Returns PyValueError if a key or value is not an int, or a capacity is
/// not positive.
pub fn parse_rack_config(py_rack: &Bound<'_, PyDict>) -> PyResult<RackConfig> {
    let mut capacities = Vec::with_capacity(py_rack.len());
    for (key, value) in py_rack.iter() {
        let weight: WeightId = key.extract()?;
        let capacity: i64 = value.extract()?;
        capacities.push((weight, capacity));
    }

    RackConfig::from_signed(capacities).map_err(PyValueError::new_err)
}

/// Reject negative actor or trial counts
pub fn non_negative_count(name: &str, value: i64) -> PyResult<usize> {
    usize::try_from(value)
        .map_err(|_| PyValueError::new_err(format!("{} must be non-negative, got {}", name, value)))
}

/// Map engine errors to Python exceptions
///
/// Configuration problems raise ValueError; anything else RuntimeError.
pub fn simulation_error_to_py(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfiguration(msg) => PyValueError::new_err(msg),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

// ========================================================================
// Result Converters
// ========================================================================

/// Convert a SimulationSummary to a Python dict
///
/// Keys: `outcomes`, `mean`, `std_dev`, `confidence_interval`, `master_seed`.
pub fn summary_to_py(
    py: Python<'_>,
    summary: &SimulationSummary,
    master_seed: u64,
) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("outcomes", PyList::new_bound(py, summary.outcomes.iter()))?;
    dict.set_item("mean", summary.mean)?;
    dict.set_item("std_dev", summary.std_dev)?;
    dict.set_item("confidence_interval", summary.confidence_interval)?;
    dict.set_item("master_seed", master_seed)?;
    Ok(dict.unbind())
}

/// Convert a RackConfig to a Python `{weight: capacity}` dict
pub fn rack_to_py(py: Python<'_>, rack: &RackConfig) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    for (weight, capacity) in rack.iter() {
        dict.set_item(weight, capacity)?;
    }
    Ok(dict.unbind())
}

#[cfg(all(test, feature = "pyo3"))]
mod tests {
    use super::*;
    use crate::models::rack::RackError;

    fn with_py<F>(f: F)
    where
        F: for<'py> FnOnce(Python<'py>),
    {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(f);
    }

    #[test]
    fn test_non_negative_count() {
        with_py(|py| {
            assert_eq!(non_negative_count("trials", 0).unwrap(), 0);
            assert_eq!(non_negative_count("trials", 25).unwrap(), 25);

            let err = non_negative_count("organized", -1).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn test_parse_rack_config() {
        with_py(|py| {
            let dict = PyDict::new_bound(py);
            dict.set_item(10, 2).unwrap();
            dict.set_item(20, 3).unwrap();

            let rack = parse_rack_config(&dict).unwrap();
            assert_eq!(rack.capacity(10), Some(2));
            assert_eq!(rack.total_capacity(), 5);
        });
    }

    #[test]
    fn test_parse_rack_rejects_non_positive_capacity() {
        with_py(|py| {
            for bad in [0i64, -3] {
                let dict = PyDict::new_bound(py);
                dict.set_item(10, 2).unwrap();
                dict.set_item(20, bad).unwrap();

                let err = parse_rack_config(&dict).unwrap_err();
                assert!(err.is_instance_of::<PyValueError>(py), "capacity {}", bad);
            }
        });
    }

    #[test]
    fn test_error_mapping() {
        with_py(|py| {
            let invalid = SimulationError::InvalidConfiguration("trial_count must be >= 1".into());
            assert!(simulation_error_to_py(invalid).is_instance_of::<PyValueError>(py));

            let rack = SimulationError::Rack(RackError::EmptyPool);
            assert!(simulation_error_to_py(rack).is_instance_of::<PyRuntimeError>(py));
        });
    }
}
