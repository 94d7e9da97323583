//! Python bindings (PyO3)
//!
//! Exposes the trial engine to Python so plotting front ends can consume
//! raw outcomes, summary statistics and sweep points.

pub mod runner;
pub mod types;
