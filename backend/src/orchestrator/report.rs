//! Run Report
//!
//! Bundles a finished run with what is needed to identify it: a run id, the
//! master seed actually used, and a fingerprint of the configuration.
//!
//! # Critical Invariants
//!
//! - **Stable Fingerprint**: Equal configs hash to the same value regardless
//!   of map iteration order
//! - **Seed Recorded**: `master_seed` is the seed the trials were derived from,
//!   even when the config left it unset

use crate::orchestrator::engine::{SimulationConfig, SimulationError};
use crate::stats::SimulationSummary;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A finished multi-trial run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run (UUID v4)
    pub run_id: String,

    /// SHA256 of the canonical JSON of the configuration
    pub config_hash: String,

    /// Seed every trial stream was derived from
    pub master_seed: u64,

    pub config: SimulationConfig,

    pub summary: SimulationSummary,
}

impl RunReport {
    /// Wrap a summary with a fresh run id and the config fingerprint
    pub fn new(
        config: SimulationConfig,
        master_seed: u64,
        summary: SimulationSummary,
    ) -> Result<Self, SimulationError> {
        let config_hash = config_fingerprint(&config)?;

        Ok(Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            config_hash,
            master_seed,
            config,
            summary,
        })
    }

    /// Pretty JSON for machine consumers
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SimulationError::Serialization(format!("Report serialization failed: {}", e)))
    }
}

// ============================================================================
// Config Hashing
// ============================================================================

/// SHA256 fingerprint of a configuration, as lowercase hex
///
/// The config goes through `serde_json::Value` first: its object maps are
/// key-sorted (the `preserve_order` feature is not enabled), so the digest
/// does not depend on struct field order or map insertion order.
///
/// # Example
///
/// ```rust
/// use gym_disorder_core::orchestrator::config_fingerprint;
/// use gym_disorder_core::{RackConfig, SimulationConfig};
///
/// let a = SimulationConfig::new(RackConfig::default(), 70, 30, 100);
/// let b = a.clone();
///
/// assert_eq!(config_fingerprint(&a).unwrap(), config_fingerprint(&b).unwrap());
/// assert_eq!(config_fingerprint(&a).unwrap().len(), 64);
/// ```
pub fn config_fingerprint<T: Serialize>(config: &T) -> Result<String, SimulationError> {
    let canonical = serde_json::to_value(config)
        .and_then(|value| serde_json::to_vec(&value))
        .map_err(|e| SimulationError::Serialization(format!("Config serialization failed: {}", e)))?;

    Ok(format!("{:x}", Sha256::digest(&canonical)))
}
