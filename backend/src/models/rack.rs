//! Rack State
//!
//! The dumbbell rack: one bucket per weight class, each holding the labels
//! of the units currently stored there.
//!
//! # Critical Invariants
//!
//! 1. **Unit Conservation**: Between actions, the number of stored labels
//!    across all buckets equals the sum of all capacities. A unit is only
//!    absent while it is checked out inside a single action.
//! 2. **Fixed Capacities**: Capacities never change after construction.
//! 3. **Deterministic Ordering**: Buckets are kept in ascending weight order,
//!    so a seeded random stream always makes the same choices.

use crate::rng::RandomChoice;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Numeric label of a weight class (e.g. `10` for the 10 kg dumbbells)
pub type WeightId = u32;

/// Errors that can occur during rack operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RackError {
    #[error("No weight class has an available unit")]
    EmptyPool,

    #[error("Bucket for weight {weight} is empty")]
    EmptyBucket { weight: WeightId },

    #[error("Unknown weight class: {0}")]
    UnknownWeight(WeightId),
}

/// Weight classes and how many physical units of each exist
///
/// Serialises as a JSON object keyed by weight:
///
/// ```
/// use gym_disorder_core::RackConfig;
///
/// let rack = RackConfig::from_json(r#"{"10": 2, "12": 3}"#).unwrap();
/// assert_eq!(rack.capacity(10), Some(2));
/// assert_eq!(rack.total_capacity(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RackConfig {
    capacities: BTreeMap<WeightId, usize>,
}

impl RackConfig {
    /// Build a rack config from `(weight, capacity)` pairs
    ///
    /// No validation happens here; see [`RackConfig::validate`].
    pub fn new<I>(capacities: I) -> Self
    where
        I: IntoIterator<Item = (WeightId, usize)>,
    {
        Self {
            capacities: capacities.into_iter().collect(),
        }
    }

    /// Parse a rack config from a JSON object of `weight -> capacity`
    ///
    /// Capacities are read as signed integers so that negative and zero
    /// values are reported as configuration errors, not parse errors.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let raw: BTreeMap<WeightId, i64> =
            serde_json::from_str(json).map_err(|e| format!("invalid rack config: {}", e))?;
        Self::from_signed(raw)
    }

    /// Build a rack config from signed capacities, rejecting non-positive ones
    pub fn from_signed<I>(capacities: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (WeightId, i64)>,
    {
        let mut map = BTreeMap::new();
        for (weight, capacity) in capacities {
            if capacity <= 0 {
                return Err(format!(
                    "capacity for weight {} must be positive, got {}",
                    weight, capacity
                ));
            }
            map.insert(weight, capacity as usize);
        }
        Ok(Self { capacities: map })
    }

    /// Check the config can drive a simulation
    ///
    /// Rejects an empty rack (no valid action target) and zero capacities.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacities.is_empty() {
            return Err("rack must contain at least one weight class".to_string());
        }
        if let Some((weight, _)) = self.capacities.iter().find(|&(_, &cap)| cap == 0) {
            return Err(format!("capacity for weight {} must be positive", weight));
        }
        Ok(())
    }

    pub fn capacity(&self, weight: WeightId) -> Option<usize> {
        self.capacities.get(&weight).copied()
    }

    pub fn total_capacity(&self) -> usize {
        self.capacities.values().sum()
    }

    pub fn num_classes(&self) -> usize {
        self.capacities.len()
    }

    /// Weight classes in ascending order with their capacities
    pub fn iter(&self) -> impl Iterator<Item = (WeightId, usize)> + '_ {
        self.capacities.iter().map(|(&w, &c)| (w, c))
    }
}

impl Default for RackConfig {
    /// The standard gym rack: 14 dumbbell weights from 10 to 36
    fn default() -> Self {
        Self::new([
            (10, 2),
            (12, 2),
            (14, 2),
            (16, 3),
            (18, 6),
            (20, 5),
            (22, 5),
            (24, 5),
            (26, 5),
            (28, 5),
            (30, 5),
            (32, 4),
            (34, 4),
            (36, 2),
        ])
    }
}

/// Mutable rack inventory for a single trial
///
/// # Example
///
/// ```rust
/// use gym_disorder_core::{RackConfig, RackState, RngManager};
///
/// let config = RackConfig::new([(10, 1), (20, 1)]);
/// let mut rack = RackState::new(&config);
/// let mut rng = RngManager::new(7);
///
/// assert_eq!(rack.disorder_score(), 0);
///
/// let weight = rack.select_available_class(&mut rng).unwrap();
/// let label = rack.take_one(weight).unwrap();
/// rack.return_to_random_place(label, &mut rng).unwrap();
///
/// assert_eq!(rack.total_units(), 2);
/// assert!(rack.disorder_score() <= 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackState {
    /// Immutable capacity per weight class
    capacities: BTreeMap<WeightId, usize>,

    /// Labels currently stored in each class's bucket (last = top)
    buckets: BTreeMap<WeightId, Vec<WeightId>>,
}

impl RackState {
    /// Create a fully organized rack: every unit in its own bucket
    pub fn new(config: &RackConfig) -> Self {
        let buckets = config
            .iter()
            .map(|(weight, capacity)| (weight, vec![weight; capacity]))
            .collect();

        Self {
            capacities: config.capacities.clone(),
            buckets,
        }
    }

    /// Uniformly choose a weight class whose bucket is non-empty
    ///
    /// # Errors
    ///
    /// `RackError::EmptyPool` if every bucket is empty (total capacity zero).
    pub fn select_available_class<R>(&self, rng: &mut R) -> Result<WeightId, RackError>
    where
        R: RandomChoice + ?Sized,
    {
        let available: Vec<WeightId> = self
            .buckets
            .iter()
            .filter(|(_, labels)| !labels.is_empty())
            .map(|(&weight, _)| weight)
            .collect();

        if available.is_empty() {
            return Err(RackError::EmptyPool);
        }

        Ok(available[rng.choose_index(available.len())])
    }

    /// Remove and return the top label of `weight`'s bucket
    ///
    /// The returned label may belong to a different class if the bucket
    /// holds misplaced units.
    pub fn take_one(&mut self, weight: WeightId) -> Result<WeightId, RackError> {
        self.buckets
            .get_mut(&weight)
            .ok_or(RackError::UnknownWeight(weight))?
            .pop()
            .ok_or(RackError::EmptyBucket { weight })
    }

    /// Put `label` back in its own bucket if that bucket has room
    ///
    /// Returns `Ok(true)` if the label was stored, `Ok(false)` if the bucket
    /// is already at (or above) capacity. In the latter case the rack is
    /// unchanged and the caller still holds the unit.
    pub fn return_to_correct_place(&mut self, label: WeightId) -> Result<bool, RackError> {
        let capacity = self
            .capacities
            .get(&label)
            .copied()
            .ok_or(RackError::UnknownWeight(label))?;
        let bucket = self
            .buckets
            .get_mut(&label)
            .ok_or(RackError::UnknownWeight(label))?;

        if bucket.len() < capacity {
            bucket.push(label);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Put `label` in a uniformly chosen bucket, ignoring capacity
    ///
    /// Every bucket is a candidate, whether under-, over- or exactly full.
    /// Returns the weight class of the bucket that received the unit.
    pub fn return_to_random_place<R>(
        &mut self,
        label: WeightId,
        rng: &mut R,
    ) -> Result<WeightId, RackError>
    where
        R: RandomChoice + ?Sized,
    {
        if self.buckets.is_empty() {
            return Err(RackError::EmptyPool);
        }

        let index = rng.choose_index(self.buckets.len());
        let (&target, bucket) = self
            .buckets
            .iter_mut()
            .nth(index)
            .ok_or(RackError::EmptyPool)?;
        bucket.push(label);
        Ok(target)
    }

    /// Number of stored units sitting in a bucket other than their own
    pub fn disorder_score(&self) -> usize {
        self.buckets
            .iter()
            .map(|(&weight, labels)| labels.iter().filter(|&&l| l != weight).count())
            .sum()
    }

    /// Misplaced units in one bucket (0 for unknown weights)
    pub fn misplaced_in(&self, weight: WeightId) -> usize {
        self.buckets
            .get(&weight)
            .map(|labels| labels.iter().filter(|&&l| l != weight).count())
            .unwrap_or(0)
    }

    pub fn bucket(&self, weight: WeightId) -> Option<&[WeightId]> {
        self.buckets.get(&weight).map(Vec::as_slice)
    }

    /// Labels currently stored across all buckets
    pub fn total_units(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn total_capacity(&self) -> usize {
        self.capacities.values().sum()
    }

    pub fn num_classes(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of indices
    struct Scripted(Vec<usize>);

    impl RandomChoice for Scripted {
        fn choose_index(&mut self, len: usize) -> usize {
            let next = self.0.remove(0);
            assert!(next < len, "scripted index {} out of range {}", next, len);
            next
        }
    }

    #[test]
    fn test_new_rack_is_organized() {
        let rack = RackState::new(&RackConfig::new([(10, 2), (12, 3)]));

        assert_eq!(rack.bucket(10), Some(&[10, 10][..]));
        assert_eq!(rack.bucket(12), Some(&[12, 12, 12][..]));
        assert_eq!(rack.disorder_score(), 0);
        assert_eq!(rack.total_units(), 5);
    }

    #[test]
    fn test_select_skips_empty_buckets() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));
        rack.take_one(10).unwrap();

        // Only weight 12 is available, so index 0 must map to it
        let chosen = rack.select_available_class(&mut Scripted(vec![0])).unwrap();
        assert_eq!(chosen, 12);
    }

    #[test]
    fn test_select_on_empty_pool() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1)]));
        rack.take_one(10).unwrap();

        let result = rack.select_available_class(&mut Scripted(vec![]));
        assert_eq!(result, Err(RackError::EmptyPool));
    }

    #[test]
    fn test_take_from_empty_bucket() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1)]));
        rack.take_one(10).unwrap();

        assert_eq!(rack.take_one(10), Err(RackError::EmptyBucket { weight: 10 }));
        assert_eq!(rack.take_one(99), Err(RackError::UnknownWeight(99)));
    }

    #[test]
    fn test_take_returns_top_label() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));
        let label = rack.take_one(12).unwrap();
        // Drop the 12 on top of the 10 bucket
        rack.return_to_random_place(label, &mut Scripted(vec![0])).unwrap();

        assert_eq!(rack.take_one(10), Ok(12));
    }

    #[test]
    fn test_correct_place_respects_capacity() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));

        // Bucket 10 is full
        assert_eq!(rack.return_to_correct_place(10), Ok(false));
        assert_eq!(rack.bucket(10).unwrap().len(), 1);

        rack.take_one(10).unwrap();
        assert_eq!(rack.return_to_correct_place(10), Ok(true));
        assert_eq!(rack.disorder_score(), 0);
    }

    #[test]
    fn test_misplaced_units_count_once_each() {
        let mut rack = RackState::new(&RackConfig::new([(10, 2), (12, 2)]));
        let a = rack.take_one(12).unwrap();
        let b = rack.take_one(12).unwrap();
        rack.return_to_random_place(a, &mut Scripted(vec![0])).unwrap();
        rack.return_to_random_place(b, &mut Scripted(vec![0])).unwrap();

        assert_eq!(rack.misplaced_in(10), 2);
        assert_eq!(rack.misplaced_in(12), 0);
        assert_eq!(rack.disorder_score(), 2);
        assert_eq!(rack.total_units(), rack.total_capacity());
    }

    #[test]
    fn test_from_signed_rejects_non_positive() {
        assert!(RackConfig::from_signed([(10, 2), (12, 0)]).is_err());
        assert!(RackConfig::from_signed([(10, -1)]).is_err());
        assert!(RackConfig::from_signed([(10, 3)]).is_ok());
    }

    #[test]
    fn test_default_rack() {
        let rack = RackConfig::default();
        assert_eq!(rack.num_classes(), 14);
        assert_eq!(rack.total_capacity(), 55);
        assert!(rack.validate().is_ok());
    }
}
