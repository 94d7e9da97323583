//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG used for every random choice a trial makes.
//! Each trial owns its own generator, so trials never share a stream.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//! Index selection uses the high bits of the output (multiply-shift), which
//! are the strongest bits of xorshift64*.

use super::RandomChoice;
use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use gym_disorder_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let index = rng.choose_index(14); // [0, 14)
/// assert!(index < 14);
/// # let _ = value;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// A zero seed is replaced by 1 (xorshift cannot leave the zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform index in `[0, len)`
    ///
    /// # Panics
    /// Panics if `len == 0`
    pub fn choose_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot choose from an empty sequence");

        let value = self.next() as u128;
        ((value * len as u128) >> 64) as usize
    }

    /// Current internal state (never zero)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

impl RandomChoice for RngManager {
    fn choose_index(&mut self, len: usize) -> usize {
        RngManager::choose_index(self, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0, "Zero seed should be converted to 1");
    }

    #[test]
    #[should_panic(expected = "cannot choose from an empty sequence")]
    fn test_choose_index_empty() {
        let mut rng = RngManager::new(12345);
        rng.choose_index(0);
    }

    #[test]
    fn test_choose_index_single_element() {
        let mut rng = RngManager::new(777);
        for _ in 0..100 {
            assert_eq!(rng.choose_index(1), 0);
        }
    }

    #[test]
    fn test_choose_index_covers_all_slots() {
        let mut rng = RngManager::new(2024);
        let mut seen = [0usize; 5];

        for _ in 0..5_000 {
            seen[rng.choose_index(5)] += 1;
        }

        // Each slot expects ~1000 hits
        for (slot, count) in seen.iter().enumerate() {
            assert!(
                (800..1200).contains(count),
                "slot {} drawn {} times out of 5000",
                slot,
                count
            );
        }
    }
}
