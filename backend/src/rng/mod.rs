//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. All randomness in a trial goes through
//! the [`RandomChoice`] capability, so tests can substitute scripted choices
//! and each trial can own an independent, seeded stream.

mod xorshift;

pub use xorshift::RngManager;

/// Uniform choice from a non-empty ordered sequence
///
/// The only randomness the rack model needs: "pick one of these `len`
/// things". Implementations must return a value in `[0, len)`.
pub trait RandomChoice {
    /// Uniform index in `[0, len)`. `len` is always > 0.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<R: RandomChoice + ?Sized> RandomChoice for &mut R {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

/// Derive the seed of stream `index` from a master seed (splitmix64)
///
/// Distinct indices give well-separated seeds, so per-trial generators are
/// independent of each other and of execution order.
///
/// # Example
/// ```
/// use gym_disorder_core::rng::trial_seed;
///
/// assert_eq!(trial_seed(42, 7), trial_seed(42, 7));
/// assert_ne!(trial_seed(42, 7), trial_seed(42, 8));
/// ```
pub fn trial_seed(master_seed: u64, index: usize) -> u64 {
    let mut z = master_seed
        .wrapping_add((index as u64).wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
