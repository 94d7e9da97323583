//! Actor behaviour
//!
//! A gym-goer picks up one dumbbell and puts it back. The behaviour decides
//! where it goes back:
//!
//! - **Organized**: its own bucket, unless that bucket is already full, in
//!   which case a random bucket.
//! - **Disorganized**: always a random bucket.
//!
//! Actors carry no state between actions.

use crate::models::rack::{RackError, RackState, WeightId};
use crate::rng::RandomChoice;
use serde::{Deserialize, Serialize};

/// Return policy applied to a single action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorBehavior {
    Organized,
    Disorganized,
}

/// What happened during one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Bucket the unit was taken from
    pub taken_from: WeightId,
    /// Label of the unit that was taken
    pub label: WeightId,
    /// Bucket the unit ended up in
    pub placed_in: WeightId,
    /// True when the unit went back to its own bucket by the organized rule
    pub placed_correctly: bool,
}

impl ActorBehavior {
    /// Perform one take-and-return action against `rack`
    ///
    /// # Example
    ///
    /// ```rust
    /// use gym_disorder_core::{ActorBehavior, RackConfig, RackState, RngManager};
    ///
    /// let mut rack = RackState::new(&RackConfig::new([(10, 1)]));
    /// let mut rng = RngManager::new(1);
    ///
    /// let outcome = ActorBehavior::Organized.act(&mut rack, &mut rng).unwrap();
    /// assert!(outcome.placed_correctly);
    /// assert_eq!(rack.disorder_score(), 0);
    /// ```
    pub fn act<R>(self, rack: &mut RackState, rng: &mut R) -> Result<ActionOutcome, RackError>
    where
        R: RandomChoice + ?Sized,
    {
        let taken_from = rack.select_available_class(rng)?;
        let label = rack.take_one(taken_from)?;

        let (placed_in, placed_correctly) = match self {
            ActorBehavior::Organized => {
                if rack.return_to_correct_place(label)? {
                    (label, true)
                } else {
                    (rack.return_to_random_place(label, rng)?, false)
                }
            }
            ActorBehavior::Disorganized => (rack.return_to_random_place(label, rng)?, false),
        };

        Ok(ActionOutcome {
            taken_from,
            label,
            placed_in,
            placed_correctly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rack::RackConfig;

    struct Scripted(Vec<usize>);

    impl RandomChoice for Scripted {
        fn choose_index(&mut self, len: usize) -> usize {
            let next = self.0.remove(0);
            assert!(next < len);
            next
        }
    }

    #[test]
    fn test_organized_returns_to_own_bucket() {
        let mut rack = RackState::new(&RackConfig::new([(10, 2), (12, 2)]));

        let outcome = ActorBehavior::Organized
            .act(&mut rack, &mut Scripted(vec![1]))
            .unwrap();

        assert_eq!(outcome.taken_from, 12);
        assert_eq!(outcome.placed_in, 12);
        assert!(outcome.placed_correctly);
        assert_eq!(rack.disorder_score(), 0);
    }

    #[test]
    fn test_organized_puts_misplaced_unit_home() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));
        // Move the 12 onto the 10 bucket: 10 -> [10, 12], 12 -> []
        let label = rack.take_one(12).unwrap();
        rack.return_to_random_place(label, &mut Scripted(vec![0]))
            .unwrap();
        assert_eq!(rack.disorder_score(), 1);

        // Only bucket 10 is available; its top is the 12, whose bucket has room
        let outcome = ActorBehavior::Organized
            .act(&mut rack, &mut Scripted(vec![0]))
            .unwrap();

        assert_eq!(outcome.taken_from, 10);
        assert_eq!(outcome.label, 12);
        assert_eq!(outcome.placed_in, 12);
        assert!(outcome.placed_correctly);
        assert_eq!(rack.disorder_score(), 0);
    }

    #[test]
    fn test_organized_random_fallback() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));
        // Swap the two units by hand
        let twelve = rack.take_one(12).unwrap();
        rack.return_to_random_place(twelve, &mut Scripted(vec![0]))
            .unwrap();
        // 10 -> [10, 12], 12 -> []
        let twelve = rack.take_one(10).unwrap();
        let ten = rack.take_one(10).unwrap();
        rack.return_to_random_place(ten, &mut Scripted(vec![1]))
            .unwrap();
        rack.return_to_random_place(twelve, &mut Scripted(vec![0]))
            .unwrap();
        // 10 -> [12], 12 -> [10]
        assert_eq!(rack.disorder_score(), 2);

        // Actor takes the 10 from bucket 12; bucket 10 holds one unit already
        // (the 12) so it is full and the 10 must go to a random bucket.
        let outcome = ActorBehavior::Organized
            .act(&mut rack, &mut Scripted(vec![1, 1]))
            .unwrap();
        assert_eq!(outcome.label, 10);
        assert!(!outcome.placed_correctly);
        assert_eq!(outcome.placed_in, 12);
        assert_eq!(rack.disorder_score(), 2);
    }

    #[test]
    fn test_disorganized_always_random() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));

        let outcome = ActorBehavior::Disorganized
            .act(&mut rack, &mut Scripted(vec![0, 1]))
            .unwrap();

        assert_eq!(outcome.label, 10);
        assert_eq!(outcome.placed_in, 12);
        assert!(!outcome.placed_correctly);
        // 10 -> [], 12 -> [12, 10]: one unit out of place
        assert_eq!(rack.disorder_score(), 1);
        assert_eq!(rack.total_units(), 2);
    }

    #[test]
    fn test_disorganized_can_land_home_by_chance() {
        let mut rack = RackState::new(&RackConfig::new([(10, 1), (12, 1)]));

        let outcome = ActorBehavior::Disorganized
            .act(&mut rack, &mut Scripted(vec![0, 0]))
            .unwrap();

        assert_eq!(outcome.placed_in, 10);
        assert!(!outcome.placed_correctly);
        assert_eq!(rack.disorder_score(), 0);
    }
}
