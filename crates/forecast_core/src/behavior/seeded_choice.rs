use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::model::{Alternative, BehaviorModel};
use crate::network::SegmentId;

/// Stochastic per-passenger choice, weighted by free capacity.
///
/// Each displaced passenger independently picks an alternative with
/// probability proportional to its free capacity (uniform if every
/// alternative is full). The RNG is seeded per model instance, so a given
/// seed always produces the same split; Monte-Carlo trials vary the seed.
#[derive(Debug, Clone, Copy)]
pub struct SeededChoice {
    pub seed: u64,
}

impl SeededChoice {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BehaviorModel for SeededChoice {
    fn distribute(&self, displaced: i64, alternatives: &[Alternative]) -> Vec<(SegmentId, i64)> {
        if alternatives.is_empty() {
            return Vec::new();
        }

        let weights: Vec<i64> = if alternatives.iter().any(|a| a.free_capacity() > 0) {
            alternatives.iter().map(Alternative::free_capacity).collect()
        } else {
            vec![1; alternatives.len()]
        };
        // Weights are non-negative with a positive sum, so this cannot fail.
        let index = WeightedIndex::new(&weights).expect("positive total weight");

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut counts = vec![0_i64; alternatives.len()];
        for _ in 0..displaced {
            counts[index.sample(&mut rng)] += 1;
        }
        alternatives
            .iter()
            .zip(counts)
            .map(|(alt, count)| (alt.id, count))
            .collect()
    }

    fn name(&self) -> &'static str {
        "seeded_choice"
    }
}
