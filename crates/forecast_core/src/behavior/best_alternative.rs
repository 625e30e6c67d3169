use super::model::{Alternative, BehaviorModel};
use crate::network::SegmentId;

/// Deterministic single reroute: everyone boards the alternative with the
/// most free capacity. Ties go to the lowest segment id.
#[derive(Debug, Default)]
pub struct BestAlternative;

impl BehaviorModel for BestAlternative {
    fn distribute(&self, displaced: i64, alternatives: &[Alternative]) -> Vec<(SegmentId, i64)> {
        alternatives
            .iter()
            .max_by(|a, b| {
                a.free_capacity()
                    .cmp(&b.free_capacity())
                    .then(b.id.cmp(&a.id))
            })
            .map(|best| vec![(best.id, displaced)])
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "best_alternative"
    }
}
