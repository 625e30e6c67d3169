use super::even_split::EvenSplit;
use super::model::{Alternative, BehaviorModel};
use crate::network::SegmentId;

/// Split proportional to free capacity.
///
/// Alternatives with more free seats absorb more of the displaced passengers.
/// Integer shares are assigned by largest-remainder apportionment, so the
/// split always sums to `displaced`. When no alternative has free capacity
/// the model falls back to an even split: passengers still board something.
#[derive(Debug, Default)]
pub struct CapacityWeighted;

impl BehaviorModel for CapacityWeighted {
    fn distribute(&self, displaced: i64, alternatives: &[Alternative]) -> Vec<(SegmentId, i64)> {
        if alternatives.is_empty() {
            return Vec::new();
        }
        let total_free: i64 = alternatives.iter().map(Alternative::free_capacity).sum();
        if total_free == 0 {
            return EvenSplit.distribute(displaced, alternatives);
        }

        // Largest-remainder apportionment over free capacity.
        let mut shares: Vec<(SegmentId, i64)> = Vec::with_capacity(alternatives.len());
        let mut remainders: Vec<(usize, i64)> = Vec::with_capacity(alternatives.len());
        let mut assigned = 0;
        for (i, alt) in alternatives.iter().enumerate() {
            let numerator = displaced * alt.free_capacity();
            let share = numerator / total_free;
            shares.push((alt.id, share));
            remainders.push((i, numerator % total_free));
            assigned += share;
        }

        let mut leftover = displaced - assigned;
        // Largest remainder first; ties broken by position for determinism.
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        for (i, _) in remainders {
            if leftover == 0 {
                break;
            }
            shares[i].1 += 1;
            leftover -= 1;
        }
        shares
    }

    fn name(&self) -> &'static str {
        "capacity_weighted"
    }
}
