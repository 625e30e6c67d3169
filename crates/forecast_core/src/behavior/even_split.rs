use super::model::{Alternative, BehaviorModel};
use crate::network::SegmentId;

/// Even split across all alternatives.
///
/// Each alternative receives `displaced / n` passengers; the integer
/// remainder goes to the earliest alternatives so the split always sums to
/// `displaced`. Deterministic and load-blind, useful as a baseline for
/// comparing against capacity-aware models.
#[derive(Debug, Default)]
pub struct EvenSplit;

impl BehaviorModel for EvenSplit {
    fn distribute(&self, displaced: i64, alternatives: &[Alternative]) -> Vec<(SegmentId, i64)> {
        if alternatives.is_empty() {
            return Vec::new();
        }
        let n = alternatives.len() as i64;
        let base = displaced / n;
        let remainder = displaced % n;
        alternatives
            .iter()
            .enumerate()
            .map(|(i, alt)| {
                let extra = if (i as i64) < remainder { 1 } else { 0 };
                (alt.id, base + extra)
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "even_split"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alt(id: u64) -> Alternative {
        Alternative {
            id: SegmentId(id),
            load: 0,
            capacity: 100,
        }
    }

    #[test]
    fn splits_evenly_when_divisible() {
        let shares = EvenSplit.distribute(20, &[alt(1), alt(2)]);
        assert_eq!(shares, vec![(SegmentId(1), 10), (SegmentId(2), 10)]);
    }

    #[test]
    fn remainder_goes_to_earliest_alternatives() {
        let shares = EvenSplit.distribute(5, &[alt(1), alt(2)]);
        assert_eq!(shares, vec![(SegmentId(1), 3), (SegmentId(2), 2)]);
    }

    #[test]
    fn conserves_passengers() {
        for displaced in [0, 1, 7, 19, 100] {
            let shares = EvenSplit.distribute(displaced, &[alt(1), alt(2), alt(3)]);
            let total: i64 = shares.iter().map(|(_, q)| q).sum();
            assert_eq!(total, displaced);
        }
    }

    #[test]
    fn no_alternatives_yields_empty_split() {
        assert!(EvenSplit.distribute(5, &[]).is_empty());
    }
}
