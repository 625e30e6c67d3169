use crate::network::SegmentId;

/// Read-only snapshot of one reroute target, taken at simulation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alternative {
    pub id: SegmentId,
    pub load: i64,
    pub capacity: i64,
}

impl Alternative {
    /// Seats still available before the segment exceeds capacity. Never
    /// negative; an already-overfull segment has zero free capacity.
    pub fn free_capacity(&self) -> i64 {
        (self.capacity - self.load).max(0)
    }
}

/// Trait for passenger behavior models.
///
/// A behavior model decides how the passengers displaced from a disrupted
/// segment choose among the viable alternatives. Different models encode
/// different assumptions (even spread, capacity-seeking, single reroute,
/// stochastic choice); the engine treats them interchangeably.
///
/// # Contract
///
/// * When `alternatives` is non-empty, the returned quantities must sum to
///   exactly `displaced`: passengers are relocated, never created or
///   destroyed. This is the conservation property the engine asserts.
/// * When `alternatives` is empty, the model must return an empty vector;
///   the engine records those passengers as stranded.
/// * Each alternative appears at most once in the output. Zero quantities
///   are permitted and dropped by the engine.
pub trait BehaviorModel: Send + Sync {
    fn distribute(&self, displaced: i64, alternatives: &[Alternative]) -> Vec<(SegmentId, i64)>;

    /// Human-readable model name, recorded in diagnostics and tests.
    fn name(&self) -> &'static str;
}
