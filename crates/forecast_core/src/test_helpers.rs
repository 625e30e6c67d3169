//! Test helpers for common test setup and utilities.
//!
//! Provides a small canned network shared across test modules: disrupted
//! segment A with two alternatives B and C, plus an isolated segment with no
//! reroute targets.

use std::collections::HashMap;

use bevy_ecs::prelude::World;

use crate::event::{DeviationKind, DisruptedLeg, MonitoringEvent};
use crate::network::{NetworkGraph, NetworkSpec, Segment, SegmentId, SegmentSpec};

/// The disrupted segment: baseline load 100.
pub const SEG_A: SegmentId = SegmentId(1);
/// First alternative: load 20, capacity 200 (plenty of room).
pub const SEG_B: SegmentId = SegmentId(2);
/// Second alternative: load 55, capacity 60 (nearly full).
pub const SEG_C: SegmentId = SegmentId(3);
/// A segment with no alternatives; its passengers strand.
pub const SEG_ISOLATED: SegmentId = SegmentId(9);

/// Fixed event timestamp used across tests.
pub const EVENT_TS: u64 = 1_700_000_000_000;

/// The canned network as a plain-data spec.
pub fn test_network() -> NetworkSpec {
    NetworkSpec {
        segments: vec![
            SegmentSpec {
                id: SEG_A.0,
                load: 100,
                capacity: 140,
            },
            SegmentSpec {
                id: SEG_B.0,
                load: 20,
                capacity: 200,
            },
            SegmentSpec {
                id: SEG_C.0,
                load: 55,
                capacity: 60,
            },
            SegmentSpec {
                id: SEG_ISOLATED.0,
                load: 10,
                capacity: 50,
            },
        ],
        alternatives: HashMap::from([(SEG_A.0, vec![SEG_B.0, SEG_C.0])]),
    }
}

/// Build a world over the canned network.
pub fn test_world() -> World {
    test_network().build()
}

/// A cancellation event displacing `displaced` passengers from one segment.
pub fn disruption_on(segment: SegmentId, displaced: i64) -> MonitoringEvent {
    MonitoringEvent {
        timestamp_ms: EVENT_TS,
        kind: DeviationKind::Cancellation,
        legs: vec![DisruptedLeg { segment, displaced }],
    }
}

/// Current live load of a segment.
///
/// # Panics
///
/// Panics if the segment does not exist; tests use this only on segments the
/// canned network contains.
pub fn load_of(world: &World, id: SegmentId) -> i64 {
    let entity = world
        .resource::<NetworkGraph>()
        .resolve(id)
        .expect("segment should exist in the test network");
    world
        .get::<Segment>(entity)
        .expect("segment entity should be alive")
        .load
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_network_has_expected_shape() {
        let world = test_world();
        let graph = world.resource::<NetworkGraph>();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.alternatives_of(SEG_A), &[SEG_B, SEG_C]);
        assert!(graph.alternatives_of(SEG_ISOLATED).is_empty());
        assert_eq!(load_of(&world, SEG_A), 100);
    }
}
