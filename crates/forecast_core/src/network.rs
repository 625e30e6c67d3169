//! Segment ledger: the shared network graph's per-segment load counters.
//!
//! The graph owns its segments; everything else holds `Entity` handles. A
//! despawned segment makes every held handle resolve to `None`, which is how
//! stale references are detected instead of silently reading freed state.

use std::collections::HashMap;

use bevy_ecs::prelude::{Component, Entity, Resource, World};
use serde::{Deserialize, Serialize};

/// Stable external identity of a network segment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SegmentId(pub u64);

/// One traversable leg of the transport network.
///
/// `load` is the live passenger count and is the only field the speculative
/// apply/revert mechanism mutates. `capacity` is the seated+standing limit
/// used for over-capacity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Component)]
pub struct Segment {
    pub id: SegmentId,
    pub load: i64,
    pub capacity: i64,
}

/// Lookup structure over the segment arena.
///
/// Maps stable ids to entities and records, for each segment, which segments
/// are viable reroute targets when it is disrupted. How the graph and the
/// alternatives relation are built is an external concern; the forecast core
/// only reads them.
#[derive(Debug, Default, Resource)]
pub struct NetworkGraph {
    segments: HashMap<SegmentId, Entity>,
    alternatives: HashMap<SegmentId, Vec<SegmentId>>,
}

impl NetworkGraph {
    /// Record a spawned segment entity under its stable id.
    pub fn register(&mut self, id: SegmentId, entity: Entity) {
        self.segments.insert(id, entity);
    }

    /// Forget a segment. The caller is responsible for despawning the entity.
    pub fn unregister(&mut self, id: SegmentId) -> Option<Entity> {
        self.alternatives.remove(&id);
        self.segments.remove(&id)
    }

    /// Declare the reroute targets for a disrupted segment.
    pub fn set_alternatives(&mut self, id: SegmentId, alternatives: Vec<SegmentId>) {
        self.alternatives.insert(id, alternatives);
    }

    /// Resolve a stable id to its entity, if the segment still exists.
    pub fn resolve(&self, id: SegmentId) -> Option<Entity> {
        self.segments.get(&id).copied()
    }

    /// Reroute targets for a disrupted segment. Empty means passengers on
    /// this segment have nowhere to go (stranded).
    pub fn alternatives_of(&self, id: SegmentId) -> &[SegmentId] {
        self.alternatives.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Plain-data description of a network, used to build isolated per-trial
/// worlds and test fixtures. Not a graph-construction facility: it only
/// materializes segments and an alternatives relation that already exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub segments: Vec<SegmentSpec>,
    /// Reroute targets per disrupted segment id.
    pub alternatives: HashMap<u64, Vec<u64>>,
}

/// One segment row of a [`NetworkSpec`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentSpec {
    pub id: u64,
    pub load: i64,
    pub capacity: i64,
}

impl NetworkSpec {
    /// Build a fresh world containing the described segments and a
    /// [`NetworkGraph`] resource over them.
    pub fn build(&self) -> World {
        let mut world = World::new();
        let mut graph = NetworkGraph::default();
        for spec in &self.segments {
            let id = SegmentId(spec.id);
            let entity = world
                .spawn(Segment {
                    id,
                    load: spec.load,
                    capacity: spec.capacity,
                })
                .id();
            graph.register(id, entity);
        }
        for (from, targets) in &self.alternatives {
            graph.set_alternatives(
                SegmentId(*from),
                targets.iter().copied().map(SegmentId).collect(),
            );
        }
        world.insert_resource(graph);
        world
    }
}
