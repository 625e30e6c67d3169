//! Simulation engine: computes per-segment load deltas for one scenario.
//!
//! `simulate` is pure with respect to the segment ledger. It resolves the
//! disrupted legs, snapshots their alternatives, asks the behavior model how
//! the displaced passengers redistribute, and packages the result. Nothing is
//! written to the ledger until [crate::speculate::apply] runs.

use std::collections::BTreeMap;

use bevy_ecs::prelude::{Entity, World};

use crate::behavior::{Alternative, BehaviorModel};
use crate::error::ForecastError;
use crate::event::MonitoringEvent;
use crate::network::{NetworkGraph, Segment, SegmentId};

/// Lifecycle of one scenario result against the live ledger.
///
/// Transitions are one-directional and each occurs at most once:
/// `Computed` → `Applied` → `Reverted`. A reverted result is spent; trying a
/// scenario again means simulating again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
    Computed,
    Applied,
    Reverted,
}

/// One (segment, additional passengers) pair of a scenario delta.
///
/// Baseline load and capacity are snapshotted at simulate time so aggregation
/// stays well-defined after the deltas have been reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaEntry {
    pub segment: SegmentId,
    pub(crate) entity: Entity,
    pub baseline_load: i64,
    pub capacity: i64,
    pub additional: i64,
}

impl DeltaEntry {
    /// Whether this scenario alone pushes the segment past capacity.
    pub fn over_capacity(&self) -> bool {
        self.baseline_load + self.additional > self.capacity
    }
}

/// The record of one scenario's effect: a scenario delta plus its
/// apply/revert lifecycle state.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub(crate) entries: Vec<DeltaEntry>,
    pub(crate) state: ResultState,
    stranded: i64,
    displaced: i64,
    event_time_ms: u64,
}

impl SimulationResult {
    /// Delta entries, unique per segment, sorted by segment id.
    pub fn entries(&self) -> &[DeltaEntry] {
        &self.entries
    }

    pub fn state(&self) -> ResultState {
        self.state
    }

    /// Passengers with no viable alternative. An all-stranded result has an
    /// empty delta; that is a valid forecast, not an error.
    pub fn stranded(&self) -> i64 {
        self.stranded
    }

    /// Total passengers displaced by the originating event.
    pub fn displaced(&self) -> i64 {
        self.displaced
    }

    pub fn event_time_ms(&self) -> u64 {
        self.event_time_ms
    }

    /// Sum of all deltas. Equals `displaced() - stranded()`.
    pub fn total_additional(&self) -> i64 {
        self.entries.iter().map(|e| e.additional).sum()
    }

    /// Segments this scenario pushes past capacity, judged from the recorded
    /// snapshot (valid in any lifecycle state).
    pub fn projected_over_capacity(&self) -> Vec<SegmentId> {
        self.entries
            .iter()
            .filter(|e| e.over_capacity())
            .map(|e| e.segment)
            .collect()
    }
}

/// Compute one scenario: how the passengers displaced by `event` redistribute
/// under `model`.
///
/// Fails with [ForecastError::UnknownSegment] if any disrupted leg or any of
/// its alternatives no longer resolves in the graph; in that case the event
/// is unprocessable and nothing has been touched. Legs with no alternatives
/// contribute stranded passengers instead of deltas.
pub fn simulate(
    world: &World,
    event: &MonitoringEvent,
    model: &dyn BehaviorModel,
) -> Result<SimulationResult, ForecastError> {
    let graph = world.resource::<NetworkGraph>();

    let mut merged: BTreeMap<SegmentId, i64> = BTreeMap::new();
    let mut stranded = 0;

    for leg in &event.legs {
        debug_assert!(leg.displaced >= 0, "displaced passenger counts are non-negative");
        // The disrupted leg itself must resolve even though it receives no
        // delta; a stale reference makes the whole event unprocessable.
        resolve_segment(world, graph, leg.segment)?;

        let alternative_ids = graph.alternatives_of(leg.segment);
        if alternative_ids.is_empty() {
            stranded += leg.displaced;
            continue;
        }

        let mut alternatives = Vec::with_capacity(alternative_ids.len());
        for id in alternative_ids {
            let (_, segment) = resolve_segment(world, graph, *id)?;
            alternatives.push(Alternative {
                id: *id,
                load: segment.load,
                capacity: segment.capacity,
            });
        }

        let shares = model.distribute(leg.displaced, &alternatives);
        debug_assert_eq!(
            shares.iter().map(|(_, q)| q).sum::<i64>(),
            leg.displaced,
            "behavior model must conserve passengers"
        );
        for (id, quantity) in shares {
            *merged.entry(id).or_insert(0) += quantity;
        }
    }

    let mut entries = Vec::with_capacity(merged.len());
    for (id, additional) in merged {
        if additional == 0 {
            continue;
        }
        let (entity, segment) = resolve_segment(world, graph, id)?;
        entries.push(DeltaEntry {
            segment: id,
            entity,
            baseline_load: segment.load,
            capacity: segment.capacity,
            additional,
        });
    }

    Ok(SimulationResult {
        entries,
        state: ResultState::Computed,
        stranded,
        displaced: event.total_displaced(),
        event_time_ms: event.timestamp_ms,
    })
}

fn resolve_segment(
    world: &World,
    graph: &NetworkGraph,
    id: SegmentId,
) -> Result<(Entity, Segment), ForecastError> {
    let entity = graph.resolve(id).ok_or(ForecastError::UnknownSegment(id))?;
    let segment = world
        .get::<Segment>(entity)
        .ok_or(ForecastError::UnknownSegment(id))?;
    Ok((entity, *segment))
}
