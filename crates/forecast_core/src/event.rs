//! Monitoring events: observed deviations that trigger a forecast.
//!
//! The wire format and transport that deliver these are external concerns;
//! this is the in-memory shape handed to the engine.

use serde::{Deserialize, Serialize};

use crate::network::SegmentId;

/// Kind of observed deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviationKind {
    /// The trip still runs, delayed by the given number of minutes.
    Delay { minutes: u32 },
    /// The trip leg does not run at all.
    Cancellation,
}

/// One affected segment and the number of passengers displaced from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisruptedLeg {
    pub segment: SegmentId,
    pub displaced: i64,
}

/// An observed deviation on one or more segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringEvent {
    pub timestamp_ms: u64,
    pub kind: DeviationKind,
    pub legs: Vec<DisruptedLeg>,
}

impl MonitoringEvent {
    /// Total passengers displaced by this event across all legs.
    pub fn total_displaced(&self) -> i64 {
        self.legs.iter().map(|leg| leg.displaced).sum()
    }
}
