//! Result aggregator: combines scenario results into a single forecast.
//!
//! Aggregation reads the deltas recorded inside each [SimulationResult],
//! never the live ledger, so it is well-defined before, during, or after the
//! results have been applied and reverted. Given the same result set and
//! policy it always produces the same forecast.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;
use crate::network::SegmentId;
use crate::simulation::SimulationResult;

/// How multiple scenario results are combined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombinePolicy {
    /// Unweighted arithmetic mean across results.
    Mean,
    /// Weighted sum: `additional_load = Σ wᵢ·deltaᵢ`. One weight per result,
    /// in result order; probabilities are normalized by the weight total.
    WeightedSum { weights: Vec<f64> },
}

/// Expected additional load on one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub segment_id: SegmentId,
    pub baseline_load: i64,
    pub capacity: i64,
    pub additional_load: f64,
    /// Share of results whose recorded delta pushes this segment past
    /// capacity (weight-normalized under `WeightedSum`).
    pub over_capacity_prob: f64,
}

/// The aggregated, persisted output: expected additional load per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub event_time_ms: u64,
    pub policy: CombinePolicy,
    pub trials: usize,
    pub entries: Vec<ForecastEntry>,
    /// Expected number of passengers with no viable reroute.
    pub expected_stranded: f64,
}

impl Forecast {
    /// Segments whose projected load crosses the capacity threshold in at
    /// least one combined result.
    pub fn over_capacity_segments(&self) -> Vec<SegmentId> {
        self.entries
            .iter()
            .filter(|e| e.over_capacity_prob > 0.0)
            .map(|e| e.segment_id)
            .collect()
    }
}

struct SegmentAccumulator {
    baseline_load: i64,
    capacity: i64,
    weighted_additional: f64,
    weighted_over: f64,
}

/// Combine scenario results into one forecast.
///
/// Results may be in any lifecycle state. Empty-delta (stranded) results are
/// valid inputs and surface in `expected_stranded`.
pub fn aggregate(
    results: &[SimulationResult],
    policy: &CombinePolicy,
) -> Result<Forecast, ForecastError> {
    if results.is_empty() {
        return Err(ForecastError::EmptyResultSet);
    }

    let weights: Vec<f64> = match policy {
        CombinePolicy::Mean => vec![1.0 / results.len() as f64; results.len()],
        CombinePolicy::WeightedSum { weights } => {
            if weights.len() != results.len() {
                return Err(ForecastError::WeightCountMismatch {
                    weights: weights.len(),
                    results: results.len(),
                });
            }
            weights.clone()
        }
    };
    let total_weight: f64 = weights.iter().sum();

    let mut segments: BTreeMap<SegmentId, SegmentAccumulator> = BTreeMap::new();
    let mut weighted_stranded = 0.0;

    for (result, weight) in results.iter().zip(&weights) {
        weighted_stranded += weight * result.stranded() as f64;
        for entry in result.entries() {
            let acc = segments
                .entry(entry.segment)
                .or_insert_with(|| SegmentAccumulator {
                    // First result's snapshot wins when baselines disagree.
                    baseline_load: entry.baseline_load,
                    capacity: entry.capacity,
                    weighted_additional: 0.0,
                    weighted_over: 0.0,
                });
            acc.weighted_additional += weight * entry.additional as f64;
            if entry.over_capacity() {
                acc.weighted_over += weight;
            }
        }
    }

    let entries = segments
        .into_iter()
        .map(|(segment_id, acc)| ForecastEntry {
            segment_id,
            baseline_load: acc.baseline_load,
            capacity: acc.capacity,
            additional_load: acc.weighted_additional,
            over_capacity_prob: if total_weight > 0.0 {
                acc.weighted_over / total_weight
            } else {
                0.0
            },
        })
        .collect();

    Ok(Forecast {
        event_time_ms: results[0].event_time_ms(),
        policy: policy.clone(),
        trials: results.len(),
        entries,
        expected_stranded: weighted_stranded,
    })
}
