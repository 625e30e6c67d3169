use std::fmt;

use crate::network::SegmentId;

/// Errors surfaced by scenario evaluation.
///
/// Protocol violations (`AlreadyApplied`, `NotApplied`, `AlreadyReverted`)
/// indicate a bug in the calling sequence, not a runtime condition; they are
/// returned rather than silently ignored so ledger corruption is never masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// A scenario references a segment no longer present in the network graph.
    UnknownSegment(SegmentId),
    /// `apply` was called on a result that is not in the `Computed` state.
    AlreadyApplied,
    /// `revert` was called on a result that was never applied.
    NotApplied,
    /// `revert` was called twice on the same result.
    AlreadyReverted,
    /// `aggregate` was called with no results.
    EmptyResultSet,
    /// A weighted combine policy was given a weight per-result count mismatch.
    WeightCountMismatch { weights: usize, results: usize },
    /// Appending a forecast to the log sink failed.
    LogWrite(String),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::UnknownSegment(id) => {
                write!(f, "segment {} is not present in the network graph", id.0)
            }
            ForecastError::AlreadyApplied => {
                write!(f, "simulation result has already been applied")
            }
            ForecastError::NotApplied => {
                write!(f, "simulation result was never applied")
            }
            ForecastError::AlreadyReverted => {
                write!(f, "simulation result has already been reverted")
            }
            ForecastError::EmptyResultSet => {
                write!(f, "cannot aggregate an empty result set")
            }
            ForecastError::WeightCountMismatch { weights, results } => {
                write!(f, "{weights} weights given for {results} results")
            }
            ForecastError::LogWrite(msg) => {
                write!(f, "failed to append forecast to log: {msg}")
            }
        }
    }
}

impl std::error::Error for ForecastError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_segment() {
        let err = ForecastError::UnknownSegment(SegmentId(42));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn display_reports_weight_mismatch_counts() {
        let err = ForecastError::WeightCountMismatch {
            weights: 2,
            results: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('2') && msg.contains('3'));
    }
}
