//! Monte-Carlo trial execution.
//!
//! Each trial evaluates the same monitoring event under a differently seeded
//! stochastic behavior model. Trials get their own world built from the
//! shared [NetworkSpec], so they share no mutable state and run in parallel
//! without coordination; the per-world apply/revert cycle still runs in full
//! so each trial exercises the same path as live evaluation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use forecast_core::aggregate::{aggregate, CombinePolicy, Forecast};
use forecast_core::behavior::SeededChoice;
use forecast_core::error::ForecastError;
use forecast_core::event::MonitoringEvent;
use forecast_core::network::NetworkSpec;
use forecast_core::simulation::{simulate, SimulationResult};
use forecast_core::speculate::{apply, revert};

/// Plan for a batch of trials: one trial per seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialPlan {
    pub seeds: Vec<u64>,
    pub policy: CombinePolicy,
}

impl TrialPlan {
    /// Mean-combined plan over sequential seeds starting at `first_seed`.
    pub fn mean(first_seed: u64, trials: usize) -> Self {
        Self {
            seeds: (first_seed..first_seed + trials as u64).collect(),
            policy: CombinePolicy::Mean,
        }
    }
}

/// Run all trials in the plan and aggregate them into one forecast.
///
/// Deterministic: the same spec, event, and plan always produce the same
/// forecast, regardless of how rayon schedules the trials (results are
/// collected in seed order).
pub fn run_trials(
    spec: &NetworkSpec,
    event: &MonitoringEvent,
    plan: &TrialPlan,
) -> Result<Forecast, ForecastError> {
    let results: Result<Vec<SimulationResult>, ForecastError> = plan
        .seeds
        .par_iter()
        .map(|seed| run_one_trial(spec, event, *seed))
        .collect();
    aggregate(&results?, &plan.policy)
}

fn run_one_trial(
    spec: &NetworkSpec,
    event: &MonitoringEvent,
    seed: u64,
) -> Result<SimulationResult, ForecastError> {
    let mut world = spec.build();
    let model = SeededChoice::new(seed);
    let mut result = simulate(&world, event, &model)?;
    apply(&mut world, &mut result)?;
    revert(&mut world, &mut result)?;
    Ok(result)
}
