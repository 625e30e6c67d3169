//! Event handler: the single-method capability that turns one monitoring
//! event into a persisted forecast.
//!
//! One scenario is trialed per behavior model: simulate, apply the deltas to
//! the live ledger, observe the cascading over-capacity effects, revert. The
//! ledger is restored before the next model runs, so every scenario sees the
//! same baseline. Whatever transport delivers events calls [ForecastHandler::handle].

use bevy_ecs::prelude::World;

use crate::aggregate::{aggregate, CombinePolicy, Forecast};
use crate::behavior::BehaviorModel;
use crate::error::ForecastError;
use crate::event::MonitoringEvent;
use crate::output::ForecastLog;
use crate::simulation::{simulate, SimulationResult};
use crate::speculate::{apply, revert};

pub struct ForecastHandler {
    models: Vec<Box<dyn BehaviorModel>>,
    policy: CombinePolicy,
    log: Option<ForecastLog>,
}

impl ForecastHandler {
    pub fn new(models: Vec<Box<dyn BehaviorModel>>, policy: CombinePolicy) -> Self {
        Self {
            models,
            policy,
            log: None,
        }
    }

    /// Attach a forecast log; every successful `handle` appends one record.
    pub fn with_log(mut self, log: ForecastLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Process one monitoring event and return the aggregated forecast.
    ///
    /// Every scenario is fully reverted before this returns, on success and
    /// on error alike: simulate validates before anything is applied, and
    /// apply validates before mutating, so a failing evaluation leaves the
    /// ledger untouched for subsequent events.
    pub fn handle(
        &mut self,
        world: &mut World,
        event: &MonitoringEvent,
    ) -> Result<Forecast, ForecastError> {
        let mut results: Vec<SimulationResult> = Vec::with_capacity(self.models.len());
        for model in &self.models {
            let mut result = simulate(world, event, model.as_ref())?;
            apply(world, &mut result)?;
            // Live state is visible here; downstream effects are captured in
            // the recorded snapshot via projected_over_capacity().
            revert(world, &mut result)?;
            results.push(result);
        }

        let forecast = aggregate(&results, &self.policy)?;
        if let Some(log) = &mut self.log {
            log.append(&forecast)
                .map_err(|err| ForecastError::LogWrite(err.to_string()))?;
        }
        Ok(forecast)
    }
}
