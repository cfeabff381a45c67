//! Dispatch loop feeding a load series through a battery, step by step.

use tracing::debug;

use crate::devices::Battery;
use crate::error::Result;
use crate::profile::LoadSeries;

use super::controller::Controller;
use super::types::{StepResult, StepState};

/// Dispatch engine owning the battery and the controller.
///
/// Generic over `C: Controller` for static dispatch. The battery state carries
/// over between calls to [`run`](Engine::run) and is never reset implicitly.
pub struct Engine<C: Controller> {
    battery: Battery,
    controller: C,
}

impl<C: Controller> Engine<C> {
    pub fn new(battery: Battery, controller: C) -> Self {
        Self {
            battery,
            controller,
        }
    }

    /// Executes one step for an interval with average load `load_w`.
    ///
    /// # Errors
    ///
    /// Propagates [`ProfileError::InvalidAmount`](crate::error::ProfileError::InvalidAmount)
    /// if the controller produces a non-finite setpoint.
    pub fn step(&mut self, timestamp: chrono::NaiveDateTime, load_w: f64) -> Result<StepResult> {
        let dt_hours = LoadSeries::step_hours();

        // 1. Snapshot battery constraints
        let state = StepState {
            soc: self.battery.soc(),
            max_charge_kwh: self.battery.max_charge(),
            max_discharge_kwh: self.battery.max_discharge(),
            dt_hours,
        };

        // 2. Controller dispatch
        let setpoint_kwh = self.controller.battery_setpoint_kwh(load_w, &state);

        // 3. Apply to the battery (clamped there)
        let battery_kwh = if setpoint_kwh >= 0.0 {
            self.battery.charge(setpoint_kwh)?
        } else {
            -self.battery.discharge(-setpoint_kwh)?
        };

        // 4. Grid balance: charging adds to import, discharging offsets it
        let battery_w = battery_kwh * 1000.0 / dt_hours;
        let grid_w = load_w + battery_w;

        Ok(StepResult {
            timestamp,
            load_w,
            battery_setpoint_kwh: setpoint_kwh,
            battery_kwh,
            battery_w,
            grid_w,
            soc: self.battery.soc(),
        })
    }

    /// Executes every point of `series` and returns the complete step record vector.
    ///
    /// # Errors
    ///
    /// Same as [`step`](Self::step); the run stops at the first failing step.
    pub fn run(&mut self, series: &LoadSeries) -> Result<Vec<StepResult>> {
        let mut results = Vec::with_capacity(series.len());
        for p in series {
            results.push(self.step(p.timestamp, p.watts)?);
        }
        debug!(
            controller = self.controller.name(),
            steps = results.len(),
            final_soc = self.battery.soc(),
            "dispatch run finished"
        );
        Ok(results)
    }

    /// Returns a reference to the battery (for KPI capacity queries).
    pub fn battery(&self) -> &Battery {
        &self.battery
    }
}
