use super::types::StepState;

/// Decides how much energy the battery should move in one step.
pub trait Controller {
    /// Returns the requested battery energy for a step with average load `load_w`.
    ///
    /// Positive values ask for charging, negative for discharging (kWh).
    fn battery_setpoint_kwh(&self, load_w: f64, state: &StepState) -> f64;

    fn name(&self) -> &'static str;
}

/// Leaves the battery untouched; yields the no-battery baseline.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleController;

impl Controller for IdleController {
    fn battery_setpoint_kwh(&self, _load_w: f64, _state: &StepState) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "idle"
    }
}

/// Peak-shaving controller.
///
/// Discharges whatever load exceeds the threshold and recharges from the grid
/// with the headroom below it, so grid import stays at the threshold while
/// the battery allows.
#[derive(Debug, Clone, Copy)]
pub struct PeakShavingController {
    /// Grid import the controller tries not to exceed (W).
    pub threshold_w: f64,
}

impl PeakShavingController {
    pub fn new(threshold_w: f64) -> Self {
        Self { threshold_w }
    }
}

impl Controller for PeakShavingController {
    fn battery_setpoint_kwh(&self, load_w: f64, state: &StepState) -> f64 {
        // kWh = W * h / 1000
        let gap_kwh = (self.threshold_w - load_w) * state.dt_hours / 1000.0;
        if gap_kwh >= 0.0 {
            gap_kwh.min(state.max_charge_kwh)
        } else {
            gap_kwh.max(-state.max_discharge_kwh)
        }
    }

    fn name(&self) -> &'static str {
        "peak_shaving"
    }
}
