//! Core dispatch types: battery state snapshots and per-step records.

use std::fmt;

use chrono::NaiveDateTime;

/// Battery constraints available to the controller at one step.
#[derive(Debug, Clone)]
pub struct StepState {
    /// State of charge before the step (0.0 to 1.0).
    pub soc: f64,
    /// Energy the battery can still absorb this step (kWh).
    pub max_charge_kwh: f64,
    /// Energy the battery can still deliver this step (kWh).
    pub max_discharge_kwh: f64,
    /// Step length in hours.
    pub dt_hours: f64,
}

/// Complete record of one dispatch step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// End of the quarter-hour interval.
    pub timestamp: NaiveDateTime,
    /// Load of the interval (W).
    pub load_w: f64,
    /// Energy requested by the controller (kWh; positive=charge, negative=discharge).
    pub battery_setpoint_kwh: f64,
    /// Energy actually moved (kWh; positive=charge, negative=discharge).
    pub battery_kwh: f64,
    /// Average battery power over the step (W; positive=charge).
    pub battery_w: f64,
    /// Grid import after the battery (W).
    pub grid_w: f64,
    /// State of charge after the step.
    pub soc: f64,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | load={:>8.1} W  grid={:>8.1} W | bat={:>8.1} W (req={:.4} kWh, SoC={:.1}%)",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.load_w,
            self.grid_w,
            self.battery_w,
            self.battery_setpoint_kwh,
            self.soc * 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn step_result_display_does_not_panic() {
        let r = StepResult {
            timestamp: NaiveDate::from_ymd_opt(2015, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 15, 0))
                .expect("valid timestamp"),
            load_w: 250.0,
            battery_setpoint_kwh: -0.05,
            battery_kwh: -0.05,
            battery_w: -200.0,
            grid_w: 50.0,
            soc: 0.48,
        };
        let s = format!("{r}");
        assert!(s.starts_with("2015-01-01 00:15"));
    }
}
