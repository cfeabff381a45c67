//! Post-hoc KPI computation from dispatch results.

use std::fmt;

use super::types::StepResult;

/// Aggregate key performance indicators derived from a complete dispatch run.
///
/// Computed post-hoc from `Vec<StepResult>` to ensure consistency between
/// step data and reported metrics.
#[derive(Debug, Clone)]
pub struct KpiReport {
    /// Number of dispatched steps.
    pub steps: usize,
    /// Total load energy (kWh).
    pub load_energy_kwh: f64,
    /// Total grid import energy after the battery (kWh).
    pub grid_energy_kwh: f64,
    /// Peak load (W).
    pub peak_load_w: f64,
    /// Peak grid import after the battery (W).
    pub peak_grid_w: f64,
    /// Peak reduction achieved by the battery (W).
    pub peak_reduction_w: f64,
    /// Total battery energy throughput (kWh, sum of |energy|).
    pub battery_throughput_kwh: f64,
    /// Battery equivalent full cycles (throughput / 2*capacity).
    pub battery_equivalent_full_cycles: f64,
    /// State of charge after the last step.
    pub final_soc: f64,
}

impl KpiReport {
    /// Computes all KPIs from the complete step record vector.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete dispatch step results
    /// * `dt_hours` - Step duration in hours
    /// * `battery_capacity_kwh` - Battery capacity for cycle calculation
    pub fn from_results(results: &[StepResult], dt_hours: f64, battery_capacity_kwh: f64) -> Self {
        let Some(last) = results.last() else {
            return Self {
                steps: 0,
                load_energy_kwh: 0.0,
                grid_energy_kwh: 0.0,
                peak_load_w: 0.0,
                peak_grid_w: 0.0,
                peak_reduction_w: 0.0,
                battery_throughput_kwh: 0.0,
                battery_equivalent_full_cycles: 0.0,
                final_soc: 0.0,
            };
        };

        let mut load_wh = 0.0_f64;
        let mut grid_wh = 0.0_f64;
        let mut peak_load = f64::MIN;
        let mut peak_grid = f64::MIN;
        let mut throughput = 0.0_f64;

        for r in results {
            load_wh += r.load_w * dt_hours;
            grid_wh += r.grid_w * dt_hours;
            peak_load = peak_load.max(r.load_w);
            peak_grid = peak_grid.max(r.grid_w);
            throughput += r.battery_kwh.abs();
        }

        let cycles = if battery_capacity_kwh > 0.0 {
            throughput / (2.0 * battery_capacity_kwh)
        } else {
            0.0
        };

        Self {
            steps: results.len(),
            load_energy_kwh: load_wh / 1000.0,
            grid_energy_kwh: grid_wh / 1000.0,
            peak_load_w: peak_load,
            peak_grid_w: peak_grid,
            peak_reduction_w: peak_load - peak_grid,
            battery_throughput_kwh: throughput,
            battery_equivalent_full_cycles: cycles,
            final_soc: last.soc,
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== KPI Report ===")?;
        writeln!(f, "Steps:                  {}", self.steps)?;
        writeln!(f, "Load energy:            {:.2} kWh", self.load_energy_kwh)?;
        writeln!(f, "Grid energy:            {:.2} kWh", self.grid_energy_kwh)?;
        writeln!(f, "Peak load:              {:.1} W", self.peak_load_w)?;
        writeln!(f, "Peak grid import:       {:.1} W", self.peak_grid_w)?;
        writeln!(f, "Peak reduction:         {:.1} W", self.peak_reduction_w)?;
        writeln!(
            f,
            "Battery throughput:     {:.2} kWh",
            self.battery_throughput_kwh
        )?;
        writeln!(
            f,
            "Equivalent full cycles: {:.2}",
            self.battery_equivalent_full_cycles
        )?;
        write!(f, "Final SoC:              {:.1} %", self.final_soc * 100.0)
    }
}
