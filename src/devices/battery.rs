use crate::error::{ProfileError, Result};

/// Bookkeeping resolution: energy is tracked in whole millionths of a kWh (mWh).
const UNITS_PER_KWH: f64 = 1_000_000.0;

/// Largest capacity or limit accepted by [`Battery::new`] (kWh).
pub const MAX_KWH: f64 = 1.0e9;

/// A lossless energy store with per-step charge and discharge limits.
///
/// `Battery` tracks its stored energy and clamps every request to what the
/// limits and the remaining headroom allow. The stored energy is only changed
/// through [`charge`](Battery::charge) and [`discharge`](Battery::discharge), which
/// keeps it within `0..=capacity_kwh`.
///
/// Energies are held as integer mWh, so a charge followed by a discharge of the
/// returned amount restores the previous state exactly. Requests are rounded to
/// the nearest mWh.
///
/// The step length is up to the caller: the limits are energies per step.
///
/// # Examples
///
/// ```
/// use slp_sim::devices::Battery;
///
/// let mut battery = Battery::new(1000.0, 200.0, 200.0, 0.0).unwrap();
/// assert_eq!(battery.charge(500.0).unwrap(), 200.0);
/// assert_eq!(battery.current_kwh(), 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battery {
    capacity: i64,
    charge_limit: i64,
    discharge_limit: i64,
    current: i64,
}

impl Battery {
    /// Creates a new battery.
    ///
    /// # Arguments
    ///
    /// * `capacity_kwh` - Usable capacity (must be > 0)
    /// * `charge_limit_kwh` - Per-step charge ceiling (must be >= 0)
    /// * `discharge_limit_kwh` - Per-step discharge ceiling (must be >= 0)
    /// * `initial_kwh` - Initial stored energy (within `0..=capacity_kwh`)
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidBattery`] if any parameter is out of range,
    /// not finite, or above [`MAX_KWH`].
    pub fn new(
        capacity_kwh: f64,
        charge_limit_kwh: f64,
        discharge_limit_kwh: f64,
        initial_kwh: f64,
    ) -> Result<Self> {
        let capacity = parameter_units("capacity", capacity_kwh)?;
        if capacity == 0 {
            return Err(ProfileError::InvalidBattery(format!(
                "capacity {capacity_kwh} kWh must be > 0"
            )));
        }
        let charge_limit = parameter_units("charge limit", charge_limit_kwh)?;
        let discharge_limit = parameter_units("discharge limit", discharge_limit_kwh)?;
        let current = parameter_units("initial charge", initial_kwh)?;
        if current > capacity {
            return Err(ProfileError::InvalidBattery(format!(
                "initial charge {initial_kwh} kWh must be within 0..={capacity_kwh}"
            )));
        }

        Ok(Self {
            capacity,
            charge_limit,
            discharge_limit,
            current,
        })
    }

    /// Usable capacity (kWh).
    pub fn capacity_kwh(&self) -> f64 {
        to_kwh(self.capacity)
    }

    /// Maximum energy accepted in a single step (kWh).
    pub fn charge_limit_kwh(&self) -> f64 {
        to_kwh(self.charge_limit)
    }

    /// Maximum energy delivered in a single step (kWh).
    pub fn discharge_limit_kwh(&self) -> f64 {
        to_kwh(self.discharge_limit)
    }

    pub fn current_kwh(&self) -> f64 {
        to_kwh(self.current)
    }

    /// State of charge as a fraction in `0.0..=1.0`.
    pub fn soc(&self) -> f64 {
        self.current as f64 / self.capacity as f64
    }

    /// Largest charge the next step can absorb.
    pub fn max_charge(&self) -> f64 {
        to_kwh(self.charge_headroom())
    }

    /// Largest discharge the next step can deliver.
    pub fn max_discharge(&self) -> f64 {
        to_kwh(self.discharge_headroom())
    }

    /// Charges by up to `amount_kwh` and returns the energy actually stored.
    ///
    /// Requests above [`max_charge`](Self::max_charge) are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidAmount`] for a negative or non-finite amount;
    /// the state is left untouched.
    pub fn charge(&mut self, amount_kwh: f64) -> Result<f64> {
        let requested = amount_units("charge", amount_kwh)?;
        let actual = requested.min(self.charge_headroom());
        self.current += actual;
        Ok(to_kwh(actual))
    }

    /// Discharges by up to `amount_kwh` and returns the energy actually delivered.
    ///
    /// Requests above [`max_discharge`](Self::max_discharge) are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidAmount`] for a negative or non-finite amount;
    /// the state is left untouched.
    pub fn discharge(&mut self, amount_kwh: f64) -> Result<f64> {
        let requested = amount_units("discharge", amount_kwh)?;
        let actual = requested.min(self.discharge_headroom());
        self.current -= actual;
        Ok(to_kwh(actual))
    }

    fn charge_headroom(&self) -> i64 {
        self.charge_limit.min(self.capacity - self.current).max(0)
    }

    fn discharge_headroom(&self) -> i64 {
        self.discharge_limit.min(self.current).max(0)
    }
}

/// The 1000 kWh store with 200 kWh per-step limits, starting empty.
impl Default for Battery {
    fn default() -> Self {
        Self {
            capacity: 1000 * UNITS_PER_KWH as i64,
            charge_limit: 200 * UNITS_PER_KWH as i64,
            discharge_limit: 200 * UNITS_PER_KWH as i64,
            current: 0,
        }
    }
}

fn to_kwh(units: i64) -> f64 {
    units as f64 / UNITS_PER_KWH
}

/// Rounds to whole units; callers have checked `kwh` is finite and non-negative.
fn to_units(kwh: f64) -> i64 {
    // saturating cast
    (kwh * UNITS_PER_KWH).round() as i64
}

fn parameter_units(name: &str, kwh: f64) -> Result<i64> {
    if !(kwh.is_finite() && (0.0..=MAX_KWH).contains(&kwh)) {
        return Err(ProfileError::InvalidBattery(format!(
            "{name} {kwh} kWh must be within 0..={MAX_KWH}"
        )));
    }
    Ok(to_units(kwh))
}

fn amount_units(operation: &'static str, amount: f64) -> Result<i64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(to_units(amount))
    } else {
        Err(ProfileError::InvalidAmount { operation, amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(current: f64) -> Battery {
        Battery::new(1000.0, 200.0, 200.0, current).expect("valid battery")
    }

    #[test]
    fn test_new_battery() {
        let b = battery(0.0);
        assert_eq!(b.capacity_kwh(), 1000.0);
        assert_eq!(b.charge_limit_kwh(), 200.0);
        assert_eq!(b.discharge_limit_kwh(), 200.0);
        assert_eq!(b.current_kwh(), 0.0);
        assert_eq!(b.soc(), 0.0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(Battery::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Battery::new(-5.0, 1.0, 1.0, 0.0).is_err());
        assert!(Battery::new(10.0, -1.0, 1.0, 0.0).is_err());
        assert!(Battery::new(10.0, 1.0, -1.0, 0.0).is_err());
        assert!(Battery::new(10.0, 1.0, 1.0, 10.5).is_err());
        assert!(Battery::new(10.0, 1.0, 1.0, -0.1).is_err());
        assert!(Battery::new(f64::NAN, 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn test_charge_power_limit() {
        let mut b = battery(0.0);
        assert_eq!(b.charge(500.0).ok(), Some(200.0));
        assert_eq!(b.current_kwh(), 200.0);
    }

    #[test]
    fn test_discharge_power_limit() {
        let mut b = battery(0.0);
        b.charge(500.0).ok();
        assert_eq!(b.discharge(500.0).ok(), Some(200.0));
        assert_eq!(b.current_kwh(), 0.0);
        assert_eq!(b.soc(), 0.0);
    }

    #[test]
    fn test_charge_capacity_limit() {
        let mut b = battery(900.0);
        assert_eq!(b.max_charge(), 100.0);
        assert_eq!(b.charge(150.0).ok(), Some(100.0));
        assert_eq!(b.soc(), 1.0);
        assert_eq!(b.max_charge(), 0.0);
        assert_eq!(b.charge(50.0).ok(), Some(0.0));
    }

    #[test]
    fn test_discharge_energy_limit() {
        let mut b = battery(50.0);
        assert_eq!(b.max_discharge(), 50.0);
        assert_eq!(b.discharge(200.0).ok(), Some(50.0));
        assert_eq!(b.max_discharge(), 0.0);
        assert_eq!(b.discharge(10.0).ok(), Some(0.0));
    }

    #[test]
    fn soc_is_one_only_when_full() {
        let mut b = battery(0.0);
        for _ in 0..4 {
            b.charge(200.0).ok();
            assert!(b.soc() < 1.0);
        }
        b.charge(200.0).ok();
        assert_eq!(b.soc(), 1.0);
    }

    #[test]
    fn negative_amount_is_rejected_without_side_effects() {
        let mut b = battery(300.0);
        assert!(matches!(
            b.charge(-1.0),
            Err(ProfileError::InvalidAmount { operation: "charge", .. })
        ));
        assert!(matches!(
            b.discharge(-1.0),
            Err(ProfileError::InvalidAmount { operation: "discharge", .. })
        ));
        assert!(b.charge(f64::NAN).is_err());
        assert!(b.discharge(f64::INFINITY).is_err());
        assert_eq!(b.current_kwh(), 300.0);
    }

    #[test]
    fn zero_limits_block_all_flow() {
        let mut b = Battery::new(10.0, 0.0, 0.0, 5.0).expect("valid battery");
        assert_eq!(b.charge(1.0).ok(), Some(0.0));
        assert_eq!(b.discharge(1.0).ok(), Some(0.0));
        assert_eq!(b.current_kwh(), 5.0);
    }

    #[test]
    fn round_trip_returns_to_prior_charge() {
        let mut b = battery(250.0);
        for request in [75.0, 500.0, 0.0, 12.5, 199.75] {
            let before = b.current_kwh();
            let charged = b.charge(request).expect("valid amount");
            let discharged = b.discharge(charged).expect("valid amount");
            assert_eq!(discharged, charged);
            assert_eq!(b.current_kwh(), before);
        }
    }

    #[test]
    fn decimal_round_trip_has_no_drift() {
        let mut b = battery(0.1);
        for request in [0.2, 0.1, 0.3, 0.7, 1.1, 0.01] {
            let before = b.current_kwh();
            let charged = b.charge(request).expect("valid amount");
            assert_eq!(charged, request);
            assert_eq!(b.discharge(request).ok(), Some(request));
            assert_eq!(b.current_kwh(), before);
        }
        assert_eq!(b.current_kwh(), 0.1);
    }

    #[test]
    fn repeated_decimal_steps_sum_exactly() {
        let mut b = Battery::new(1.0, 0.1, 0.1, 0.0).expect("valid battery");
        for _ in 0..10 {
            b.charge(0.1).expect("valid amount");
        }
        assert_eq!(b.current_kwh(), 1.0);
        assert_eq!(b.soc(), 1.0);
        for _ in 0..10 {
            b.discharge(0.1).expect("valid amount");
        }
        assert_eq!(b.current_kwh(), 0.0);
    }

    #[test]
    fn soc_stays_within_bounds_for_any_sequence() {
        let mut b = Battery::new(3.7, 1.3, 0.9, 1.1).expect("valid battery");
        let requests = [0.4, 2.0, 0.33, 5.0, 0.0, 1.7, 0.05, 9.9, 0.6, 0.21];
        for (i, &amount) in requests.iter().cycle().take(200).enumerate() {
            if i % 3 == 0 {
                b.discharge(amount).expect("valid amount");
            } else {
                b.charge(amount).expect("valid amount");
            }
            assert!((0.0..=1.0).contains(&b.soc()), "soc {} after step {i}", b.soc());
            assert!(b.current_kwh() <= b.capacity_kwh());
        }
    }

    #[test]
    fn default_battery_is_the_1000_kwh_store() {
        let b = Battery::default();
        assert_eq!(b, Battery::new(1000.0, 200.0, 200.0, 0.0).expect("valid battery"));
        assert_eq!(b.max_charge(), 200.0);
        assert_eq!(b.max_discharge(), 0.0);
    }

    #[test]
    fn oversized_parameters_are_rejected() {
        assert!(Battery::new(MAX_KWH * 2.0, 1.0, 1.0, 0.0).is_err());
        assert!(Battery::new(10.0, f64::INFINITY, 1.0, 0.0).is_err());
        // rounds to zero capacity
        assert!(Battery::new(1e-9, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn complete_charge_discharge_cycle() {
        let mut b = battery(0.0);
        let mut stored = 0.0;
        while b.max_charge() > 0.0 {
            stored += b.charge(200.0).expect("valid amount");
        }
        assert_eq!(stored, 1000.0);

        let mut delivered = 0.0;
        while b.max_discharge() > 0.0 {
            delivered += b.discharge(200.0).expect("valid amount");
        }
        assert_eq!(delivered, 1000.0);
        assert_eq!(b.soc(), 0.0);
    }
}
