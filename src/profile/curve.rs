//! Reference curves and profile type names.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProfileError, Result};

/// Number of quarter-hour intervals in a reference curve.
pub const INTERVALS_PER_DAY: usize = 96;

/// Length of one interval in minutes.
pub const INTERVAL_MINUTES: i64 = 15;

/// Canonical 96-point quarter-hourly load shape (W) for one (season, day type).
///
/// Index `0` is the 00:15 value, index `95` the 24:00 value. Values are finite
/// and non-negative; the curve is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceCurve {
    watts: Box<[f64; INTERVALS_PER_DAY]>,
}

impl ReferenceCurve {
    /// Builds a curve from exactly 96 values.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidCurve`] on a wrong length or on a negative
    /// or non-finite value.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        let len = values.len();
        let watts: Box<[f64; INTERVALS_PER_DAY]> = values.into_boxed_slice().try_into().map_err(
            |_| ProfileError::InvalidCurve(format!("expected {INTERVALS_PER_DAY} values, got {len}")),
        )?;

        if let Some((i, v)) = watts
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ProfileError::InvalidCurve(format!(
                "value {v} at interval {} is not a finite non-negative number",
                i + 1
            )));
        }

        Ok(Self { watts })
    }

    /// Curve with the same value in every interval.
    pub fn flat(watts: f64) -> Result<Self> {
        Self::new(vec![watts; INTERVALS_PER_DAY])
    }

    pub fn values(&self) -> &[f64; INTERVALS_PER_DAY] {
        &self.watts
    }

    /// Value of interval `i` in `1..=96`.
    pub fn interval(&self, i: usize) -> Option<f64> {
        i.checked_sub(1).and_then(|idx| self.watts.get(idx).copied())
    }

    /// Energy of the curve over one day in kWh.
    pub fn daily_energy_kwh(&self) -> f64 {
        self.watts.iter().sum::<f64>() * INTERVAL_MINUTES as f64 / 60.0 / 1000.0
    }
}

/// Name of a standard load profile such as `H0` (household) or `G0` (commerce).
///
/// Stored upper-case; parsing is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileType(String);

impl ProfileType {
    /// The standard household profile, the only one that gets dynamized.
    pub const HOUSEHOLD: &'static str = "H0";

    pub fn new(name: &str) -> Self {
        Self(name.trim().to_ascii_uppercase())
    }

    pub fn household() -> Self {
        Self(Self::HOUSEHOLD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_dynamizable(&self) -> bool {
        self.0 == Self::HOUSEHOLD
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(format!("invalid profile type \"{s}\""));
        }
        Ok(Self::new(name))
    }
}
