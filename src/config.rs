//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::calendar::{AustrianHolidays, Combined, HolidayCalendar, HolidaySet, NoHolidays};
use crate::devices::Battery;
use crate::error::Result as ProfileResult;
use crate::profile::ProfileType;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the household scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::household`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Profile source and assembly range.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Public-holiday calendar.
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Dispatch strategy parameters.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// When to apply the day-of-year dynamization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamizeMode {
    /// Only for dynamizable profile types (`H0`).
    Auto,
    Always,
    Never,
}

/// Profile source and assembly range.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Directory holding one `<TYPE>.csv` table per profile type.
    pub catalog_dir: PathBuf,
    /// Profile type to assemble, e.g. `"H0"`.
    pub profile_type: String,
    /// First day (inclusive).
    pub from: NaiveDate,
    /// Last day (inclusive).
    pub to: NaiveDate,
    pub dynamize: DynamizeMode,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            catalog_dir: PathBuf::from("profiles"),
            profile_type: ProfileType::HOUSEHOLD.to_string(),
            from: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2015, 12, 31).unwrap_or_default(),
            dynamize: DynamizeMode::Auto,
        }
    }
}

/// Public-holiday calendar.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// National rules: `"AT"` or `"none"`.
    pub country: String,
    /// Additional dates treated as holidays.
    pub extra_holidays: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            country: "AT".to_string(),
            extra_holidays: Vec::new(),
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Usable capacity (kWh).
    pub capacity_kwh: f64,
    /// Maximum energy charged per quarter hour (kWh).
    pub charge_limit_kwh: f64,
    /// Maximum energy discharged per quarter hour (kWh).
    pub discharge_limit_kwh: f64,
    /// Initial stored energy (kWh).
    pub initial_kwh: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 10.0,
            charge_limit_kwh: 1.25,
            discharge_limit_kwh: 1.25,
            initial_kwh: 0.0,
        }
    }
}

/// Dispatch strategy parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Strategy: `"peak_shaving"` or `"idle"`.
    pub strategy: String,
    /// Grid import threshold for peak shaving (W).
    pub threshold_w: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            strategy: "peak_shaving".to_string(),
            threshold_w: 150.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the household scenario: `H0` for 2015 with a 10 kWh battery.
    pub fn household() -> Self {
        Self {
            profile: ProfileConfig::default(),
            calendar: CalendarConfig::default(),
            battery: BatteryConfig::default(),
            dispatch: DispatchConfig::default(),
        }
    }

    /// Returns the large-battery preset: more capacity and a lower threshold.
    pub fn household_large_battery() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_kwh: 20.0,
                charge_limit_kwh: 2.5,
                discharge_limit_kwh: 2.5,
                ..BatteryConfig::default()
            },
            dispatch: DispatchConfig {
                threshold_w: 130.0,
                ..DispatchConfig::default()
            },
            ..Self::household()
        }
    }

    /// Returns the no-battery preset: the idle strategy as a baseline.
    pub fn no_battery() -> Self {
        Self {
            dispatch: DispatchConfig {
                strategy: "idle".to_string(),
                ..DispatchConfig::default()
            },
            ..Self::household()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["household", "household_large_battery", "no_battery"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "household" => Ok(Self::household()),
            "household_large_battery" => Ok(Self::household_large_battery()),
            "no_battery" => Ok(Self::no_battery()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// A relative `profile.catalog_dir` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if cfg.profile.catalog_dir.is_relative() {
            if let Some(parent) = path.parent() {
                cfg.profile.catalog_dir = parent.join(&cfg.profile.catalog_dir);
            }
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.profile;
        if p.profile_type.parse::<ProfileType>().is_err() {
            errors.push(ConfigError::new(
                "profile.profile_type",
                format!("must be alphanumeric, got \"{}\"", p.profile_type),
            ));
        }
        if p.from > p.to {
            errors.push(ConfigError::new("profile.from", "must be <= profile.to"));
        }

        let c = &self.calendar;
        if !matches!(c.country.to_ascii_uppercase().as_str(), "AT" | "NONE") {
            errors.push(ConfigError::new(
                "calendar.country",
                format!("must be \"AT\" or \"none\", got \"{}\"", c.country),
            ));
        }

        let bat = &self.battery;
        if !(bat.capacity_kwh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        if !(bat.charge_limit_kwh >= 0.0) {
            errors.push(ConfigError::new("battery.charge_limit_kwh", "must be >= 0"));
        }
        if !(bat.discharge_limit_kwh >= 0.0) {
            errors.push(ConfigError::new("battery.discharge_limit_kwh", "must be >= 0"));
        }
        if !(0.0..=bat.capacity_kwh).contains(&bat.initial_kwh) {
            errors.push(ConfigError::new(
                "battery.initial_kwh",
                "must be in [0.0, battery.capacity_kwh]",
            ));
        }

        let d = &self.dispatch;
        if d.strategy != "peak_shaving" && d.strategy != "idle" {
            errors.push(ConfigError::new(
                "dispatch.strategy",
                format!("must be \"peak_shaving\" or \"idle\", got \"{}\"", d.strategy),
            ));
        }
        if !(d.threshold_w >= 0.0) {
            errors.push(ConfigError::new("dispatch.threshold_w", "must be >= 0"));
        }

        errors
    }

    pub fn profile_type(&self) -> ProfileType {
        ProfileType::new(&self.profile.profile_type)
    }

    /// Whether the configured profile type gets dynamized.
    pub fn dynamize(&self) -> bool {
        match self.profile.dynamize {
            DynamizeMode::Auto => self.profile_type().is_dynamizable(),
            DynamizeMode::Always => true,
            DynamizeMode::Never => false,
        }
    }

    /// Builds the holiday calendar: national rules plus the extra dates.
    pub fn holiday_calendar(&self) -> Box<dyn HolidayCalendar> {
        let extra: HolidaySet = self
            .calendar
            .extra_holidays
            .iter()
            .map(|&date| (date, "Configured holiday"))
            .collect();
        if self.calendar.country.eq_ignore_ascii_case("AT") {
            Box::new(Combined::new(AustrianHolidays, extra))
        } else {
            Box::new(Combined::new(NoHolidays, extra))
        }
    }

    /// Builds the battery from the `[battery]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidBattery`](crate::error::ProfileError::InvalidBattery)
    /// for out-of-range parameters.
    pub fn build_battery(&self) -> ProfileResult<Battery> {
        let b = &self.battery;
        Battery::new(
            b.capacity_kwh,
            b.charge_limit_kwh,
            b.discharge_limit_kwh,
            b.initial_kwh,
        )
    }
}
