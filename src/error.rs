//! Error type shared by the profile pipeline, the battery model, and the CSV adapters.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::{DayType, Season};

pub type Result<T> = std::result::Result<T, ProfileError>;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid date range {from}..={to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("no {season}/{day_type} curve for profile type {profile_type}")]
    ProfileNotFound {
        season: Season,
        day_type: DayType,
        profile_type: String,
    },

    #[error("invalid {operation} amount {amount}: must be finite and >= 0")]
    InvalidAmount { operation: &'static str, amount: f64 },

    #[error("invalid reference curve: {0}")]
    InvalidCurve(String),

    #[error("profile table is missing the {season}/{day_type} curve")]
    IncompleteTable { season: Season, day_type: DayType },

    #[error("invalid battery parameters: {0}")]
    InvalidBattery(String),

    #[error("profile catalog error in {source_name}: {message}")]
    Catalog { source_name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
