//! Standard load profile synthesis and battery dispatch simulator.

/// Seasons, day types, holidays, and the date classifier.
pub mod calendar;
pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
/// CSV profile tables in, CSV series and telemetry out.
pub mod io;
pub mod profile;
pub mod runner;
/// Dispatch engine, controllers, and KPIs.
pub mod sim;

pub use error::{ProfileError, Result};
