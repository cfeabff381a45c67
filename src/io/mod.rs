//! CSV adapters: profile tables in, load series and telemetry out.

pub mod catalog_csv;
pub mod export;
