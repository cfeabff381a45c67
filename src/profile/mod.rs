//! Standard load profile pipeline: reference curves, dynamization, and assembly.

/// Date range → chronological load series.
pub mod assembler;
/// Profile catalogs keyed by (season, day type, profile type).
pub mod catalog;
pub mod curve;
/// Day-of-year rescaling polynomial.
pub mod dynamizer;
pub mod series;

pub use assembler::ProfileAssembler;
pub use catalog::{InMemoryCatalog, ProfileCatalog, ProfileTable};
pub use curve::{INTERVALS_PER_DAY, INTERVAL_MINUTES, ProfileType, ReferenceCurve};
pub use dynamizer::Dynamizer;
pub use series::{LoadPoint, LoadSeries};
