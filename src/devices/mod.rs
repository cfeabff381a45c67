//! Storage device models driven by the dispatch loop.

/// Lossless battery with per-step charge/discharge limits.
pub mod battery;

pub use battery::Battery;
