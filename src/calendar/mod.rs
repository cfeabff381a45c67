//! Calendar rules: seasons, day types, and public holidays.

/// Date → (season, day type) classification.
pub mod classifier;
/// Season and day-type buckets of a standard load profile.
pub mod day_type;
/// Injected public-holiday calendars.
pub mod holidays;

pub use classifier::DayClassifier;
pub use day_type::{DayType, Season};
pub use holidays::{AustrianHolidays, Combined, HolidayCalendar, HolidaySet, NoHolidays};
