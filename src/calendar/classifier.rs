use chrono::{Datelike, NaiveDate, Weekday};

use super::day_type::{DayType, Season};
use super::holidays::HolidayCalendar;

/// Maps a calendar date to the (season, day type) bucket of a standard load profile.
///
/// The holiday calendar is injected so callers can pick the national rules
/// (or a fixed date set in tests).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use slp_sim::calendar::{AustrianHolidays, DayClassifier, DayType, Season};
///
/// let classifier = DayClassifier::new(AustrianHolidays);
/// let christmas_eve = NaiveDate::from_ymd_opt(2015, 12, 24).unwrap();
/// assert_eq!(
///     classifier.classify(christmas_eve),
///     (Season::Winter, DayType::Saturday)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DayClassifier<H> {
    holidays: H,
}

impl<H: HolidayCalendar> DayClassifier<H> {
    pub fn new(holidays: H) -> Self {
        Self { holidays }
    }

    /// Returns the (season, day type) bucket for `date`.
    pub fn classify(&self, date: NaiveDate) -> (Season, DayType) {
        (season_of(date), self.day_type(date))
    }

    /// Day type with the rules checked in order: holiday or Sunday first, then
    /// Saturday or Dec 24/31, otherwise workday.
    pub fn day_type(&self, date: NaiveDate) -> DayType {
        let weekday = date.weekday();
        if self.holidays.is_holiday(date) || weekday == Weekday::Sun {
            DayType::Sunday
        } else if weekday == Weekday::Sat || is_new_year_or_christmas_eve(date) {
            DayType::Saturday
        } else {
            DayType::Workday
        }
    }
}

/// Season of `date`; all bounds are inclusive.
pub fn season_of(date: NaiveDate) -> Season {
    let md = (date.month(), date.day());
    if md <= (3, 20) || md >= (11, 1) {
        Season::Winter
    } else if (5, 15) <= md && md <= (9, 14) {
        Season::Summer
    } else {
        Season::Transition
    }
}

fn is_new_year_or_christmas_eve(date: NaiveDate) -> bool {
    date.month() == 12 && (date.day() == 24 || date.day() == 31)
}
