//! Public-holiday calendars injected into the [`DayClassifier`](super::DayClassifier).

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};

/// A "date → holiday name" lookup.
///
/// Implementations are nationality-specific; the classifier only asks whether a
/// given date is a public holiday.
pub trait HolidayCalendar {
    /// Returns the holiday name if `date` is a public holiday.
    fn holiday_name(&self, date: NaiveDate) -> Option<&str>;

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

impl<T: HolidayCalendar + ?Sized> HolidayCalendar for &T {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        (**self).holiday_name(date)
    }
}

impl<T: HolidayCalendar + ?Sized> HolidayCalendar for Box<T> {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        (**self).holiday_name(date)
    }
}

/// Calendar without any public holidays.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn holiday_name(&self, _date: NaiveDate) -> Option<&str> {
        None
    }
}

/// Explicit set of holiday dates.
#[derive(Debug, Default, Clone)]
pub struct HolidaySet {
    dates: BTreeMap<NaiveDate, String>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, name: impl Into<String>) {
        self.dates.insert(date, name.into());
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(NaiveDate, S)> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, S)>>(iter: I) -> Self {
        Self {
            dates: iter
                .into_iter()
                .map(|(date, name)| (date, name.into()))
                .collect(),
        }
    }
}

impl HolidayCalendar for HolidaySet {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.dates.get(&date).map(String::as_str)
    }
}

/// Austrian national public holidays, valid for any Gregorian year.
#[derive(Debug, Default, Clone, Copy)]
pub struct AustrianHolidays;

/// Fixed-date holidays as `(month, day, name)`.
const AT_FIXED: [(u32, u32, &str); 9] = [
    (1, 1, "New Year's Day"),
    (1, 6, "Epiphany"),
    (5, 1, "Labour Day"),
    (8, 15, "Assumption Day"),
    (10, 26, "National Day"),
    (11, 1, "All Saints' Day"),
    (12, 8, "Immaculate Conception"),
    (12, 25, "Christmas Day"),
    (12, 26, "St. Stephen's Day"),
];

/// Movable holidays as `(days after Easter Sunday, name)`.
const AT_EASTER_OFFSETS: [(u64, &str); 4] = [
    (1, "Easter Monday"),
    (39, "Ascension Day"),
    (50, "Whit Monday"),
    (60, "Corpus Christi"),
];

impl HolidayCalendar for AustrianHolidays {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        if let Some(&(_, _, name)) = AT_FIXED
            .iter()
            .find(|(month, day, _)| date.month() == *month && date.day() == *day)
        {
            return Some(name);
        }

        let easter = easter_sunday(date.year())?;
        AT_EASTER_OFFSETS
            .iter()
            .find(|(offset, _)| easter.checked_add_days(Days::new(*offset)) == Some(date))
            .map(|&(_, name)| name)
    }
}

/// Union of two calendars; the primary calendar's name wins on overlap.
#[derive(Debug, Clone)]
pub struct Combined<A, B> {
    primary: A,
    secondary: B,
}

impl<A: HolidayCalendar, B: HolidayCalendar> Combined<A, B> {
    pub fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }
}

impl<A: HolidayCalendar, B: HolidayCalendar> HolidayCalendar for Combined<A, B> {
    fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.primary
            .holiday_name(date)
            .or_else(|| self.secondary.holiday_name(date))
    }
}

/// Easter Sunday of the given Gregorian year (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}
