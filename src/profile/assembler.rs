use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tracing::{debug, trace};

use crate::calendar::{DayClassifier, HolidayCalendar};
use crate::error::{ProfileError, Result};

use super::catalog::ProfileCatalog;
use super::curve::{INTERVAL_MINUTES, INTERVALS_PER_DAY, ProfileType};
use super::dynamizer::Dynamizer;
use super::series::{LoadPoint, LoadSeries};

/// Stitches daily reference curves into a continuous quarter-hour load series.
///
/// For each day the assembler classifies the date, fetches the matching curve
/// from the catalog, optionally scales it by the [`Dynamizer`] factor, and
/// stamps interval `i` at `i * 15 min` past midnight. The 24:00 value rolls
/// over to 00:00 of the following day, so consecutive days never share a
/// timestamp.
#[derive(Debug, Clone)]
pub struct ProfileAssembler<H> {
    classifier: DayClassifier<H>,
}

impl<H: HolidayCalendar> ProfileAssembler<H> {
    pub fn new(classifier: DayClassifier<H>) -> Self {
        Self { classifier }
    }

    pub fn with_holidays(holidays: H) -> Self {
        Self::new(DayClassifier::new(holidays))
    }

    /// Assembles the series for every day in `from..=to`.
    ///
    /// # Errors
    ///
    /// * [`ProfileError::InvalidRange`] if `from > to`, or if `to` is the last
    ///   representable date and its 24:00 value has no timestamp
    /// * [`ProfileError::ProfileNotFound`] if any day has no curve; nothing is
    ///   returned for the rest of the range
    pub fn assemble<C: ProfileCatalog + ?Sized>(
        &self,
        catalog: &C,
        from: NaiveDate,
        to: NaiveDate,
        profile_type: &ProfileType,
        dynamize: bool,
    ) -> Result<LoadSeries> {
        // the last day's 24:00 value is stamped on the following date
        if from > to || to.succ_opt().is_none() {
            return Err(ProfileError::InvalidRange { from, to });
        }

        let days = usize::try_from((to - from).num_days() + 1).unwrap_or_default();
        let mut series = LoadSeries::with_capacity(days * INTERVALS_PER_DAY);

        for day in from.iter_days().take(days) {
            let (season, day_type) = self.classifier.classify(day);
            let curve = catalog.lookup(season, day_type, profile_type)?;
            trace!(%day, %season, %day_type, dynamize, "assembling day");

            let values = if dynamize {
                Dynamizer::apply(curve.values(), day.ordinal())
            } else {
                curve.values().to_vec()
            };

            let midnight = day.and_time(NaiveTime::MIN);
            series.extend(values.into_iter().enumerate().map(|(idx, watts)| LoadPoint {
                timestamp: interval_timestamp(midnight, idx + 1),
                watts,
            }));
        }

        debug!(
            %from,
            %to,
            %profile_type,
            dynamize,
            points = series.len(),
            "assembled load series"
        );
        Ok(series)
    }

    /// Like [`assemble`](Self::assemble), dynamizing only dynamizable profile types (`H0`).
    ///
    /// # Errors
    ///
    /// Same as [`assemble`](Self::assemble).
    pub fn assemble_standard<C: ProfileCatalog + ?Sized>(
        &self,
        catalog: &C,
        from: NaiveDate,
        to: NaiveDate,
        profile_type: &ProfileType,
    ) -> Result<LoadSeries> {
        self.assemble(catalog, from, to, profile_type, profile_type.is_dynamizable())
    }
}

/// End of interval `i` (1-based). Interval 96 is midnight of the next day.
fn interval_timestamp(midnight: NaiveDateTime, i: usize) -> NaiveDateTime {
    midnight + TimeDelta::minutes(INTERVAL_MINUTES * i as i64)
}
