//! Chronological quarter-hour load series.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use super::curve::INTERVAL_MINUTES;

/// One quarter-hour value of a [`LoadSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadPoint {
    /// End of the quarter-hour interval.
    pub timestamp: NaiveDateTime,
    /// Average power over the interval (W).
    pub watts: f64,
}

/// Ordered load values with strictly increasing, evenly spaced timestamps.
///
/// Built by the [`ProfileAssembler`](super::ProfileAssembler); consumers only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSeries {
    points: Vec<LoadPoint>,
}

impl LoadSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn extend(&mut self, points: impl IntoIterator<Item = LoadPoint>) {
        self.points.extend(points);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[LoadPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadPoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&LoadPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&LoadPoint> {
        self.points.last()
    }

    /// Interval length in hours.
    pub fn step_hours() -> f64 {
        INTERVAL_MINUTES as f64 / 60.0
    }

    /// Checks that every timestamp is exactly one interval after the previous one.
    pub fn is_contiguous(&self) -> bool {
        let step = TimeDelta::minutes(INTERVAL_MINUTES);
        self.points
            .windows(2)
            .all(|w| w[1].timestamp - w[0].timestamp == step)
    }

    /// Total energy in kWh.
    pub fn total_energy_kwh(&self) -> f64 {
        self.points.iter().map(|p| p.watts).sum::<f64>() * Self::step_hours() / 1000.0
    }

    /// Point with the highest load; the earliest one on ties.
    pub fn peak(&self) -> Option<&LoadPoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.watts > best.watts { p } else { best })
    }

    /// Energy per assembled day in kWh.
    ///
    /// Points are attributed to the day they were assembled for, so the 24:00
    /// value stamped at the next midnight still counts for the previous day.
    pub fn daily_energy_kwh(&self) -> Vec<(NaiveDate, f64)> {
        let mut days: Vec<(NaiveDate, f64)> = Vec::new();
        for p in &self.points {
            let day = (p.timestamp - TimeDelta::minutes(INTERVAL_MINUTES)).date();
            let kwh = p.watts * Self::step_hours() / 1000.0;
            match days.last_mut() {
                Some((d, sum)) if *d == day => *sum += kwh,
                _ => days.push((day, kwh)),
            }
        }
        days
    }
}

impl<'a> IntoIterator for &'a LoadSeries {
    type Item = &'a LoadPoint;
    type IntoIter = std::slice::Iter<'a, LoadPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn series(watts: &[f64]) -> LoadSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid start");
        let mut s = LoadSeries::with_capacity(watts.len());
        s.extend(watts.iter().enumerate().map(|(i, &w)| LoadPoint {
            timestamp: start + TimeDelta::minutes(INTERVAL_MINUTES * (i as i64 + 1)),
            watts: w,
        }));
        s
    }

    #[test]
    fn energy_of_one_hour() {
        // four quarter hours at 1 kW = 1 kWh
        let s = series(&[1000.0; 4]);
        assert_abs_diff_eq!(s.total_energy_kwh(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn peak_picks_first_maximum() {
        let s = series(&[1.0, 5.0, 5.0, 2.0]);
        let peak = s.peak().expect("non-empty");
        assert_eq!(peak.watts, 5.0);
        assert_eq!(peak.timestamp, s.points()[1].timestamp);
        assert!(LoadSeries::default().peak().is_none());
    }

    #[test]
    fn contiguity_check() {
        let mut s = series(&[1.0, 2.0, 3.0]);
        assert!(s.is_contiguous());
        let last = s.points()[2];
        s.extend([LoadPoint {
            timestamp: last.timestamp + TimeDelta::minutes(30),
            watts: 1.0,
        }]);
        assert!(!s.is_contiguous());
    }

    #[test]
    fn daily_energy_keeps_midnight_value_on_previous_day() {
        // 192 quarter hours starting at 00:15: the 96th lands on Jan 2 00:00
        let s = series(&[1000.0; 192]);
        let days = s.daily_energy_kwh();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].0, NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid"));
        assert_abs_diff_eq!(days[0].1, 24.0, epsilon = 1e-9);
        assert_abs_diff_eq!(days[1].1, 24.0, epsilon = 1e-9);
    }
}
