//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use slp_sim::calendar::{DayType, Season};
use slp_sim::profile::{InMemoryCatalog, ProfileTable, ProfileType, ReferenceCurve};

/// Watts used for every interval of the `(season, day_type)` bucket.
///
/// Each bucket gets a distinct value so a series point identifies the curve
/// it came from: winter 100, summer 200, transition 300, plus 10 for
/// Saturday, 20 for Sunday, and 30 for Workday.
pub fn bucket_watts(season: Season, day_type: DayType) -> f64 {
    let s = match season {
        Season::Winter => 100.0,
        Season::Summer => 200.0,
        Season::Transition => 300.0,
    };
    let d = match day_type {
        DayType::Saturday => 10.0,
        DayType::Sunday => 20.0,
        DayType::Workday => 30.0,
    };
    s + d
}

/// Complete table of flat curves, one per bucket.
pub fn bucket_table() -> ProfileTable {
    let mut curves = BTreeMap::new();
    for season in Season::ALL {
        for day_type in DayType::ALL {
            let curve = ReferenceCurve::flat(bucket_watts(season, day_type))
                .expect("flat curve should be valid");
            curves.insert((season, day_type), curve);
        }
    }
    ProfileTable::new(curves).expect("table should cover all buckets")
}

/// Catalog holding the bucket table under `H0` and `G0`.
pub fn bucket_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new()
        .with_table(ProfileType::household(), bucket_table())
        .with_table(ProfileType::new("G0"), bucket_table())
}
