//! Integration tests for loading profile tables from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use slp_sim::ProfileError;
use slp_sim::calendar::{DayType, Season};
use slp_sim::profile::{InMemoryCatalog, ProfileCatalog, ProfileType};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("slp-sim-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("scratch dir should be creatable");
    dir
}

fn table_csv(watts: f64) -> String {
    let mut header = vec!["time".to_string()];
    for season in Season::ALL {
        for day_type in DayType::ALL {
            header.push(format!("{season}_{day_type}"));
        }
    }
    let mut out = header.join(",");
    out.push('\n');
    for i in 1..=96 {
        let minutes = i * 15;
        out.push_str(&format!("{:02}:{:02}", minutes / 60, minutes % 60));
        for _ in 0..9 {
            out.push_str(&format!(",{watts}"));
        }
        out.push('\n');
    }
    out
}

#[test]
fn bundled_household_table_covers_every_bucket() {
    let catalog = InMemoryCatalog::from_dir(Path::new("profiles")).expect("bundled tables load");
    let h0 = ProfileType::household();

    for season in Season::ALL {
        for day_type in DayType::ALL {
            let curve = catalog
                .lookup(season, day_type, &h0)
                .expect("bucket should be present");
            assert!(curve.values().iter().all(|w| *w >= 0.0));
            assert!(curve.daily_energy_kwh() > 0.0);
        }
    }
}

#[test]
fn file_stem_names_the_profile_type() {
    let dir = scratch_dir("stem");
    fs::write(dir.join("g0.csv"), table_csv(250.0)).expect("write table");
    fs::write(dir.join("README.txt"), "not a table").expect("write note");

    let catalog = InMemoryCatalog::from_dir(&dir).expect("tables load");
    let types: Vec<_> = catalog.profile_types().map(ProfileType::as_str).collect();
    assert_eq!(types, ["G0"]);

    let curve = catalog
        .lookup(Season::Summer, DayType::Sunday, &ProfileType::new("G0"))
        .expect("G0 present");
    assert_eq!(curve.interval(96), Some(250.0));

    let err = catalog
        .lookup(Season::Summer, DayType::Sunday, &ProfileType::household())
        .expect_err("H0 absent");
    assert!(matches!(err, ProfileError::ProfileNotFound { .. }));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn truncated_table_is_rejected() {
    let dir = scratch_dir("truncated");
    let csv = table_csv(100.0);
    let truncated: String = csv.lines().take(50).map(|l| format!("{l}\n")).collect();
    fs::write(dir.join("H0.csv"), truncated).expect("write table");

    assert!(InMemoryCatalog::from_dir(&dir).is_err());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_is_an_io_error() {
    let err = InMemoryCatalog::from_dir(Path::new("does/not/exist")).expect_err("no dir");
    assert!(matches!(err, ProfileError::Io(_)));
}
