use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calendar::{DayType, Season};
use crate::error::{ProfileError, Result};
use crate::io::catalog_csv::read_profile_table_file;

use super::curve::{ProfileType, ReferenceCurve};

/// Source of reference curves keyed by (season, day type, profile type).
///
/// The assembler only needs this lookup; how the curves were parsed or stored
/// is up to the implementation.
pub trait ProfileCatalog {
    /// # Errors
    ///
    /// Returns [`ProfileError::ProfileNotFound`] if the combination is absent.
    fn lookup(
        &self,
        season: Season,
        day_type: DayType,
        profile_type: &ProfileType,
    ) -> Result<&ReferenceCurve>;
}

impl<T: ProfileCatalog + ?Sized> ProfileCatalog for &T {
    fn lookup(
        &self,
        season: Season,
        day_type: DayType,
        profile_type: &ProfileType,
    ) -> Result<&ReferenceCurve> {
        (**self).lookup(season, day_type, profile_type)
    }
}

/// All nine (season, day type) curves of one profile type.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    curves: BTreeMap<(Season, DayType), ReferenceCurve>,
}

impl ProfileTable {
    /// # Errors
    ///
    /// Returns [`ProfileError::IncompleteTable`] naming the first missing combination.
    pub fn new(curves: BTreeMap<(Season, DayType), ReferenceCurve>) -> Result<Self> {
        for season in Season::ALL {
            for day_type in DayType::ALL {
                if !curves.contains_key(&(season, day_type)) {
                    return Err(ProfileError::IncompleteTable { season, day_type });
                }
            }
        }
        Ok(Self { curves })
    }

    pub fn get(&self, season: Season, day_type: DayType) -> Option<&ReferenceCurve> {
        self.curves.get(&(season, day_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(Season, DayType), &ReferenceCurve)> {
        self.curves.iter()
    }
}

/// Catalog holding one [`ProfileTable`] per profile type.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: BTreeMap<ProfileType, ProfileTable>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the table of `profile_type`.
    pub fn insert(&mut self, profile_type: ProfileType, table: ProfileTable) {
        self.tables.insert(profile_type, table);
    }

    pub fn with_table(mut self, profile_type: ProfileType, table: ProfileTable) -> Self {
        self.insert(profile_type, table);
        self
    }

    pub fn profile_types(&self) -> impl Iterator<Item = &ProfileType> {
        self.tables.keys()
    }

    pub fn table(&self, profile_type: &ProfileType) -> Option<&ProfileTable> {
        self.tables.get(profile_type)
    }

    /// Loads every `<TYPE>.csv` file of `dir`; the file stem is the profile type.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read or any table is malformed.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        let mut paths: Vec<_> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()?;
        paths.sort();

        for path in paths {
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let profile_type: ProfileType = stem.parse().map_err(|message| ProfileError::Catalog {
                source_name: path.display().to_string(),
                message,
            })?;
            let table = read_profile_table_file(&path)?;
            debug!(%profile_type, path = %path.display(), "loaded profile table");
            catalog.insert(profile_type, table);
        }

        Ok(catalog)
    }
}

impl ProfileCatalog for InMemoryCatalog {
    fn lookup(
        &self,
        season: Season,
        day_type: DayType,
        profile_type: &ProfileType,
    ) -> Result<&ReferenceCurve> {
        self.tables
            .get(profile_type)
            .and_then(|table| table.get(season, day_type))
            .ok_or_else(|| ProfileError::ProfileNotFound {
                season,
                day_type,
                profile_type: profile_type.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_curves(watts: f64) -> BTreeMap<(Season, DayType), ReferenceCurve> {
        let mut curves = BTreeMap::new();
        for season in Season::ALL {
            for day_type in DayType::ALL {
                curves.insert(
                    (season, day_type),
                    ReferenceCurve::flat(watts).expect("valid curve"),
                );
            }
        }
        curves
    }

    #[test]
    fn complete_table_builds() {
        let table = ProfileTable::new(full_curves(100.0)).expect("complete table");
        assert_eq!(table.iter().count(), 9);
        assert!(table.get(Season::Summer, DayType::Saturday).is_some());
    }

    #[test]
    fn incomplete_table_is_rejected() {
        let mut curves = full_curves(100.0);
        curves.remove(&(Season::Transition, DayType::Sunday));
        let err = ProfileTable::new(curves).err();
        assert!(matches!(
            err,
            Some(ProfileError::IncompleteTable {
                season: Season::Transition,
                day_type: DayType::Sunday
            })
        ));
    }

    #[test]
    fn lookup_by_profile_type() {
        let table = ProfileTable::new(full_curves(42.0)).expect("complete table");
        let catalog = InMemoryCatalog::new().with_table(ProfileType::household(), table);
        let curve = catalog.lookup(Season::Winter, DayType::Workday, &ProfileType::new("h0"));
        assert_eq!(curve.ok().and_then(|c| c.interval(1)), Some(42.0));
    }

    #[test]
    fn lookup_unknown_type_fails() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .lookup(Season::Winter, DayType::Workday, &ProfileType::new("G0"))
            .err();
        assert!(matches!(err, Some(ProfileError::ProfileNotFound { .. })));
    }
}
