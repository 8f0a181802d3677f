//! # Object catalog
//!
//! Ordered collection of the periodic objects to display. The catalog is the CSV table used by
//! the plotting front-end, one row per object:
//!
//! ```text
//! Name,Period,e,JD0
//! V1143 Cyg,7.6407,0.54,2442212.2
//! ```
//!
//! * `Name` – display label.
//! * `Period` – orbital period in days.
//! * `e` – eccentricity.
//! * `JD0` – Julian date of a phase-zero crossing.
//!
//! Row order is the display order and is preserved everywhere downstream. Rows are not
//! validated on load: a row with an impossible period or eccentricity stays in the catalog and
//! is reported (and skipped) by the [ephemeris](crate::ephemeris) pass, so one bad row never
//! hides the others.
use std::io::Read;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::constants::{Day, JulianDate};
use crate::kepler::check_eccentricity;
use crate::orbphase_errors::OrbPhaseError;
use crate::phase::check_period;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalObject {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Period")]
    pub period: Day,
    #[serde(rename = "e")]
    pub eccentricity: f64,
    #[serde(rename = "JD0")]
    pub epoch: JulianDate,
}

impl OrbitalObject {
    pub fn new(name: impl Into<String>, period: Day, eccentricity: f64, epoch: JulianDate) -> Self {
        OrbitalObject {
            name: name.into(),
            period,
            eccentricity,
            epoch,
        }
    }

    /// Check that the period is positive, the orbit elliptic and the epoch finite.
    pub fn validate(&self) -> Result<(), OrbPhaseError> {
        check_period(self.period)?;
        check_eccentricity(self.eccentricity)?;
        if !self.epoch.is_finite() {
            return Err(OrbPhaseError::NonFiniteEpoch(self.epoch));
        }
        Ok(())
    }
}

/// Objects in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    objects: Vec<OrbitalObject>,
}

impl Catalog {
    pub fn from_objects(objects: Vec<OrbitalObject>) -> Self {
        Catalog { objects }
    }

    /// Read a catalog from CSV data with a `Name,Period,e,JD0` header.
    ///
    /// Return
    /// ----------
    /// * The rows in file order, or [`OrbPhaseError::CsvError`] on the first malformed row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, OrbPhaseError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let objects = csv_reader
            .deserialize::<OrbitalObject>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog { objects })
    }

    /// Read a catalog from a CSV file, see [`Catalog::from_reader`].
    pub fn from_csv_path(path: &Utf8Path) -> Result<Self, OrbPhaseError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrbitalObject> {
        self.objects.iter()
    }

    pub fn get(&self, row: usize) -> Option<&OrbitalObject> {
        self.objects.get(row)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a OrbitalObject;
    type IntoIter = std::slice::Iter<'a, OrbitalObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
