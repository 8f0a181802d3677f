//! # Multi-object ephemeris
//!
//! Runs the whole phase pipeline over a [`Catalog`] for one observation window and hands the
//! rendering layer everything it needs per object:
//!
//! 1. **Validation** of the catalog row (period, eccentricity, epoch).
//! 2. **Phase** of the object at the window anchor ([`PhaseConvention`]).
//! 3. **Angle profile**, computed once per distinct eccentricity ([`ProfileCache`]).
//! 4. **Cycle intervals** covering the window plus margin ([`compose_intervals`]).
//! 5. **Display band**: the horizontal strip of the chart owned by the row.
//!
//! ## Failure policy
//!
//! A row that fails any step is recorded as a [`SkippedObject`] and the pass continues with the
//! next row. Only a non-finite anchor time fails the whole computation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use orbphase::catalog::{Catalog, OrbitalObject};
//! use orbphase::ephemeris::{Ephemeris, EphemerisParams};
//!
//! let catalog = Catalog::from_objects(vec![
//!     OrbitalObject::new("V1143 Cyg", 7.6407, 0.54, 2442212.2),
//! ]);
//! let params = EphemerisParams::builder().window_days(14).build().unwrap();
//!
//! let ephemeris = Ephemeris::compute(&catalog, 2459215.5, &params).unwrap();
//! for obj in &ephemeris.objects {
//!     for interval in &obj.intervals {
//!         for (t, angle) in interval.time_samples() {
//!             let _y = obj.band.scale(angle);
//!             let _ = t;
//!         }
//!     }
//! }
//! ```
use std::sync::Arc;

use tracing::{debug, warn};

use crate::catalog::{Catalog, OrbitalObject};
use crate::constants::{Day, JulianDate, Phase, DEFAULT_PROFILE_SAMPLES, DEFAULT_WINDOW_DAYS};
use crate::cycles::{compose_intervals, CycleInterval};
use crate::kepler::KeplerParams;
use crate::orbphase_errors::OrbPhaseError;
use crate::phase::PhaseConvention;
use crate::profile::{AngleProfile, ProfileCache};

/// Configuration of an ephemeris pass.
///
/// Fields
/// -----------------
/// * `window_days` – length of the observation window (days), default 14.
/// * `profile_samples` – phase samples per cycle, default 10 000.
/// * `kepler` – Kepler solver tuning, default 28 fixed iterations without residual check.
/// * `phase_convention` – phase definition fed to the compositor, default
///   [`PhaseConvention::Wrapped`].
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisParams {
    pub window_days: u32,
    pub profile_samples: usize,
    pub kepler: KeplerParams,
    pub phase_convention: PhaseConvention,
}

impl EphemerisParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EphemerisParamsBuilder {
        EphemerisParamsBuilder::new()
    }

    pub fn window_length(&self) -> Day {
        self.window_days as f64
    }
}

impl Default for EphemerisParams {
    fn default() -> Self {
        EphemerisParams {
            window_days: DEFAULT_WINDOW_DAYS,
            profile_samples: DEFAULT_PROFILE_SAMPLES,
            kepler: KeplerParams::default(),
            phase_convention: PhaseConvention::default(),
        }
    }
}

/// Builder for [`EphemerisParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct EphemerisParamsBuilder {
    params: EphemerisParams,
}

impl EphemerisParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: EphemerisParams::default(),
        }
    }

    pub fn window_days(mut self, v: u32) -> Self {
        self.params.window_days = v;
        self
    }

    pub fn profile_samples(mut self, v: usize) -> Self {
        self.params.profile_samples = v;
        self
    }

    pub fn kepler(mut self, v: KeplerParams) -> Self {
        self.params.kepler = v;
        self
    }

    pub fn phase_convention(mut self, v: PhaseConvention) -> Self {
        self.params.phase_convention = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Validation rules
    /// -----------------
    /// * `window_days >= 1`
    /// * `profile_samples >= 2`
    /// * `kepler` passes [`KeplerParams::validate`]
    pub fn build(self) -> Result<EphemerisParams, OrbPhaseError> {
        let p = self.params;
        if p.window_days == 0 {
            return Err(OrbPhaseError::InvalidEphemerisParameter(
                "window_days must be >= 1".into(),
            ));
        }
        if p.profile_samples < 2 {
            return Err(OrbPhaseError::InvalidProfileSamples(p.profile_samples));
        }
        p.kepler.validate()?;
        Ok(p)
    }
}

/// Vertical strip `[ymin, ymax]` of the chart, in axis units `[0, 1]`.
///
/// Row `i` of `N` owns `[1 − (i+1)/N, 1 − i/N]`, so the first catalog row is drawn on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBand {
    pub ymin: f64,
    pub ymax: f64,
}

impl DisplayBand {
    pub fn for_row(row: usize, rows: usize) -> Self {
        let n = rows as f64;
        DisplayBand {
            ymin: 1.0 - (row + 1) as f64 / n,
            ymax: 1.0 - row as f64 / n,
        }
    }

    /// Where the row label goes: the middle of the band
    pub fn label_position(&self) -> f64 {
        0.5 * (self.ymax - self.ymin) + self.ymin
    }

    /// Map a profile angle in `[0, 1]` into the band.
    pub fn scale(&self, angle: f64) -> f64 {
        angle * (self.ymax - self.ymin) + self.ymin
    }
}

/// Everything computed for one catalog row.
#[derive(Debug, Clone)]
pub struct ObjectEphemeris {
    pub row: usize,
    pub name: String,
    pub period: Day,
    pub eccentricity: f64,
    pub phase: Phase,
    pub profile: Arc<AngleProfile>,
    pub intervals: Vec<CycleInterval>,
    pub band: DisplayBand,
}

/// A catalog row left out of the ephemeris, with the reason.
#[derive(Debug, PartialEq)]
pub struct SkippedObject {
    pub row: usize,
    pub name: String,
    pub error: OrbPhaseError,
}

/// Result of one ephemeris pass, objects in catalog order.
#[derive(Debug)]
pub struct Ephemeris {
    pub anchor_jd: JulianDate,
    pub window_days: u32,
    pub objects: Vec<ObjectEphemeris>,
    pub skipped: Vec<SkippedObject>,
}

impl Ephemeris {
    /// Compute the ephemeris of every catalog object for the window opening at `anchor_jd`.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: objects in display order.
    /// * `anchor_jd`: Julian date of the window start (axis origin), in the units of the
    ///   catalog epochs.
    /// * `params`: pipeline configuration.
    ///
    /// Return
    /// ----------
    /// * The per-object results plus the rows skipped on error.
    /// * [`OrbPhaseError::NonFiniteEpoch`] if `anchor_jd` is not finite.
    pub fn compute(
        catalog: &Catalog,
        anchor_jd: JulianDate,
        params: &EphemerisParams,
    ) -> Result<Self, OrbPhaseError> {
        if !anchor_jd.is_finite() {
            return Err(OrbPhaseError::NonFiniteEpoch(anchor_jd));
        }

        let rows = catalog.len();
        let mut cache = ProfileCache::new();
        let mut objects = Vec::with_capacity(rows);
        let mut skipped = Vec::new();

        for (row, object) in catalog.iter().enumerate() {
            match compute_object(object, row, rows, anchor_jd, params, &mut cache) {
                Ok(obj) => {
                    debug!(
                        row,
                        name = %obj.name,
                        phase = obj.phase,
                        intervals = obj.intervals.len(),
                        "object ephemeris computed"
                    );
                    objects.push(obj);
                }
                Err(error) => {
                    warn!(row, name = %object.name, %error, "skipping catalog object");
                    skipped.push(SkippedObject {
                        row,
                        name: object.name.clone(),
                        error,
                    });
                }
            }
        }

        debug!(
            computed = objects.len(),
            skipped = skipped.len(),
            distinct_profiles = cache.len(),
            "ephemeris pass done"
        );

        Ok(Ephemeris {
            anchor_jd,
            window_days: params.window_days,
            objects,
            skipped,
        })
    }

    pub fn window_length(&self) -> Day {
        self.window_days as f64
    }

    /// Label and label position of every computed row, top to bottom.
    pub fn row_labels(&self) -> Vec<(&str, f64)> {
        self.objects
            .iter()
            .map(|obj| (obj.name.as_str(), obj.band.label_position()))
            .collect()
    }
}

fn compute_object(
    object: &OrbitalObject,
    row: usize,
    rows: usize,
    anchor_jd: JulianDate,
    params: &EphemerisParams,
    cache: &mut ProfileCache,
) -> Result<ObjectEphemeris, OrbPhaseError> {
    object.validate()?;

    let phase = params
        .phase_convention
        .phase_on_date(anchor_jd, object.epoch, object.period)?;
    let profile =
        cache.get_or_compute(object.eccentricity, params.profile_samples, &params.kepler)?;
    let intervals = compose_intervals(&profile, object.period, phase, params.window_length())?;

    Ok(ObjectEphemeris {
        row,
        name: object.name.clone(),
        period: object.period,
        eccentricity: object.eccentricity,
        phase,
        profile,
        intervals,
        band: DisplayBand::for_row(row, rows),
    })
}
