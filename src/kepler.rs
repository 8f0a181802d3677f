//! # Two-body Kepler solver
//!
//! Maps a fractional orbital phase onto the longitude of a body on an elliptic orbit, and
//! provides the normalized orbital radius at that longitude.
//!
//! The solve is a **fixed-count Newton–Raphson** iteration on Kepler's equation
//!
//! ```text
//! M = 2π·phase
//! E ← E − (E − e·sin E − M) / (1 − e·cos E),   E₀ = M
//! ```
//!
//! followed by the conversion of the eccentric anomaly into the longitude
//!
//! ```text
//! l = 2·atan( √((1+e)/(1−e)) · tan(E/2) ) + π
//! ```
//!
//! The `+ π` shift places the branch cut of `atan` at mid-cycle, so `l(0) = π` and the value is
//! continuous across the cycle boundary (`l(1) ≈ l(0)`).
//!
//! There is no convergence loop: the number of steps is a parameter
//! ([`KeplerParams::iterations`], default [`DEFAULT_KEPLER_ITERATIONS`]). Callers that want
//! numerical guarantees can read the final residual from [`solve_kepler_detailed`] or opt into
//! a residual tolerance, which turns a poor solve into
//! [`OrbPhaseError::NumericNonConvergence`].
//!
//! Only elliptic orbits are supported: any eccentricity outside `[0, 1)` is rejected with
//! [`OrbPhaseError::InvalidEccentricity`].
//!
//! ## See also
//! * [`crate::profile::AngleProfile`] – evaluates the solver on a dense phase grid.
use std::f64::consts::PI;

use crate::constants::{Phase, Radian, DEFAULT_KEPLER_ITERATIONS, DPI};
use crate::orbphase_errors::OrbPhaseError;

/// Tuning of the Kepler solve.
///
/// Fields
/// -----------------
/// * `iterations` – number of Newton–Raphson steps, applied unconditionally.
/// * `residual_tolerance` – when set, a solve whose final residual
///   `|E − e·sin E − M|` exceeds this value fails with
///   [`OrbPhaseError::NumericNonConvergence`]. `None` silently returns the
///   fixed-iteration result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerParams {
    pub iterations: usize,
    pub residual_tolerance: Option<f64>,
}

impl KeplerParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> KeplerParamsBuilder {
        KeplerParamsBuilder::new()
    }

    /// Check the parameters, whether they come from the builder or a struct literal.
    ///
    /// Validation rules
    /// -----------------
    /// * `iterations >= 1`
    /// * `residual_tolerance`, when set, must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), OrbPhaseError> {
        if self.iterations == 0 {
            return Err(OrbPhaseError::InvalidEphemerisParameter(
                "kepler iterations must be >= 1".into(),
            ));
        }
        if let Some(tol) = self.residual_tolerance {
            if !(tol.is_finite() && tol > 0.0) {
                return Err(OrbPhaseError::InvalidEphemerisParameter(
                    "kepler residual tolerance must be finite and > 0".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for KeplerParams {
    fn default() -> Self {
        KeplerParams {
            iterations: DEFAULT_KEPLER_ITERATIONS,
            residual_tolerance: None,
        }
    }
}

/// Builder for [`KeplerParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct KeplerParamsBuilder {
    params: KeplerParams,
}

impl KeplerParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: KeplerParams::default(),
        }
    }

    pub fn iterations(mut self, v: usize) -> Self {
        self.params.iterations = v;
        self
    }

    pub fn residual_tolerance(mut self, v: f64) -> Self {
        self.params.residual_tolerance = Some(v);
        self
    }

    /// Finalize the builder, see [`KeplerParams::validate`].
    pub fn build(self) -> Result<KeplerParams, OrbPhaseError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

/// Full state of one Kepler solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    /// Longitude shifted by π, continuous over one cycle.
    pub longitude: Radian,
    /// `|E − e·sin E − M|` after the last iteration.
    pub residual: f64,
}

/// Reject eccentricities outside the elliptic range `[0, 1)` (NaN included).
pub(crate) fn check_eccentricity(eccentricity: f64) -> Result<(), OrbPhaseError> {
    if (0.0..1.0).contains(&eccentricity) {
        Ok(())
    } else {
        Err(OrbPhaseError::InvalidEccentricity(eccentricity))
    }
}

#[inline]
fn eccentric_anomaly(mean_anomaly: Radian, eccentricity: f64, iterations: usize) -> Radian {
    let mut ecc_anom = mean_anomaly;
    for _ in 0..iterations {
        ecc_anom -= (ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly)
            / (1.0 - eccentricity * ecc_anom.cos());
    }
    ecc_anom
}

#[inline]
fn longitude_from_eccentric_anomaly(ecc_anom: Radian, eccentricity: f64) -> Radian {
    let ratio = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt();
    2.0 * (ratio * (ecc_anom / 2.0).tan()).atan() + PI
}

/// Solve Kepler's equation for one phase and return the shifted longitude.
///
/// Arguments
/// -----------------
/// * `phase`: mean-anomaly fraction, nominally in `[0, 1]`.
/// * `eccentricity`: orbital eccentricity in `[0, 1)`.
/// * `iterations`: number of Newton–Raphson steps (28 in the reference pipeline).
///
/// Return
/// ----------
/// * The longitude `l`, with `l(0) = π`.
/// * [`OrbPhaseError::InvalidEccentricity`] for a non-elliptic eccentricity.
pub fn solve_kepler(
    phase: Phase,
    eccentricity: f64,
    iterations: usize,
) -> Result<Radian, OrbPhaseError> {
    check_eccentricity(eccentricity)?;
    let mean_anomaly = DPI * phase;
    let ecc_anom = eccentric_anomaly(mean_anomaly, eccentricity, iterations);
    Ok(longitude_from_eccentric_anomaly(ecc_anom, eccentricity))
}

/// Solve Kepler's equation and keep the intermediate anomalies and the final residual.
///
/// When `params.residual_tolerance` is set, a residual above it is reported as
/// [`OrbPhaseError::NumericNonConvergence`] instead of being returned silently.
pub fn solve_kepler_detailed(
    phase: Phase,
    eccentricity: f64,
    params: &KeplerParams,
) -> Result<KeplerSolution, OrbPhaseError> {
    check_eccentricity(eccentricity)?;
    let mean_anomaly = DPI * phase;
    let ecc_anom = eccentric_anomaly(mean_anomaly, eccentricity, params.iterations);
    let residual = (ecc_anom - eccentricity * ecc_anom.sin() - mean_anomaly).abs();

    if let Some(tolerance) = params.residual_tolerance {
        // NaN residuals must fail as well
        if !(residual <= tolerance) {
            return Err(OrbPhaseError::NumericNonConvergence {
                residual,
                tolerance,
            });
        }
    }

    Ok(KeplerSolution {
        mean_anomaly,
        eccentric_anomaly: ecc_anom,
        longitude: longitude_from_eccentric_anomaly(ecc_anom, eccentricity),
        residual,
    })
}

/// Vectorized [`solve_kepler`]: one longitude per input phase, in input order.
///
/// The eccentricity is validated once for the whole grid. With a residual tolerance
/// configured, the first failing sample aborts the batch.
pub fn solve_kepler_batch(
    phases: &[Phase],
    eccentricity: f64,
    params: &KeplerParams,
) -> Result<Vec<Radian>, OrbPhaseError> {
    check_eccentricity(eccentricity)?;

    if params.residual_tolerance.is_some() {
        return phases
            .iter()
            .map(|&phase| solve_kepler_detailed(phase, eccentricity, params).map(|s| s.longitude))
            .collect();
    }

    Ok(phases
        .iter()
        .map(|&phase| {
            let ecc_anom = eccentric_anomaly(DPI * phase, eccentricity, params.iterations);
            longitude_from_eccentric_anomaly(ecc_anom, eccentricity)
        })
        .collect())
}

/// Normalized orbital radius `(1 − e²) / (1 + e·cos l)`.
///
/// Pure function, no validation: `eccentricity` is expected in `[0, 1)`.
pub fn distance(eccentricity: f64, longitude: Radian) -> f64 {
    (1.0 - eccentricity.powi(2)) / (1.0 + eccentricity * longitude.cos())
}
