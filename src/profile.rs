//! # Angle profiles
//!
//! An [`AngleProfile`] is the per-cycle "active angle" curve of one object: a dense sampling of
//!
//! ```text
//! angle(phase) = (π − |l(phase) − π|) / π ∈ [0, 1]
//! ```
//!
//! over `phase ∈ [0, 1]` (both ends included), where `l` is the shifted longitude returned by
//! the [Kepler solver](crate::kepler). The fold around `π` gives a single lobe per cycle: the
//! curve peaks at `1` where `l = π` (phase 0) and drops to `0` half an orbit away.
//!
//! A profile depends only on the eccentricity and the sampling parameters, never on time.
//! It is computed once per object and shared read-only (through [`Arc`]) by every
//! [`CycleInterval`](crate::cycles::CycleInterval) placed for that object. [`ProfileCache`]
//! extends the reuse across objects with identical parameters.
use std::f64::consts::PI;
use std::sync::Arc;

use ahash::AHashMap;
use itertools::Itertools;
use tracing::trace;

use crate::constants::Phase;
use crate::kepler::{solve_kepler_batch, KeplerParams};
use crate::orbphase_errors::OrbPhaseError;
use crate::phase::linspace;

/// Dense `(phase, angle)` sampling of one orbital cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleProfile {
    eccentricity: f64,
    phases: Vec<Phase>,
    angles: Vec<f64>,
}

/// Location of the profile maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfilePeak {
    pub index: usize,
    pub phase: Phase,
    pub angle: f64,
}

impl AngleProfile {
    /// Sample the angle curve of an orbit.
    ///
    /// Arguments
    /// -----------------
    /// * `eccentricity`: orbital eccentricity in `[0, 1)`.
    /// * `samples`: number of evenly spaced phases in `[0, 1]`, at least 2.
    /// * `params`: Kepler solver tuning (iteration count, optional residual check).
    ///
    /// Return
    /// ----------
    /// * The sampled profile, or the solver / sampling error.
    pub fn new(
        eccentricity: f64,
        samples: usize,
        params: &KeplerParams,
    ) -> Result<Self, OrbPhaseError> {
        if samples < 2 {
            return Err(OrbPhaseError::InvalidProfileSamples(samples));
        }

        let phases = linspace(0.0, 1.0, samples);
        let angles = solve_kepler_batch(&phases, eccentricity, params)?
            .into_iter()
            .map(|l| (PI - (l - PI).abs()) / PI)
            .collect_vec();

        Ok(AngleProfile {
            eccentricity,
            phases,
            angles,
        })
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Iterate over the `(phase, angle)` pairs in phase order.
    pub fn samples(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        self.phases.iter().copied().zip(self.angles.iter().copied())
    }

    /// First sample holding the maximum angle.
    pub fn peak(&self) -> ProfilePeak {
        let (index, angle) = self
            .angles
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, a)| {
                if a > best.1 {
                    (i, a)
                } else {
                    best
                }
            });

        ProfilePeak {
            index,
            phase: self.phases[index],
            angle,
        }
    }

    /// Angle at an arbitrary phase, linearly interpolated between grid samples.
    ///
    /// Phases outside `[0, 1]` are folded back into one cycle first.
    pub fn angle_at(&self, phase: Phase) -> f64 {
        let phase = if (0.0..=1.0).contains(&phase) {
            phase
        } else {
            phase.rem_euclid(1.0)
        };

        let last = self.len() - 1;
        let pos = phase * last as f64;
        let i = (pos.floor() as usize).min(last - 1);
        let frac = pos - i as f64;

        self.angles[i] + frac * (self.angles[i + 1] - self.angles[i])
    }
}

type ProfileKey = (u64, usize, usize, Option<u64>);

/// Memo of computed profiles, keyed on the exact solve parameters.
///
/// Two objects with bit-identical eccentricities (and the same sampling and solver settings)
/// share a single [`AngleProfile`].
#[derive(Debug, Default)]
pub struct ProfileCache {
    profiles: AHashMap<ProfileKey, Arc<AngleProfile>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Return the cached profile for these parameters, computing it on first request.
    ///
    /// Errors are not cached: a failing request is retried (and fails again) on the next call.
    pub fn get_or_compute(
        &mut self,
        eccentricity: f64,
        samples: usize,
        params: &KeplerParams,
    ) -> Result<Arc<AngleProfile>, OrbPhaseError> {
        let key = (
            eccentricity.to_bits(),
            samples,
            params.iterations,
            params.residual_tolerance.map(f64::to_bits),
        );

        if let Some(profile) = self.profiles.get(&key) {
            trace!(eccentricity, samples, "angle profile cache hit");
            return Ok(Arc::clone(profile));
        }

        let profile = Arc::new(AngleProfile::new(eccentricity, samples, params)?);
        self.profiles.insert(key, Arc::clone(&profile));
        Ok(profile)
    }
}

#[cfg(test)]
mod profile_test {
    use super::*;
    use crate::constants::DEFAULT_PROFILE_SAMPLES;
    use crate::kepler::solve_kepler;
    use approx::assert_abs_diff_eq;

    fn profile(e: f64) -> AngleProfile {
        AngleProfile::new(e, DEFAULT_PROFILE_SAMPLES, &KeplerParams::default()).unwrap()
    }

    #[test]
    fn test_profile_is_idempotent() {
        assert_eq!(profile(0.37), profile(0.37));
    }

    #[test]
    fn test_cycle_closure_and_range() {
        for i in 0..=9 {
            let e = i as f64 / 10.0;
            let p = profile(e);
            assert_eq!(p.len(), DEFAULT_PROFILE_SAMPLES);
            assert_eq!(p.phases()[0], 0.0);
            assert_eq!(p.phases()[p.len() - 1], 1.0);
            assert_abs_diff_eq!(p.angles()[0], p.angles()[p.len() - 1], epsilon = 1e-9);
            assert!(p.angles().iter().all(|a| (0.0..=1.0).contains(a)));
        }
    }

    #[test]
    fn test_peak_where_longitude_is_pi() {
        for e in [0.0, 0.2, 0.5, 0.8] {
            let peak = profile(e).peak();
            assert_eq!(peak.index, 0);
            assert_eq!(peak.angle, 1.0);
            let l = solve_kepler(peak.phase, e, KeplerParams::default().iterations).unwrap();
            assert_eq!(l, PI);
        }
    }

    #[test]
    fn test_profile_symmetry() {
        let p = profile(0.6);
        let n = p.len();
        for i in (0..n).step_by(97) {
            assert_abs_diff_eq!(p.angles()[i], p.angles()[n - 1 - i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_circular_profile_is_triangular() {
        let p = profile(0.0);
        assert_abs_diff_eq!(p.angle_at(0.25), 0.5, epsilon = 1e-9);
        // the grid straddles the trough: interpolation error is half a step
        assert_abs_diff_eq!(p.angle_at(0.5), 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.angle_at(0.75), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(p.angle_at(1.25), p.angle_at(0.25), epsilon = 1e-12);
        assert_eq!(p.angle_at(0.0), 1.0);
    }

    #[test]
    fn test_eccentric_lobe_is_narrower() {
        // high eccentricity spends less time near periapsis: the lobe shrinks
        let circ = profile(0.0).angle_at(0.1);
        let ecc = profile(0.7).angle_at(0.1);
        assert!(ecc < circ, "{ecc} >= {circ}");
    }

    #[test]
    fn test_invalid_samples() {
        assert_eq!(
            AngleProfile::new(0.1, 1, &KeplerParams::default()),
            Err(OrbPhaseError::InvalidProfileSamples(1))
        );
        assert!(matches!(
            AngleProfile::new(1.2, 100, &KeplerParams::default()),
            Err(OrbPhaseError::InvalidEccentricity(_))
        ));
    }

    #[test]
    fn test_cache_shares_profiles() {
        let mut cache = ProfileCache::new();
        let params = KeplerParams::default();

        let a = cache.get_or_compute(0.3, 500, &params).unwrap();
        let b = cache.get_or_compute(0.3, 500, &params).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        let c = cache.get_or_compute(0.31, 500, &params).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);

        assert!(cache.get_or_compute(1.0, 500, &params).is_err());
        assert_eq!(cache.len(), 2);
    }
}
