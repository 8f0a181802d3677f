//! # Phase mapping
//!
//! Converts an absolute time into the fraction of the current orbital cycle elapsed since the
//! reference epoch.
//!
//! Two conventions are provided:
//!
//! * [`phase_on_date`] – `x − trunc(x)` with `x = (t − t0)/P`. Truncation goes toward zero, so
//!   any time **before** the epoch yields a phase in `(−1, 0]`.
//! * [`wrapped_phase_on_date`] – the same quantity folded into `[0, 1)`.
//!
//! The ephemeris pipeline chooses between them through [`PhaseConvention`].
use crate::constants::{Day, JulianDate, Phase};
use crate::orbphase_errors::OrbPhaseError;

/// Which phase definition the pipeline feeds into the cycle compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseConvention {
    /// Truncation toward zero: negative for pre-epoch times.
    Truncated,
    /// Euclidean remainder: always in `[0, 1)`.
    #[default]
    Wrapped,
}

impl PhaseConvention {
    pub fn phase_on_date(
        &self,
        t: JulianDate,
        t0: JulianDate,
        period: Day,
    ) -> Result<Phase, OrbPhaseError> {
        match self {
            PhaseConvention::Truncated => phase_on_date(t, t0, period),
            PhaseConvention::Wrapped => wrapped_phase_on_date(t, t0, period),
        }
    }
}

/// Reject a period that cannot be divided by (zero, negative or NaN).
pub(crate) fn check_period(period: Day) -> Result<(), OrbPhaseError> {
    if period.is_finite() && period > 0.0 {
        Ok(())
    } else {
        Err(OrbPhaseError::NonPositivePeriod(period))
    }
}

fn cycles_since_epoch(t: JulianDate, t0: JulianDate, period: Day) -> Result<f64, OrbPhaseError> {
    check_period(period)?;
    for v in [t, t0] {
        if !v.is_finite() {
            return Err(OrbPhaseError::NonFiniteEpoch(v));
        }
    }
    Ok((t - t0) / period)
}

/// Fractional phase of `t` relative to the epoch `t0`, using truncation toward zero.
///
/// Arguments
/// -----------------
/// * `t`: the time of interest (Julian date).
/// * `t0`: the reference epoch marking phase 0, in the same units.
/// * `period`: orbital period in days, strictly positive.
///
/// Return
/// ----------
/// * `frac((t − t0)/period)`, in `(−1, 1)`; negative when `t < t0` and the elapsed time is not
///   a whole number of periods.
/// * [`OrbPhaseError::NonPositivePeriod`] or [`OrbPhaseError::NonFiniteEpoch`] on invalid input.
pub fn phase_on_date(t: JulianDate, t0: JulianDate, period: Day) -> Result<Phase, OrbPhaseError> {
    let cycles = cycles_since_epoch(t, t0, period)?;
    Ok(cycles - cycles.trunc())
}

/// Fractional phase of `t` relative to the epoch `t0`, folded into `[0, 1)`.
pub fn wrapped_phase_on_date(
    t: JulianDate,
    t0: JulianDate,
    period: Day,
) -> Result<Phase, OrbPhaseError> {
    let phase = cycles_since_epoch(t, t0, period)?.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    Ok(if phase >= 1.0 { 0.0 } else { phase })
}

/// `n` evenly spaced values from `start` to `end`, both ends included.
///
/// The first and last samples are exactly `start` and `end`. `n = 1` yields `[start]`,
/// `n = 0` an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + i as f64 * step
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod phase_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_phase_at_epoch() {
        for period in [0.3, 1.0, 2.867, 25.0] {
            assert_eq!(phase_on_date(2459215.5, 2459215.5, period).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_phase_half_period() {
        for period in [0.5, 1.0, 4.0, 20.0] {
            let t0 = 2459215.5;
            assert_eq!(
                phase_on_date(t0 + 0.5 * period, t0, period).unwrap(),
                0.5
            );
        }
    }

    #[test]
    fn test_phase_several_cycles_later() {
        let phase = phase_on_date(2459230.5, 2459215.5, 4.0).unwrap();
        assert_abs_diff_eq!(phase, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_truncation_before_epoch() {
        let t0 = 100.0;
        let phase = phase_on_date(t0 - 0.25 * 2.0, t0, 2.0).unwrap();
        assert_eq!(phase, -0.25);

        let phase = phase_on_date(t0 - 2.5 * 2.0, t0, 2.0).unwrap();
        assert_eq!(phase, -0.5);

        let wrapped = wrapped_phase_on_date(t0 - 0.25 * 2.0, t0, 2.0).unwrap();
        assert_eq!(wrapped, 0.75);
    }

    #[test]
    fn test_conventions_agree_after_epoch() {
        let (t, t0, p) = (2459300.123, 2459215.5, 3.7);
        assert_eq!(
            PhaseConvention::Truncated.phase_on_date(t, t0, p).unwrap(),
            PhaseConvention::Wrapped.phase_on_date(t, t0, p).unwrap()
        );
    }

    #[test]
    fn test_wrapped_range() {
        for k in -40..40 {
            let t = 1000.0 + k as f64 * 0.37;
            let phase = wrapped_phase_on_date(t, 1000.0, 1.3).unwrap();
            assert!((0.0..1.0).contains(&phase), "t = {t}: {phase}");
        }
        assert_eq!(wrapped_phase_on_date(1000.0, 1000.0, 1.3).unwrap(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            phase_on_date(10.0, 0.0, 0.0),
            Err(OrbPhaseError::NonPositivePeriod(0.0))
        );
        assert_eq!(
            wrapped_phase_on_date(10.0, 0.0, -3.0),
            Err(OrbPhaseError::NonPositivePeriod(-3.0))
        );
        assert!(matches!(
            phase_on_date(f64::INFINITY, 0.0, 1.0),
            Err(OrbPhaseError::NonFiniteEpoch(_))
        ));
        assert!(matches!(
            phase_on_date(1.0, 0.0, f64::NAN),
            Err(OrbPhaseError::NonPositivePeriod(_))
        ));
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

        let grid = linspace(0.0, 3.0, 10_000);
        assert_eq!(grid.len(), 10_000);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[9_999], 3.0);

        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(2.0, 5.0, 0).is_empty());
    }
}
