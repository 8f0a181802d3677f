//! # Cycle interval composition
//!
//! Places whole-cycle repetitions of an [`AngleProfile`] on the observation-window time axis.
//!
//! The window axis starts at `0` (the anchor time) and ends at `window_length` days. With the
//! object at phase `φ` at the anchor, repetition `n` starts at
//!
//! ```text
//! start_offset(n) = n·P − φ·P
//! ```
//!
//! so repetition `0` begins (slightly) before the window whenever `φ > 0`.
//!
//! Margin policy
//! -----------------
//! With `k = floor(window_length / P)` full cycles inside the window:
//!
//! * `k = 0` (period longer than the window): exactly two repetitions, `n = 0` and `n = 1`,
//!   so the single active interval is drawn even when it straddles the window start.
//! * otherwise: `k + 2` repetitions, `n = 0 ..= k + 1`, which always reaches past the trailing
//!   edge whatever the phase alignment.
//!
//! The number of full cycles is capped at [`MAX_CYCLE_REPETITIONS`]: a period so short that the
//! window holds more cycles than that fails with [`OrbPhaseError::TooManyCycles`].
//!
//! Intervals are over-provisioned on purpose. Clipping to `[0, window_length]` is left to the
//! consumer. Each offset is computed from its own `n`, never by accumulating periods, so
//! placement stays period-exact over hundreds of cycles.
use std::sync::Arc;

use crate::constants::{Day, Phase, MAX_CYCLE_REPETITIONS};
use crate::orbphase_errors::OrbPhaseError;
use crate::phase::check_period;
use crate::profile::AngleProfile;

/// Number of full cycles that fit in the window (`floor(window_length / period)`).
///
/// Fails with [`OrbPhaseError::TooManyCycles`] when the count reaches
/// [`MAX_CYCLE_REPETITIONS`] or is not a number.
pub fn cycle_count(window_length: Day, period: Day) -> Result<usize, OrbPhaseError> {
    let cycles = (window_length / period).floor();
    if !(cycles < MAX_CYCLE_REPETITIONS as f64) {
        return Err(OrbPhaseError::TooManyCycles {
            period,
            window_length,
        });
    }
    Ok(cycles.max(0.0) as usize)
}

fn check_window(window_length: Day) -> Result<(), OrbPhaseError> {
    if window_length.is_finite() && window_length >= 0.0 {
        Ok(())
    } else {
        Err(OrbPhaseError::InvalidWindowLength(window_length))
    }
}

/// Start offsets of every repetition needed to cover `[0, window_length]`.
///
/// Arguments
/// -----------------
/// * `period`: orbital period in days, strictly positive.
/// * `phase`: phase of the object at the window start.
/// * `window_length`: window length in days, finite and non-negative.
///
/// Return
/// ----------
/// * The offsets `n·P − φ·P` in increasing `n` order, following the margin policy of this
///   module.
pub fn cycle_offsets(
    period: Day,
    phase: Phase,
    window_length: Day,
) -> Result<Vec<Day>, OrbPhaseError> {
    check_period(period)?;
    check_window(window_length)?;
    if !phase.is_finite() {
        return Err(OrbPhaseError::InvalidEphemerisParameter(format!(
            "phase must be finite, got {phase}"
        )));
    }

    let repetitions = match cycle_count(window_length, period)? {
        0 => 2,
        full_cycles => full_cycles
            .checked_add(2)
            .ok_or(OrbPhaseError::TooManyCycles {
                period,
                window_length,
            })?,
    };

    let shift = phase * period;
    Ok((0..repetitions)
        .map(|n| n as f64 * period - shift)
        .collect())
}

/// One repetition of an object's profile, placed on the window axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleInterval {
    /// Repetition index `n`.
    pub cycle: usize,
    pub start_offset: Day,
    pub period: Day,
    pub profile: Arc<AngleProfile>,
}

impl CycleInterval {
    pub fn end_offset(&self) -> Day {
        self.start_offset + self.period
    }

    /// True when some part of the repetition lies inside `[0, window_length]`.
    pub fn overlaps(&self, window_length: Day) -> bool {
        self.end_offset() >= 0.0 && self.start_offset <= window_length
    }

    /// The profile mapped onto the window axis: `(start_offset + phase·P, angle)`.
    pub fn time_samples(&self) -> impl Iterator<Item = (Day, f64)> + '_ {
        self.profile
            .samples()
            .map(move |(phase, angle)| (self.start_offset + phase * self.period, angle))
    }
}

/// Place the repetitions of `profile` covering the window, see [`cycle_offsets`].
///
/// All the returned intervals share the same profile allocation.
pub fn compose_intervals(
    profile: &Arc<AngleProfile>,
    period: Day,
    phase: Phase,
    window_length: Day,
) -> Result<Vec<CycleInterval>, OrbPhaseError> {
    Ok(cycle_offsets(period, phase, window_length)?
        .into_iter()
        .enumerate()
        .map(|(cycle, start_offset)| CycleInterval {
            cycle,
            start_offset,
            period,
            profile: Arc::clone(profile),
        })
        .collect())
}
