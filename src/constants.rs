//! # Constants and type definitions for orbphase
//!
//! This module centralizes the **numerical constants**, the **tunable defaults** of the
//! phase pipeline, and the **type aliases** shared by the Kepler solver, the phase mapper,
//! the profile generator and the cycle compositor.
//!
//! ## Overview
//!
//! - Trigonometric and calendar constants
//! - Default iteration count, sampling density and window length
//! - Unit aliases used across the crate (days, radians, Julian dates, phases)

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Pipeline defaults
// -------------------------------------------------------------------------------------------------

/// Fixed number of Newton–Raphson steps applied to Kepler's equation.
///
/// Chosen empirically: large enough to converge for every elliptic eccentricity met in
/// practice when starting from `E₀ = M`.
pub const DEFAULT_KEPLER_ITERATIONS: usize = 28;

/// Number of phase samples used to draw one cycle of an angle profile.
pub const DEFAULT_PROFILE_SAMPLES: usize = 10_000;

/// Length of the observation window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 14;

/// Ceiling on the number of full cycles placed in one window.
///
/// A two-week window reaches it only for periods under about 1.2 seconds; anything above is
/// rejected instead of allocating one offset per cycle.
pub const MAX_CYCLE_REPETITIONS: usize = 1_000_000;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in radians
pub type Radian = f64;
/// Duration or time offset in days
pub type Day = f64;
/// Julian Date (days)
pub type JulianDate = f64;
/// Fraction of an orbital cycle
pub type Phase = f64;
