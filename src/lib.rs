//! # orbphase
//!
//! Orbital-phase ephemerides for periodic objects (eclipsing binaries and similar), built for
//! a multi-day visibility chart:
//!
//! * [`kepler`] – fixed-iteration Kepler solve and normalized orbital radius.
//! * [`phase`] – calendar time → fractional orbital phase.
//! * [`profile`] – per-cycle normalized "active angle" curve of an object.
//! * [`cycles`] – placement of profile repetitions over the observation window.
//! * [`catalog`] / [`time`] – object table loading and window anchoring.
//! * [`ephemeris`] – the whole pass over a catalog, with per-object error reporting.
//!
//! Chart rendering and sunrise/sunset computation are left to the caller.
pub mod catalog;
pub mod constants;
pub mod cycles;
pub mod ephemeris;
pub mod kepler;
pub mod orbphase_errors;
pub mod phase;
pub mod profile;
pub mod time;
