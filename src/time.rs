use hifitime::{Duration, Epoch};
use std::str::FromStr;

use crate::constants::{Day, JulianDate, SECONDS_PER_DAY};
use crate::orbphase_errors::OrbPhaseError;

/// Julian date (UTC) of an epoch
pub fn epoch_to_jd(epoch: Epoch) -> JulianDate {
    epoch.to_jde_utc_days()
}

/// Epoch of a Julian date expressed in UTC
///
/// Argument
/// --------
/// * `jd`: the Julian date, must be finite
///
/// Return
/// ------
/// * the corresponding epoch or [`OrbPhaseError::NonFiniteEpoch`]
pub fn jd_to_epoch(jd: JulianDate) -> Result<Epoch, OrbPhaseError> {
    if !jd.is_finite() {
        return Err(OrbPhaseError::NonFiniteEpoch(jd));
    }
    Ok(Epoch::from_jde_utc(jd))
}

/// Parse a date such as `2021-01-01T00:00:00` (UTC unless a time scale is given)
pub fn parse_epoch(date: &str) -> Result<Epoch, OrbPhaseError> {
    Epoch::from_str(date).map_err(|e| OrbPhaseError::InvalidDate(format!("{date}: {e}")))
}

fn day_duration(n: f64) -> Duration {
    Duration::from_seconds(n * SECONDS_PER_DAY)
}

/// The calendar span shown on the chart: `days` civil days starting at a local midnight.
///
/// The window axis runs from `0` (local midnight, `start`) to `days`. A fixed UTC offset is
/// used for the site, no daylight-saving rules are applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservingWindow {
    /// UTC instant of the local midnight opening the window
    pub start: Epoch,
    pub utc_offset_hours: f64,
    pub days: u32,
}

impl ObservingWindow {
    /// Window opening at the last local midnight before (or at) `now`.
    ///
    /// Arguments
    /// ---------
    /// * `now`: current instant
    /// * `utc_offset_hours`: site local time minus UTC, in hours (e.g. `-10.0` for Hawaii)
    /// * `days`: window length in days
    pub fn starting_local_midnight(now: Epoch, utc_offset_hours: f64, days: u32) -> Self {
        let offset = Duration::from_seconds(utc_offset_hours * 3600.0);
        let (year, month, day, _, _, _, _) = (now + offset).to_gregorian_utc();
        let local_midnight = Epoch::from_gregorian_utc_at_midnight(year, month, day);

        ObservingWindow {
            start: local_midnight - offset,
            utc_offset_hours,
            days,
        }
    }

    pub fn start_jd(&self) -> JulianDate {
        epoch_to_jd(self.start)
    }

    pub fn length_days(&self) -> Day {
        self.days as f64
    }

    /// Position of an epoch on the window axis, in days since `start`
    pub fn offset_of(&self, epoch: Epoch) -> Day {
        (epoch - self.start).to_seconds() / SECONDS_PER_DAY
    }

    /// `dd.mm` label of every local midnight `0..=days`
    pub fn day_labels(&self) -> Vec<String> {
        let local_start = self.start + Duration::from_seconds(self.utc_offset_hours * 3600.0);
        (0..=self.days)
            .map(|i| {
                let (_, month, day, _, _, _, _) =
                    (local_start + day_duration(i as f64)).to_gregorian_utc();
                format!("{day:02}.{month:02}")
            })
            .collect()
    }
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_epoch_to_jd() {
        let epoch = Epoch::from_gregorian_utc_at_midnight(2021, 1, 1);
        assert_eq!(epoch_to_jd(epoch), 2459215.5);

        let back = jd_to_epoch(2459215.5).unwrap();
        assert_abs_diff_eq!(epoch_to_jd(back), 2459215.5, epsilon = 1e-9);
        assert!(jd_to_epoch(f64::NAN).is_err());
    }

    #[test]
    fn test_parse_epoch() {
        let epoch = parse_epoch("2021-01-01T00:00:00").unwrap();
        assert_eq!(epoch, Epoch::from_gregorian_utc_at_midnight(2021, 1, 1));
        assert!(matches!(
            parse_epoch("not a date"),
            Err(OrbPhaseError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_local_midnight_west_of_greenwich() {
        // 05:30 UTC on Jan 1st is 19:30 on Dec 31st in Hawaii
        let now = Epoch::from_gregorian_utc(2021, 1, 1, 5, 30, 0, 0);
        let window = ObservingWindow::starting_local_midnight(now, -10.0, 14);

        assert_eq!(
            window.start,
            Epoch::from_gregorian_utc(2020, 12, 31, 10, 0, 0, 0)
        );
        assert_abs_diff_eq!(window.start_jd(), 2459214.5 + 10.0 / 24.0, epsilon = 1e-6);
        assert_eq!(window.length_days(), 14.0);
        assert_abs_diff_eq!(window.offset_of(now), 19.5 / 24.0, epsilon = 1e-9);
    }

    #[test]
    fn test_day_labels() {
        let now = Epoch::from_gregorian_utc(2021, 1, 1, 5, 30, 0, 0);
        let window = ObservingWindow::starting_local_midnight(now, -10.0, 2);
        assert_eq!(window.day_labels(), vec!["31.12", "01.01", "02.01"]);
    }

    #[test]
    fn test_local_midnight_at_utc() {
        let now = Epoch::from_gregorian_utc(2024, 3, 10, 23, 59, 0, 0);
        let window = ObservingWindow::starting_local_midnight(now, 0.0, 7);
        assert_eq!(window.start, Epoch::from_gregorian_utc_at_midnight(2024, 3, 10));
        assert_eq!(window.day_labels().len(), 8);
    }
}
