use std::env;

use camino::Utf8PathBuf;
use orbphase::catalog::Catalog;
use orbphase::ephemeris::{Ephemeris, EphemerisParams};
use orbphase::orbphase_errors::OrbPhaseError;
use orbphase::time::{parse_epoch, ObservingWindow};
use tracing_subscriber::EnvFilter;

/// Print, for each catalog object, the times (window days) where its profile peaks.
///
/// Usage:
///   two_week_chart <objects.csv> <now, e.g. 2024-05-01T12:00:00> [utc_offset_hours]
fn main() -> Result<(), OrbPhaseError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: {} <objects.csv> <now> [utc_offset_hours]", args[0]);
        std::process::exit(2);
    }

    let path = Utf8PathBuf::from(&args[1]);
    let now = parse_epoch(&args[2])?;
    let utc_offset = match args.get(3) {
        Some(v) => v
            .parse::<f64>()
            .map_err(|e| OrbPhaseError::InvalidEphemerisParameter(format!("{v}: {e}")))?,
        None => -10.0,
    };

    let catalog = Catalog::from_csv_path(&path)?;
    let params = EphemerisParams::default();
    let window = ObservingWindow::starting_local_midnight(now, utc_offset, params.window_days);
    let ephemeris = Ephemeris::compute(&catalog, window.start_jd(), &params)?;

    println!("days: {}", window.day_labels().join(" "));
    for obj in &ephemeris.objects {
        let peaks: Vec<String> = obj
            .intervals
            .iter()
            .map(|i| i.start_offset)
            .filter(|t| (0.0..=ephemeris.window_length()).contains(t))
            .map(|t| format!("{t:.2}"))
            .collect();
        println!(
            "{:<16} P={:>9.4} e={:.3} phase={:.3} peaks at [{}]",
            obj.name,
            obj.period,
            obj.eccentricity,
            obj.phase,
            peaks.join(", ")
        );
    }
    for skipped in &ephemeris.skipped {
        println!("{:<16} skipped: {}", skipped.name, skipped.error);
    }

    Ok(())
}
