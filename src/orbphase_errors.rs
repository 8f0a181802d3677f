use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrbPhaseError {
    #[error("Invalid eccentricity {0}: expected a value in [0, 1)")]
    InvalidEccentricity(f64),

    #[error("Non-positive orbital period: {0} days")]
    NonPositivePeriod(f64),

    #[error("Kepler solver did not converge: residual {residual:e} above tolerance {tolerance:e}")]
    NumericNonConvergence { residual: f64, tolerance: f64 },

    #[error("Invalid number of profile samples: {0} (at least 2 are required)")]
    InvalidProfileSamples(usize),

    #[error("Invalid observation window length: {0} days")]
    InvalidWindowLength(f64),

    #[error("Too many cycles: period {period} days over a {window_length} days window")]
    TooManyCycles { period: f64, window_length: f64 },

    #[error("Invalid ephemeris parameter: {0}")]
    InvalidEphemerisParameter(String),

    #[error("Non-finite epoch or time coordinate: {0}")]
    NonFiniteEpoch(f64),

    #[error("Unable to read the object catalog: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl PartialEq for OrbPhaseError {
    fn eq(&self, other: &Self) -> bool {
        use OrbPhaseError::*;
        match (self, other) {
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a == b,
            (NonPositivePeriod(a), NonPositivePeriod(b)) => a == b,
            (
                NumericNonConvergence {
                    residual: ra,
                    tolerance: ta,
                },
                NumericNonConvergence {
                    residual: rb,
                    tolerance: tb,
                },
            ) => ra == rb && ta == tb,
            (InvalidProfileSamples(a), InvalidProfileSamples(b)) => a == b,
            (InvalidWindowLength(a), InvalidWindowLength(b)) => a == b,
            (
                TooManyCycles {
                    period: pa,
                    window_length: wa,
                },
                TooManyCycles {
                    period: pb,
                    window_length: wb,
                },
            ) => pa == pb && wa == wb,
            (InvalidEphemerisParameter(a), InvalidEphemerisParameter(b)) => a == b,
            (NonFiniteEpoch(a), NonFiniteEpoch(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,

            // Wrapped errors are not comparable: equal when the variant matches
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
