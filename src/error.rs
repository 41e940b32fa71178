//! Error types for structured error handling.
//!
//! - `DomainError`: a denominator in the mapping hit zero
//! - `MultiplierError`: anything that stops a multiplier from being computed
//! - `CalibrationError`: calibration sources that exist but cannot be used

use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Division by zero inside a primitive.
///
/// Not recoverable locally: the mapping has no meaningful value at these points.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// `reciprocal(0)`
    #[error("reciprocal is undefined at x = 0")]
    ReciprocalOfZero,

    /// `linear_interpolate` with `u1 == u2`
    #[error("interpolation span is empty: u1 = u2 = {at}")]
    EmptySpan { at: f64 },

    /// The index window has zero width
    #[error("index window is empty: index_min == index_max == {at}")]
    EmptyIndexWindow { at: f64 },

    /// The reciprocal slice has zero width
    #[error("reciprocal slice is empty: x1 == x2 == {at}")]
    EmptySlice { at: f64 },

    /// The index window is so narrow or so wide that mapping it overflows
    #[error("index window [{index_min}, {index_max}] cannot be mapped onto the reciprocal slice")]
    IndexWindowOverflow { index_min: f64, index_max: f64 },

    /// The multiplier range is so wide that mapping onto it overflows
    #[error("multiplier range [{mult_min}, {mult_max}] cannot be mapped from the reciprocal slice")]
    MultiplierRangeOverflow { mult_min: f64, mult_max: f64 },
}

/// Failure to compute a multiplier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MultiplierError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A min/max pair with min above max
    #[error("invalid {name} bounds: min {min} is greater than max {max}")]
    InvalidBounds {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{name} must be finite, got {value}")]
    NonFiniteBound { name: &'static str, value: f64 },

    #[error("reciprocal slice must lie right of 0, got x1 = {x1}")]
    SliceNotPositive { x1: f64 },

    #[error("current index value must be finite, got {0}")]
    NonFiniteInput(f64),

    #[error("a schedule needs at least one step")]
    EmptySchedule,
}

/// A calibration source that is present but unusable.
///
/// A missing calibration file is not an error; it simply contributes no override.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("failed to read calibration file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("calibration file {} is neither UTF-16 nor UTF-8 text", .path.display())]
    Decode { path: PathBuf },

    #[error("calibration file {} does not hold a number: {text:?}", .path.display())]
    Parse {
        path: PathBuf,
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("failed to parse overrides file {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts() {
        use std::error::Error as _;

        let err: MultiplierError = DomainError::EmptyIndexWindow { at: 25.0 }.into();
        assert_eq!(err, MultiplierError::Domain(DomainError::EmptyIndexWindow { at: 25.0 }));
        assert_eq!(err.to_string(), "index window is empty: index_min == index_max == 25");

        // The message is not repeated further down the chain
        assert!(err.source().is_none());
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("index window is empty").count(), 1);
    }

    #[test]
    fn test_overflow_errors_name_the_range() {
        let err = DomainError::IndexWindowOverflow { index_min: 0.0, index_max: 1e-310 };
        assert!(err.to_string().starts_with("index window [0, "));

        let err = DomainError::MultiplierRangeOverflow { mult_min: -1.0, mult_max: 1.0 };
        assert!(err.to_string().starts_with("multiplier range [-1, 1]"));
    }

    #[test]
    fn test_invalid_bounds_names_the_pair() {
        let err = MultiplierError::InvalidBounds { name: "index", min: 34.0, max: 21.9 };
        assert_eq!(err.to_string(), "invalid index bounds: min 34 is greater than max 21.9");
    }

    #[test]
    fn test_calibration_error_chains_source() {
        use std::error::Error as _;

        let source = "abc".parse::<f64>().unwrap_err();
        let err = CalibrationError::Parse {
            path: PathBuf::from("min.txt"),
            text: "abc".to_string(),
            source,
        };
        assert_eq!(err.to_string(), "calibration file min.txt does not hold a number: \"abc\"");
        assert!(err.source().is_some());
    }
}
