//! Validated calibration bounds

use serde::Serialize;

use crate::error::MultiplierError;

/// Fallback 5-year low of the Shiller PE
pub const DEFAULT_INDEX_MIN: f64 = 21.90;

/// Fallback 5-year high of the Shiller PE
pub const DEFAULT_INDEX_MAX: f64 = 34.03;

/// Multiplier at (or above) the index high
pub const DEFAULT_MULT_MIN: f64 = 1.0;

/// Multiplier at (or below) the index low
pub const DEFAULT_MULT_MAX: f64 = 10.0;

/// Domain and codomain of the mapping
///
/// `index_min..index_max` is the index's recent window (roughly one business cycle,
/// ~5 years). `mult_min..mult_max` is the range the multiplier is mapped onto.
/// Both pairs are finite with min <= max; a pair with min > max is rejected here
/// rather than clamped into nonsense later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalibrationBounds {
    index_min: f64,
    index_max: f64,
    mult_min: f64,
    mult_max: f64,
}

impl CalibrationBounds {
    pub fn new(
        index_min: f64,
        index_max: f64,
        mult_min: f64,
        mult_max: f64,
    ) -> Result<Self, MultiplierError> {
        for (name, value) in [
            ("index_min", index_min),
            ("index_max", index_max),
            ("mult_min", mult_min),
            ("mult_max", mult_max),
        ] {
            if !value.is_finite() {
                return Err(MultiplierError::NonFiniteBound { name, value });
            }
        }

        if index_min > index_max {
            return Err(MultiplierError::InvalidBounds {
                name: "index",
                min: index_min,
                max: index_max,
            });
        }
        if mult_min > mult_max {
            return Err(MultiplierError::InvalidBounds {
                name: "multiplier",
                min: mult_min,
                max: mult_max,
            });
        }

        Ok(Self {
            index_min,
            index_max,
            mult_min,
            mult_max,
        })
    }

    /// Default multiplier range over a custom index window
    pub fn with_index_window(index_min: f64, index_max: f64) -> Result<Self, MultiplierError> {
        Self::new(index_min, index_max, DEFAULT_MULT_MIN, DEFAULT_MULT_MAX)
    }

    pub fn index_min(&self) -> f64 {
        self.index_min
    }

    pub fn index_max(&self) -> f64 {
        self.index_max
    }

    pub fn mult_min(&self) -> f64 {
        self.mult_min
    }

    pub fn mult_max(&self) -> f64 {
        self.mult_max
    }

    /// True when `value` lies inside the calibrated index window
    pub fn contains_index(&self, value: f64) -> bool {
        value >= self.index_min && value <= self.index_max
    }
}

impl Default for CalibrationBounds {
    fn default() -> Self {
        Self {
            index_min: DEFAULT_INDEX_MIN,
            index_max: DEFAULT_INDEX_MAX,
            mult_min: DEFAULT_MULT_MIN,
            mult_max: DEFAULT_MULT_MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bounds = CalibrationBounds::default();
        assert_eq!(bounds.index_min(), 21.90);
        assert_eq!(bounds.index_max(), 34.03);
        assert_eq!(bounds.mult_min(), 1.0);
        assert_eq!(bounds.mult_max(), 10.0);
        assert_eq!(
            CalibrationBounds::new(21.90, 34.03, 1.0, 10.0).unwrap(),
            bounds
        );
    }

    #[test]
    fn test_reversed_index_window_rejected() {
        let result = CalibrationBounds::with_index_window(34.03, 21.90);
        assert_eq!(
            result,
            Err(MultiplierError::InvalidBounds { name: "index", min: 34.03, max: 21.90 })
        );
    }

    #[test]
    fn test_reversed_multiplier_range_rejected() {
        let result = CalibrationBounds::new(21.90, 34.03, 10.0, 1.0);
        assert!(matches!(result, Err(MultiplierError::InvalidBounds { name: "multiplier", .. })));
    }

    #[test]
    fn test_equal_window_accepted() {
        // Caught later as an empty interpolation span
        assert!(CalibrationBounds::with_index_window(25.0, 25.0).is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = CalibrationBounds::with_index_window(f64::NAN, 34.03);
        assert!(matches!(result, Err(MultiplierError::NonFiniteBound { name: "index_min", .. })));

        let result = CalibrationBounds::new(21.90, 34.03, 1.0, f64::INFINITY);
        assert!(matches!(result, Err(MultiplierError::NonFiniteBound { name: "mult_max", .. })));
    }

    #[test]
    fn test_contains_index() {
        let bounds = CalibrationBounds::default();
        assert!(bounds.contains_index(21.90));
        assert!(bounds.contains_index(27.77));
        assert!(bounds.contains_index(34.03));
        assert!(!bounds.contains_index(21.89));
        assert!(!bounds.contains_index(40.0));
    }
}
