//! Calibration of the mapping: the recent index window and the multiplier range

mod bounds;
pub mod loader;

pub use bounds::{
    CalibrationBounds, DEFAULT_INDEX_MAX, DEFAULT_INDEX_MIN, DEFAULT_MULT_MAX, DEFAULT_MULT_MIN,
};
pub use loader::{read_calibration_value, CalibrationOverrides, MAX_FILE, MIN_FILE};
