//! CAPE Multiplier - how much to invest this period, from the Shiller PE
//!
//! The result is a multiplier on a baseline amount (1.50 * $1000 => invest $1500).
//! While the Shiller PE sits near its recent high the multiplier stays at or near
//! its minimum; the further the index drops toward its recent low, the higher the
//! multiplier climbs and the faster it accelerates.
//!
//! This library provides:
//! - The reciprocal shaping curve and its interpolation primitives
//! - Validated calibration bounds and their file/JSON override sources
//! - The multiplier engine
//! - Multiplier schedules across the calibrated window

pub mod curve;
pub mod calibration;
pub mod engine;
pub mod error;
pub mod schedule;

// Re-export commonly used types
pub use calibration::{CalibrationBounds, CalibrationOverrides};
pub use curve::{Point, ReciprocalSlice};
pub use engine::{compute, MultiplierEngine};
pub use error::{CalibrationError, DomainError, MultiplierError};
pub use schedule::{MultiplierSchedule, ScheduleRow};
