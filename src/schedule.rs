//! Multiplier schedules for batches of index values
//!
//! Runs one engine over many index values, e.g. to see how the multiplier
//! responds across the whole calibrated window before committing to a plan.

use serde::Serialize;
use std::io;

use crate::engine::MultiplierEngine;
use crate::error::MultiplierError;

/// One evaluated index value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub cape: f64,
    pub multiplier: f64,
}

/// Multipliers for a sequence of index values, in input order
///
/// # Example
/// ```
/// use cape_multiplier::{MultiplierEngine, MultiplierSchedule};
///
/// let engine = MultiplierEngine::default();
/// let schedule = MultiplierSchedule::across_window(&engine, 4).unwrap();
/// assert_eq!(schedule.len(), 5);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiplierSchedule {
    rows: Vec<ScheduleRow>,
}

impl MultiplierSchedule {
    /// Evaluate `steps + 1` evenly spaced values from `index_min` to `index_max`
    pub fn across_window(engine: &MultiplierEngine, steps: usize) -> Result<Self, MultiplierError> {
        if steps == 0 {
            return Err(MultiplierError::EmptySchedule);
        }

        let lo = engine.bounds().index_min();
        let hi = engine.bounds().index_max();
        let values: Vec<f64> = (0..=steps)
            .map(|i| {
                if i == steps {
                    hi
                } else {
                    lo + (hi - lo) * i as f64 / steps as f64
                }
            })
            .collect();

        Self::at(engine, &values)
    }

    /// Evaluate arbitrary index values; the first failure aborts the schedule
    pub fn at(engine: &MultiplierEngine, values: &[f64]) -> Result<Self, MultiplierError> {
        let rows = values
            .iter()
            .map(|&cape| -> Result<ScheduleRow, MultiplierError> {
                Ok(ScheduleRow {
                    cape,
                    multiplier: engine.compute(cape)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write `cape,multiplier` rows with a header line
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
