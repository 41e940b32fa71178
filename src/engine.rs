//! Multiplier engine: the two-stage mapping through the reciprocal slice
//!
//! Think of `1/x` drawn on plain axes. Two data sets are laid onto those axes:
//! - X axis: the index window `[index_min, index_max]` is stretched over `[P1.x, P2.x]`
//! - Y axis: the multiplier range is laid over `[P2.y, P1.y]`, upside down
//!
//! The current index is moved onto the X axis, pushed through `1/x`, and the
//! result read back off the Y axis as a multiplier. Over the upper part of the
//! window the curve is nearly flat, so the multiplier stays close to `mult_min`;
//! as the index falls toward its low the curve steepens and the multiplier
//! accelerates toward `mult_max`.

use log::{debug, warn};

use crate::calibration::CalibrationBounds;
use crate::curve::{clamp, linear_interpolate, reciprocal, ReciprocalSlice};
use crate::error::{DomainError, MultiplierError};

/// Stateless mapping from the current index value to an investment multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiplierEngine {
    bounds: CalibrationBounds,
    slice: ReciprocalSlice,
}

impl MultiplierEngine {
    /// Engine over the default reciprocal slice
    pub fn new(bounds: CalibrationBounds) -> Self {
        Self::with_slice(bounds, ReciprocalSlice::default())
    }

    /// Engine over a custom slice of `1/x`
    pub fn with_slice(bounds: CalibrationBounds, slice: ReciprocalSlice) -> Self {
        Self { bounds, slice }
    }

    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    pub fn slice(&self) -> &ReciprocalSlice {
        &self.slice
    }

    /// Multiplier for `current_index`
    ///
    /// 1. Interpolate the index from `[index_min, index_max]` onto `[P1.x, P2.x]` and
    ///    clamp to that range. The clamp keeps x away from 0 for indices far below
    ///    the window.
    /// 2. Take the reciprocal.
    /// 3. Interpolate the result from `[P1.y, P2.y]` onto `[mult_max, mult_min]`.
    ///
    /// The result of step 3 is returned as is; it is not clamped to the multiplier
    /// range.
    ///
    /// # Errors
    /// - `NonFiniteInput` for a NaN or infinite index
    /// - `Domain(EmptyIndexWindow)` when `index_min == index_max`
    /// - `Domain(EmptySlice)` when the slice has zero width
    /// - `Domain(IndexWindowOverflow)` / `Domain(MultiplierRangeOverflow)` when a range
    ///   is too narrow or too wide to map without leaving finite `f64`
    pub fn compute(&self, current_index: f64) -> Result<f64, MultiplierError> {
        if !current_index.is_finite() {
            return Err(MultiplierError::NonFiniteInput(current_index));
        }

        let b = &self.bounds;
        let (p1, p2) = (self.slice.p1(), self.slice.p2());

        if !b.contains_index(current_index) {
            warn!(
                "index {} is outside the calibrated window [{}, {}]",
                current_index,
                b.index_min(),
                b.index_max()
            );
        }

        let x = linear_interpolate(current_index, b.index_min(), b.index_max(), p1.x, p2.x)
            .map_err(|_| DomainError::EmptyIndexWindow { at: b.index_min() })?;
        // Subnormal or near-overflow windows turn the slope into inf or 0 and x into NaN
        if !x.is_finite() {
            return Err(DomainError::IndexWindowOverflow {
                index_min: b.index_min(),
                index_max: b.index_max(),
            }
            .into());
        }
        let x_clamped = clamp(x, p1.x, p2.x);
        let y = reciprocal(x_clamped)?;

        // 10 and 1 look backwards: the reciprocal falls as x grows, so P1.y pairs with mult_max
        let multiplier = linear_interpolate(y, p1.y, p2.y, b.mult_max(), b.mult_min())
            .map_err(|_| DomainError::EmptySlice { at: p1.x })?;
        if !multiplier.is_finite() {
            return Err(DomainError::MultiplierRangeOverflow {
                mult_min: b.mult_min(),
                mult_max: b.mult_max(),
            }
            .into());
        }

        debug!(
            "index {} -> x {} (clamped {}) -> y {} -> multiplier {}",
            current_index, x, x_clamped, y, multiplier
        );
        Ok(multiplier)
    }
}

impl Default for MultiplierEngine {
    fn default() -> Self {
        Self::new(CalibrationBounds::default())
    }
}

/// Multiplier for `current_index` under `bounds`, over the default slice
pub fn compute(current_index: f64, bounds: &CalibrationBounds) -> Result<f64, MultiplierError> {
    MultiplierEngine::new(*bounds).compute(current_index)
}
