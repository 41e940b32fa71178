//! The hand-picked slice of the reciprocal curve

use serde::{Deserialize, Serialize};

use super::primitives::{linear_interpolate, reciprocal};
use crate::error::{DomainError, MultiplierError};

/// Left edge of the reciprocal slice. Hand tuned in a graphing tool; moving it
/// toward 0 makes the multiplier climb harder near the index low.
pub const X1: f64 = 0.1;

/// Right edge of the reciprocal slice
pub const X2: f64 = 2.0;

/// An (x, y) pair on the shaping curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `(x, 1/x)`
    pub fn on_reciprocal(x: f64) -> Result<Self, DomainError> {
        Ok(Self { x, y: reciprocal(x)? })
    }
}

/// Map an x value across the chord `p1 → p2` to its y value
pub fn interpolate_x(x: f64, p1: Point, p2: Point) -> Result<f64, DomainError> {
    linear_interpolate(x, p1.x, p2.x, p1.y, p2.y)
}

/// Map a y value across the chord `p1 → p2` back to its x value
pub fn interpolate_y(y: f64, p1: Point, p2: Point) -> Result<f64, DomainError> {
    linear_interpolate(y, p1.y, p2.y, p1.x, p2.x)
}

/// Segment of `1/x` between two anchor points P1 (left) and P2 (right)
///
/// The current index is mapped onto `[P1.x, P2.x]` and the multiplier range onto
/// `[P2.y, P1.y]`. Both anchors sit at x > 0, so the slice never crosses the pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReciprocalSlice {
    p1: Point,
    p2: Point,
}

impl ReciprocalSlice {
    /// Build the slice between `x1` and `x2`
    ///
    /// Rejects non-finite edges, `x1 > x2`, and edges at or left of 0. Equal edges are
    /// accepted here; the engine reports them as an empty span when it runs.
    pub fn new(x1: f64, x2: f64) -> Result<Self, MultiplierError> {
        if !x1.is_finite() {
            return Err(MultiplierError::NonFiniteBound { name: "slice x1", value: x1 });
        }
        if !x2.is_finite() {
            return Err(MultiplierError::NonFiniteBound { name: "slice x2", value: x2 });
        }
        if x1 > x2 {
            return Err(MultiplierError::InvalidBounds {
                name: "reciprocal slice",
                min: x1,
                max: x2,
            });
        }

        let p1 = Point::on_reciprocal(x1)?;
        let p2 = Point::on_reciprocal(x2)?;
        if x1 < 0.0 {
            return Err(MultiplierError::SliceNotPositive { x1 });
        }

        Ok(Self { p1, p2 })
    }

    /// Left anchor, where the multiplier peaks
    pub fn p1(&self) -> Point {
        self.p1
    }

    /// Right anchor, where the multiplier bottoms out
    pub fn p2(&self) -> Point {
        self.p2
    }
}

impl Default for ReciprocalSlice {
    fn default() -> Self {
        Self {
            p1: Point::new(X1, 1.0 / X1),
            p2: Point::new(X2, 1.0 / X2),
        }
    }
}
