//! The reciprocal shaping curve and the interpolation primitives built on it
//!
//! The multiplier mapping never uses a closed-form formula. It takes a hand-picked
//! slice of `1/x` and moves values onto and off that slice with two linear maps:
//! - `reciprocal`, `linear_interpolate`, `clamp`: the scalar primitives
//! - `Point`, `ReciprocalSlice`: the two anchor points of the slice
//! - `interpolate_x`, `interpolate_y`: the chord P1→P2 read in either direction

mod primitives;
mod slice;

pub use primitives::{clamp, linear_interpolate, reciprocal};
pub use slice::{interpolate_x, interpolate_y, Point, ReciprocalSlice, X1, X2};
