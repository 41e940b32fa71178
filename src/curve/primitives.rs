//! Scalar primitives: reciprocal, two-point linear interpolation, clamp

use crate::error::DomainError;

/// Multiplicative inverse `1/x`
///
/// Fails with `DomainError::ReciprocalOfZero` when `x == 0`.
pub fn reciprocal(x: f64) -> Result<f64, DomainError> {
    if x == 0.0 {
        return Err(DomainError::ReciprocalOfZero);
    }
    Ok(1.0 / x)
}

/// General two-point linear interpolation
///
/// Given a known value `un` on the line through `(u1, v1)` and `(u2, v2)`, return the
/// matching `vn`:
///
/// ```text
/// vn = v1 + (un - u1) * ((v2 - v1) / (u2 - u1))
/// ```
///
/// `un` is not bounds-checked, so values outside `[u1, u2]` extrapolate along the same
/// line. Fails with `DomainError::EmptySpan` when `u1 == u2`.
pub fn linear_interpolate(
    un: f64,
    u1: f64,
    u2: f64,
    v1: f64,
    v2: f64,
) -> Result<f64, DomainError> {
    let span = u2 - u1;
    if span == 0.0 {
        return Err(DomainError::EmptySpan { at: u1 });
    }
    Ok(v1 + (un - u1) * ((v2 - v1) / span))
}

/// Restrict `value` to `[min, max]` inclusive
///
/// Unlike `f64::clamp` this never panics; callers must still guarantee `min <= max`.
/// NaN passes through unchanged.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    debug_assert!(min <= max, "clamp called with min {} > max {}", min, max);
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
