//! Helpers on top of the `nalgebra` vector types.
//!
//! Arithmetic, `dot`, `cross` and `norm` come straight from `nalgebra`. None
//! of these helpers validate their input: division by zero and non-finite
//! coordinates propagate as IEEE-754 infinities and NaNs.

use super::{Point3, Vector3};

/// Linearly interpolates between two points: `a * (1 - t) + b * t`.
///
/// `t` is not clamped, so values outside `[0, 1]` extrapolate along the line.
#[must_use]
pub fn interpolate(a: &Point3, b: &Point3, t: f64) -> Point3 {
    Point3::from(a.coords * (1.0 - t) + b.coords * t)
}

/// Returns `true` if the X and Y components are both exactly zero.
///
/// The Z component is ignored. This is the predicate the quadratic closed
/// form uses to detect a vanishing second difference; see [`is_zero`] for the
/// three-axis check.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_zero_xy(v: &Vector3) -> bool {
    v.x == 0.0 && v.y == 0.0
}

/// Returns `true` if all three components are exactly zero.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_zero(v: &Vector3) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}
