//! Arc length of quadratic and cubic Bezier curves in 3D space.
//!
//! Three strategies are available:
//! - the closed-form integral for quadratics ([`QuadraticCurve::length`]),
//! - adaptive subdivision of cubics into quadratic pieces
//!   ([`CubicCurve::length`]),
//! - line interpolation, as a reference for both
//!   ([`QuadraticCurve::interpolated_length`], [`CubicCurve::interpolated_length`]).
//!
//! All length computations are pure functions of the control points and a
//! [`LengthParams`] value.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{BezierError, Result};
pub use geometry::curve::{CubicCurve, Curve, LengthParams, QuadraticCurve};
