mod cubic;
mod quadratic;

pub use cubic::{AdaptiveSegments, CubicCurve};
pub use quadratic::QuadraticCurve;

use crate::error::{ConfigError, Result};
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]` shared by all Bezier curves.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Tolerances controlling the length algorithms.
///
/// Both values are in the same length units as the control points. Smaller
/// values increase accuracy and cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthParams {
    quadratic_tolerance: f64,
    line_tolerance: f64,
}

impl Default for LengthParams {
    fn default() -> Self {
        Self {
            quadratic_tolerance: 0.001,
            line_tolerance: 0.05,
        }
    }
}

impl LengthParams {
    /// Creates a new parameter set.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is not finite and strictly positive.
    pub fn new(quadratic_tolerance: f64, line_tolerance: f64) -> Result<Self> {
        Ok(Self {
            quadratic_tolerance: check_tolerance("quadratic_tolerance", quadratic_tolerance)?,
            line_tolerance: check_tolerance("line_tolerance", line_tolerance)?,
        })
    }

    /// Returns a copy with a different quadratic approximation tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and strictly positive.
    pub fn with_quadratic_tolerance(self, tolerance: f64) -> Result<Self> {
        Self::new(tolerance, self.line_tolerance)
    }

    /// Returns a copy with a different line interpolation tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is not finite and strictly positive.
    pub fn with_line_tolerance(self, tolerance: f64) -> Result<Self> {
        Self::new(self.quadratic_tolerance, tolerance)
    }

    /// Maximum deviation allowed between a cubic piece and its quadratic
    /// approximation in the adaptive length.
    #[must_use]
    pub fn quadratic_tolerance(&self) -> f64 {
        self.quadratic_tolerance
    }

    /// Target spacing between samples in line interpolation.
    #[must_use]
    pub fn line_tolerance(&self) -> f64 {
        self.line_tolerance
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidTolerance { name, value }.into())
    }
}

/// Trait for Bezier curves in 3D space, parameterized over `[0, 1]`.
pub trait Curve {
    /// Returns the control points, first and last being the endpoints.
    fn control_points(&self) -> &[Point3];

    /// Evaluates the curve at parameter `t`.
    ///
    /// Any real `t` is accepted; values outside `[0, 1]` extrapolate.
    fn evaluate(&self, t: f64) -> Point3;

    /// Computes the (non-normalized) first derivative at parameter `t`.
    fn derivative(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    /// Returns the start point.
    fn start(&self) -> Point3 {
        let points = self.control_points();
        points[0]
    }

    /// Returns the end point.
    fn end(&self) -> Point3 {
        let points = self.control_points();
        points[points.len() - 1]
    }

    /// Sum of the distances between consecutive control points.
    fn control_polygon_length(&self) -> f64 {
        self.control_points()
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .sum()
    }

    /// Approximates the length by summing chords between sampled points.
    ///
    /// Samples are spaced `tolerance / |end - start|` apart in parameter
    /// space. A closed curve (zero chord) spaces them by the control polygon
    /// length instead. Converges to the true length as `tolerance` shrinks,
    /// and is meant as a reference for the closed-form lengths.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::float_cmp
    )]
    fn sampled_length(&self, tolerance: f64) -> f64 {
        let start = self.start();
        let chord = (self.end() - start).norm();
        let span = if chord > 0.0 {
            chord
        } else {
            self.control_polygon_length()
        };
        if span == 0.0 {
            return 0.0;
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return chord;
        }

        let steps = ((span / tolerance).ceil() as u64).max(1);
        let mut length = 0.0;
        let mut prev = start;
        for i in 1..=steps {
            let point = self.evaluate(i as f64 / steps as f64);
            length += (point - prev).norm();
            prev = point;
        }
        length
    }
}

/// Either kind of Bezier curve supported by the length queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BezierCurve {
    Quadratic(QuadraticCurve),
    Cubic(CubicCurve),
}

impl From<QuadraticCurve> for BezierCurve {
    fn from(curve: QuadraticCurve) -> Self {
        Self::Quadratic(curve)
    }
}

impl From<CubicCurve> for BezierCurve {
    fn from(curve: CubicCurve) -> Self {
        Self::Cubic(curve)
    }
}

impl Curve for BezierCurve {
    fn control_points(&self) -> &[Point3] {
        match self {
            Self::Quadratic(q) => q.control_points(),
            Self::Cubic(c) => c.control_points(),
        }
    }

    fn evaluate(&self, t: f64) -> Point3 {
        match self {
            Self::Quadratic(q) => q.evaluate(t),
            Self::Cubic(c) => c.evaluate(t),
        }
    }

    fn derivative(&self, t: f64) -> Vector3 {
        match self {
            Self::Quadratic(q) => q.derivative(t),
            Self::Cubic(c) => c.derivative(t),
        }
    }
}
