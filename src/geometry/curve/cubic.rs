use tracing::{debug, trace};

use crate::error::Result;
use crate::math::{interpolate, Point3, Vector3};

use super::quadratic::check_split_parameter;
use super::{Curve, LengthParams, QuadraticCurve};

/// A cubic Bezier curve in 3D space.
///
/// The parametric form is
/// `P(t) = A + 3t(B - A) + 3t^2(C - 2B + A) + t^3(D - 3C + 3B - A)`
/// for `t` in `[0, 1]`, with `A` and `D` the endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicCurve {
    points: [Point3; 4],
}

impl CubicCurve {
    /// Creates a new cubic curve from its four control points.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3, d: Point3) -> Self {
        Self {
            points: [a, b, c, d],
        }
    }

    /// Returns the start point.
    #[must_use]
    pub fn a(&self) -> &Point3 {
        &self.points[0]
    }

    /// Returns the first control point.
    #[must_use]
    pub fn b(&self) -> &Point3 {
        &self.points[1]
    }

    /// Returns the second control point.
    #[must_use]
    pub fn c(&self) -> &Point3 {
        &self.points[2]
    }

    /// Returns the end point.
    #[must_use]
    pub fn d(&self) -> &Point3 {
        &self.points[3]
    }

    /// Splits the curve at `t` with De Casteljau's algorithm.
    ///
    /// The first curve covers `[0, t]` of the original parameter range and
    /// the second covers `[t, 1]`. The split is exact.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is not strictly between 0 and 1.
    pub fn split_at(&self, t: f64) -> Result<(Self, Self)> {
        check_split_parameter(t)?;
        Ok(self.subdivide(t))
    }

    fn subdivide(&self, t: f64) -> (Self, Self) {
        let [a, b, c, d] = &self.points;
        let ab = interpolate(a, b, t);
        let bc = interpolate(b, c, t);
        let cd = interpolate(c, d, t);
        let m = interpolate(&ab, &bc, t);
        let n = interpolate(&bc, &cd, t);
        let p = self.evaluate(t);
        (Self::new(*a, ab, m, p), Self::new(p, n, cd, *d))
    }

    /// Returns the single quadratic `(A, Q, D)` approximating this cubic,
    /// with `Q = (3C - D + 3B - A) / 4`.
    #[must_use]
    pub fn midpoint_quadratic(&self) -> QuadraticCurve {
        let [a, b, c, d] = &self.points;
        let q = (3.0 * c.coords - d.coords + 3.0 * b.coords - a.coords) / 4.0;
        QuadraticCurve::new(*a, Point3::from(q), *d)
    }

    /// Length of the [midpoint quadratic](Self::midpoint_quadratic).
    ///
    /// Constant time, but only accurate for gently curving pieces.
    #[must_use]
    pub fn quadratic_length(&self) -> f64 {
        self.midpoint_quadratic().length()
    }

    /// Adaptive length with the default tolerances.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_with(&LengthParams::default())
    }

    /// Adaptive length: the sum of the quadratic lengths of the pieces
    /// produced by [`adaptive_segments`](Self::adaptive_segments).
    #[must_use]
    pub fn length_with(&self, params: &LengthParams) -> f64 {
        let (count, length) = self
            .adaptive_segments(params)
            .fold((0_usize, 0.0), |(count, length), segment| {
                (count + 1, length + segment.quadratic_length())
            });
        debug!(segments = count, length, "adaptive cubic length");
        length
    }

    /// Walks the curve from `A` to `D`, cutting off pieces small enough that
    /// each one's midpoint quadratic stays within the quadratic tolerance.
    #[must_use]
    pub fn adaptive_segments(&self, params: &LengthParams) -> AdaptiveSegments {
        AdaptiveSegments {
            current: Some(*self),
            tolerance: params.quadratic_tolerance(),
        }
    }

    /// Parameter at which to cut so the first piece's midpoint quadratic
    /// deviates by at most `tolerance`.
    ///
    /// Infinite when the third difference vanishes (the cubic is already a
    /// quadratic).
    fn split_threshold(&self, tolerance: f64) -> f64 {
        // 18 / sqrt(3)
        const SPLIT_FACTOR: f64 = 10.392_304_845_413_264;

        let d01 = self.third_difference().norm() / 2.0;
        (SPLIT_FACTOR * tolerance / d01).cbrt()
    }

    /// `D - 3C + 3B - A`, zero iff the cubic is a quadratic (or lower).
    fn third_difference(&self) -> Vector3 {
        let [a, b, c, d] = &self.points;
        d.coords - 3.0 * c.coords + 3.0 * b.coords - a.coords
    }

    /// Reference length by line interpolation with the default line tolerance.
    #[must_use]
    pub fn interpolated_length(&self) -> f64 {
        self.interpolated_length_with(LengthParams::default().line_tolerance())
    }

    /// Reference length by line interpolation, sampling every
    /// `tolerance / |D - A|` in parameter space.
    #[must_use]
    pub fn interpolated_length_with(&self, tolerance: f64) -> f64 {
        self.sampled_length(tolerance)
    }

    /// Returns the same curve traversed from `D` to `A`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let [a, b, c, d] = self.points;
        Self::new(d, c, b, a)
    }
}

impl Curve for CubicCurve {
    fn control_points(&self) -> &[Point3] {
        &self.points
    }

    fn evaluate(&self, t: f64) -> Point3 {
        let [a, b, c, _] = &self.points;
        let first = b - a;
        let second = c.coords - 2.0 * b.coords + a.coords;
        let third = self.third_difference();
        a + first * (3.0 * t) + second * (3.0 * t * t) + third * (t * t * t)
    }

    fn derivative(&self, t: f64) -> Vector3 {
        let [a, b, c, _] = &self.points;
        let first = b - a;
        let second = c.coords - 2.0 * b.coords + a.coords;
        let third = self.third_difference();
        first * 3.0 + second * (6.0 * t) + third * (3.0 * t * t)
    }
}

/// Iterator over the pieces of a cubic curve used by the adaptive length.
///
/// Each step computes the split threshold of the remaining piece. While it
/// lies strictly inside `(0, 1)` the piece is cut there and the head is
/// yielded; otherwise the remaining piece is yielded whole and iteration
/// ends. A vanishing third difference (or non-finite input) therefore
/// yields a single piece.
#[derive(Debug, Clone)]
pub struct AdaptiveSegments {
    current: Option<CubicCurve>,
    tolerance: f64,
}

impl Iterator for AdaptiveSegments {
    type Item = CubicCurve;

    fn next(&mut self) -> Option<CubicCurve> {
        let current = self.current.take()?;
        let t_max = current.split_threshold(self.tolerance);
        if t_max > 0.0 && t_max < 1.0 {
            trace!(t_max, "splitting cubic segment");
            let (head, tail) = current.subdivide(t_max);
            self.current = Some(tail);
            Some(head)
        } else {
            Some(current)
        }
    }
}

impl std::iter::FusedIterator for AdaptiveSegments {}
