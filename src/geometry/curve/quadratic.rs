use crate::error::{GeometryError, Result};
use crate::math::{interpolate, is_zero_xy, Point3, Vector3};

use super::{CubicCurve, Curve, LengthParams};

/// A quadratic Bezier curve in 3D space.
///
/// The parametric form is `P(t) = (1-t)^2 A + 2t(1-t) B + t^2 C` for
/// `t` in `[0, 1]`, with `A` and `C` the endpoints and `B` the control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticCurve {
    points: [Point3; 3],
}

impl QuadraticCurve {
    /// Creates a new quadratic curve from start, control and end points.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self { points: [a, b, c] }
    }

    /// Returns the start point.
    #[must_use]
    pub fn a(&self) -> &Point3 {
        &self.points[0]
    }

    /// Returns the control point.
    #[must_use]
    pub fn b(&self) -> &Point3 {
        &self.points[1]
    }

    /// Returns the end point.
    #[must_use]
    pub fn c(&self) -> &Point3 {
        &self.points[2]
    }

    /// Computes the exact arc length by integrating the speed in closed form.
    ///
    /// With `A0 = B - A` and `A1 = A - 2B + C` the squared speed is the
    /// polynomial `a + b t + c t^2`, whose square root integrates to an
    /// algebraic term plus a logarithmic term weighted by the discriminant
    /// `q = 4ac - b^2`.
    ///
    /// Degenerate inputs are handled before the integral:
    /// - `A == C`: `0` if `B == A`, otherwise `|A - B|` (out and back).
    /// - `B == A` or `B == C`: the straight segment `|A - C|`.
    /// - `A1` zero in X and Y: the doubled segment `2 |A0|`. The Z component
    ///   of `A1` is not inspected here.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn length(&self) -> f64 {
        if let Some(length) = self.degenerate_length() {
            return length;
        }

        let [a, b, c] = &self.points;
        let a0: Vector3 = b - a;
        let a1: Vector3 = a.coords - 2.0 * b.coords + c.coords;
        if is_zero_xy(&a1) {
            return 2.0 * a0.norm();
        }

        let ka = 4.0 * a0.dot(&a0);
        let kb = 8.0 * a0.dot(&a1);
        let kc = 4.0 * a1.dot(&a1);
        let q = 4.0 * ka * kc - kb * kb;
        let two_c_plus_b = 2.0 * kc + kb;
        let sum_cba = kc + kb + ka;

        let l0 = (0.25 / kc) * (two_c_plus_b * sum_cba.sqrt() - kb * ka.sqrt());
        if q == 0.0 {
            return l0;
        }

        let l1 = (q / (8.0 * kc.powf(1.5)))
            * ((2.0 * (kc * sum_cba).sqrt() + two_c_plus_b).ln()
                - (2.0 * (kc * ka).sqrt() + kb).ln());
        if l1.is_finite() {
            l0 + l1
        } else {
            // q is rounding noise around zero and a log argument hit zero.
            l0
        }
    }

    /// Reference length by line interpolation with the default line tolerance.
    #[must_use]
    pub fn interpolated_length(&self) -> f64 {
        self.interpolated_length_with(LengthParams::default().line_tolerance())
    }

    /// Reference length by line interpolation, sampling every
    /// `tolerance / |C - A|` in parameter space.
    ///
    /// Applies the same degenerate checks as [`length`](Self::length), so a
    /// zero chord never reaches the sampler.
    #[must_use]
    pub fn interpolated_length_with(&self, tolerance: f64) -> f64 {
        self.degenerate_length()
            .unwrap_or_else(|| self.sampled_length(tolerance))
    }

    /// Splits the curve at `t` into two quadratics covering `[0, t]` and `[t, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is not strictly between 0 and 1.
    pub fn split_at(&self, t: f64) -> Result<(Self, Self)> {
        check_split_parameter(t)?;
        let [a, b, c] = &self.points;
        let ab = interpolate(a, b, t);
        let bc = interpolate(b, c, t);
        let m = interpolate(&ab, &bc, t);
        Ok((Self::new(*a, ab, m), Self::new(m, bc, *c)))
    }

    /// Returns the cubic curve tracing exactly the same points.
    #[must_use]
    pub fn elevate(&self) -> CubicCurve {
        let [a, b, c] = &self.points;
        CubicCurve::new(
            *a,
            interpolate(a, b, 2.0 / 3.0),
            interpolate(c, b, 2.0 / 3.0),
            *c,
        )
    }

    /// Returns the same curve traversed from `C` to `A`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let [a, b, c] = self.points;
        Self::new(c, b, a)
    }

    fn degenerate_length(&self) -> Option<f64> {
        let [a, b, c] = &self.points;
        if a == c {
            return Some(if a == b { 0.0 } else { (a - b).norm() });
        }
        if b == a || b == c {
            return Some((a - c).norm());
        }
        None
    }
}

impl Curve for QuadraticCurve {
    fn control_points(&self) -> &[Point3] {
        &self.points
    }

    fn evaluate(&self, t: f64) -> Point3 {
        let [a, b, c] = &self.points;
        let mt = 1.0 - t;
        Point3::from(a.coords * (mt * mt) + b.coords * (2.0 * t * mt) + c.coords * (t * t))
    }

    fn derivative(&self, t: f64) -> Vector3 {
        let [a, b, c] = &self.points;
        let a0 = b - a;
        let a1 = a.coords - 2.0 * b.coords + c.coords;
        2.0 * (a0 + a1 * t)
    }
}

/// Rejects split parameters outside the open unit interval.
pub(super) fn check_split_parameter(t: f64) -> Result<()> {
    if t > 0.0 && t < 1.0 {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BezierError;
    use crate::math::is_zero;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn arch() -> QuadraticCurve {
        QuadraticCurve::new(p(0.0, 0.0, 0.0), p(1.0, 2.0, 0.0), p(2.0, 0.0, 0.0))
    }

    // ── evaluate / derivative ──

    #[test]
    fn evaluate_endpoints_and_midpoint() {
        let q = arch();
        assert_eq!(q.evaluate(0.0), p(0.0, 0.0, 0.0));
        assert_eq!(q.evaluate(1.0), p(2.0, 0.0, 0.0));
        assert_eq!(q.evaluate(0.5), p(1.0, 1.0, 0.0));
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let q = QuadraticCurve::new(p(0.0, 1.0, 2.0), p(3.0, -1.0, 0.5), p(1.0, 4.0, -2.0));
        let h = 1e-6;
        for t in [0.1, 0.5, 0.8] {
            let fd = (q.evaluate(t + h) - q.evaluate(t - h)) / (2.0 * h);
            let d = q.derivative(t);
            assert_abs_diff_eq!(d.x, fd.x, epsilon = 1e-6);
            assert_abs_diff_eq!(d.y, fd.y, epsilon = 1e-6);
            assert_abs_diff_eq!(d.z, fd.z, epsilon = 1e-6);
        }
    }

    // ── length ──

    #[test]
    fn closed_form_matches_interpolation() {
        let curves = [
            arch(),
            QuadraticCurve::new(p(0.0, 0.0, 0.0), p(5.0, 1.0, 3.0), p(1.0, 6.0, -2.0)),
            QuadraticCurve::new(p(-3.0, 2.0, 1.0), p(0.0, 0.0, 0.0), p(4.0, 4.0, 4.0)),
        ];
        for q in curves {
            let exact = q.length();
            let sampled = q.interpolated_length_with(0.001);
            assert!(
                ((exact - sampled) / exact).abs() <= 0.01,
                "closed form {exact} vs sampled {sampled}"
            );
            // inscribed polylines never exceed the true length
            assert!(sampled <= exact + 1e-9);
        }
    }

    #[test]
    fn straight_symmetric_curve_is_chord() {
        // A1 = 0: control point at the chord midpoint
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(2.0, 2.0, 0.0));
        assert_relative_eq!(q.length(), 8.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_point_curve_has_zero_length() {
        let a = p(1.0, 2.0, 3.0);
        let q = QuadraticCurve::new(a, a, a);
        assert_relative_eq!(q.length(), 0.0);
        assert_relative_eq!(q.interpolated_length(), 0.0);
    }

    #[test]
    fn coincident_endpoints_go_out_and_back() {
        let a = p(1.0, 1.0, 1.0);
        let b = p(4.0, 5.0, 1.0);
        let q = QuadraticCurve::new(a, b, a);
        assert_relative_eq!(q.length(), 5.0);
        assert_relative_eq!(q.interpolated_length(), 5.0);
    }

    #[test]
    fn control_point_on_endpoint_is_straight() {
        let a = p(0.0, 0.0, 0.0);
        let c = p(3.0, 0.0, 4.0);
        assert_relative_eq!(QuadraticCurve::new(a, a, c).length(), 5.0);
        assert_relative_eq!(QuadraticCurve::new(a, c, c).length(), 5.0);
        assert_relative_eq!(QuadraticCurve::new(a, c, c).interpolated_length(), 5.0);
    }

    #[test]
    fn collinear_overshoot_regression() {
        // control point beyond the end: the curve runs past C and turns back
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
        let length = q.length();
        assert!(length.is_finite());
        assert_relative_eq!(length, 5.0 / 3.0, epsilon = 1e-12);
        assert!((length - q.interpolated_length()).abs() <= 0.01);
    }

    #[test]
    fn collinear_between_endpoints_uses_log_free_branch() {
        // discriminant vanishes for any collinear control point
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(0.5, 0.0, 0.0), p(4.0, 0.0, 0.0));
        let length = q.length();
        assert!(length.is_finite());
        assert_relative_eq!(length, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn z_only_second_difference_takes_doubled_segment_branch() {
        // A1 = (0, 0, 1): zero in X/Y only, so the straight-segment branch
        // is taken even though the curve is not a symmetric straight line.
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(0.0, 0.0, 1.0), p(0.0, 0.0, 3.0));
        let a1 = q.a().coords - 2.0 * q.b().coords + q.c().coords;
        assert!(is_zero_xy(&a1));
        assert!(!is_zero(&a1));

        assert_relative_eq!(q.length(), 2.0);
        // the true length along z is 3
        assert_relative_eq!(q.interpolated_length_with(0.001), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolation_error_shrinks_with_tolerance() {
        // chord 2 and power-of-two tolerances give nested sample sets
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.5), p(2.0, 0.0, 0.0));
        let exact = q.length();
        let mut last = f64::INFINITY;
        for tol in [0.125, 0.015_625, 0.001_953_125] {
            let diff = (q.interpolated_length_with(tol) - exact).abs();
            assert!(diff <= last, "tolerance {tol}: {diff} > {last}");
            last = diff;
        }
    }

    #[test]
    fn length_is_direction_independent() {
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(5.0, 1.0, 3.0), p(1.0, 6.0, -2.0));
        assert_relative_eq!(q.length(), q.reversed().length(), epsilon = 1e-9);
    }

    // ── split / elevate ──

    #[test]
    fn split_halves_follow_original() {
        let q = QuadraticCurve::new(p(0.0, 0.0, 0.0), p(5.0, 1.0, 3.0), p(1.0, 6.0, -2.0));
        let t = 0.4;
        let (first, second) = q.split_at(t).unwrap();
        for i in 0..=10 {
            let s = f64::from(i) / 10.0;
            let lhs = q.evaluate(t * s);
            let rhs = first.evaluate(s);
            assert_abs_diff_eq!((lhs - rhs).norm(), 0.0, epsilon = 1e-12);
            let lhs = q.evaluate(t + (1.0 - t) * s);
            let rhs = second.evaluate(s);
            assert_abs_diff_eq!((lhs - rhs).norm(), 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(first.length() + second.length(), q.length(), epsilon = 1e-9);
    }

    #[test]
    fn split_rejects_out_of_range_parameter() {
        for t in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = arch().split_at(t).unwrap_err();
            assert!(matches!(
                err,
                BezierError::Geometry(GeometryError::ParameterOutOfRange { parameter: "t", .. })
            ));
        }
    }

    #[test]
    fn elevation_traces_same_points() {
        let q = arch();
        let c = q.elevate();
        for i in 0..=8 {
            let t = f64::from(i) / 8.0;
            assert_abs_diff_eq!((q.evaluate(t) - c.evaluate(t)).norm(), 0.0, epsilon = 1e-12);
        }
    }
}
