use crate::geometry::curve::{BezierCurve, LengthParams};

/// Strategy used to compute a curve length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMethod {
    /// Closed form for quadratics, adaptive quadratic subdivision for cubics.
    ClosedForm,
    /// Closed form of the single midpoint quadratic. Identical to
    /// [`ClosedForm`](Self::ClosedForm) for quadratics.
    MidpointQuadratic,
    /// Sum of chords between sampled points, spaced by the line tolerance.
    Interpolated,
}

/// Computes the length of a Bezier curve with a chosen method.
pub struct CurveLength {
    curve: BezierCurve,
    method: LengthMethod,
}

impl CurveLength {
    /// Creates a new `CurveLength` query.
    #[must_use]
    pub fn new(curve: impl Into<BezierCurve>, method: LengthMethod) -> Self {
        Self {
            curve: curve.into(),
            method,
        }
    }

    /// Executes the query, returning the curve length.
    #[must_use]
    pub fn execute(&self, params: &LengthParams) -> f64 {
        match (&self.curve, self.method) {
            (BezierCurve::Quadratic(q), LengthMethod::ClosedForm | LengthMethod::MidpointQuadratic) => {
                q.length()
            }
            (BezierCurve::Quadratic(q), LengthMethod::Interpolated) => {
                q.interpolated_length_with(params.line_tolerance())
            }
            (BezierCurve::Cubic(c), LengthMethod::ClosedForm) => c.length_with(params),
            (BezierCurve::Cubic(c), LengthMethod::MidpointQuadratic) => c.quadratic_length(),
            (BezierCurve::Cubic(c), LengthMethod::Interpolated) => {
                c.interpolated_length_with(params.line_tolerance())
            }
        }
    }
}
