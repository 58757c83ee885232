use crate::geometry::curve::QuadraticCurve;

/// Closed-form and interpolated lengths of one quadratic curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthComparison {
    /// Length from the closed-form integral.
    pub closed_form: f64,
    /// Length from line interpolation.
    pub interpolated: f64,
}

impl LengthComparison {
    /// Absolute difference between the two lengths.
    #[must_use]
    pub fn difference(&self) -> f64 {
        (self.closed_form - self.interpolated).abs()
    }

    /// Returns whether both lengths are finite and differ by at most `bound`.
    #[must_use]
    pub fn agrees_within(&self, bound: f64) -> bool {
        self.closed_form.is_finite() && self.interpolated.is_finite() && self.difference() <= bound
    }
}

/// Cross-checks the closed-form length of a quadratic against line
/// interpolation. Used to validate degenerate and near-degenerate inputs.
pub struct CompareLengths {
    curve: QuadraticCurve,
    tolerance: f64,
}

impl CompareLengths {
    /// Creates a new `CompareLengths` query sampling every `tolerance` units.
    #[must_use]
    pub fn new(curve: QuadraticCurve, tolerance: f64) -> Self {
        Self { curve, tolerance }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> LengthComparison {
        LengthComparison {
            closed_form: self.curve.length(),
            interpolated: self.curve.interpolated_length_with(self.tolerance),
        }
    }
}
