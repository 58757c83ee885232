pub mod curve;

pub use curve::{
    AdaptiveSegments, BezierCurve, CubicCurve, Curve, CurveDomain, LengthParams, QuadraticCurve,
};
