mod compare;
mod length;

pub use compare::{CompareLengths, LengthComparison};
pub use length::{CurveLength, LengthMethod};
