use thiserror::Error;

/// Top-level error type for curve length computations.
#[derive(Debug, Error)]
pub enum BezierError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric operations on curves.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range ({min}, {max})")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors related to length computation parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance {name} = {value} must be finite and positive")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Convenience type alias for results using [`BezierError`].
pub type Result<T> = std::result::Result<T, BezierError>;
