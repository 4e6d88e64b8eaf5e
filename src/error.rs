use thiserror::Error;

/// Errors raised while preparing input for a Voronoi computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoronoiError {
    #[error("Invalid extent: min {min:?} must be finite and strictly below max {max:?}")]
    InvalidExtent { min: [f64; 2], max: [f64; 2] },
    #[error("Non-finite coordinate for input {index}: ({x}, {y})")]
    NonFiniteCoordinate { index: usize, x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, VoronoiError>;
