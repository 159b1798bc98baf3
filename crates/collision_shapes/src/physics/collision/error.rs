//! Construction and inversion errors for collision geometry

/// Errors raised while building shapes, rays or inverting transforms
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A flat coordinate array was too short for the requested shape
    #[error("Expected at least {expected} coordinates, found {found}")]
    TooFewCoordinates {
        /// Coordinates the shape needs
        expected: usize,
        /// Coordinates supplied
        found: usize,
    },

    /// Ellipses need at least three boundary samples to enclose an area
    #[error("Invalid ellipse sample count: {0} (must be at least 3)")]
    InvalidSampleCount(usize),

    /// A ray direction had zero length
    #[error("Ray direction is degenerate")]
    DegenerateDirection,

    /// A transform with zero scale cannot be inverted
    #[error("Transform is not invertible")]
    NonInvertibleTransform,
}
