//! Error types for polygon assembly.

use std::fmt;

/// Errors that can occur when configuring a builder.
///
/// Assembly itself never fails; edges that cannot be placed into any loop
/// are reported through the unused-edge output instead.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderError {
    /// The edge splice fraction must be zero (splicing disabled) or lie in
    /// [sqrt(2)/2, 1]. Below sqrt(2)/2 the triangle inequality no longer
    /// keeps spliced vertices clear of the unsplit remainder, and splicing
    /// can cascade without limit.
    InvalidSpliceFraction(f64),

    /// The vertex merge radius must be a finite angle >= 0 radians.
    InvalidMergeRadius(f64),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::InvalidSpliceFraction(v) => {
                write!(
                    f,
                    "invalid edge splice fraction {}: must be 0 or in [sqrt(2)/2, 1]",
                    v
                )
            }
            BuilderError::InvalidMergeRadius(v) => {
                write!(f, "invalid vertex merge radius {}: must be >= 0 radians", v)
            }
        }
    }
}

impl std::error::Error for BuilderError {}
