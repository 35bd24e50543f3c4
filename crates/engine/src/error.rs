use std::fmt;

/// Invalid caller input, rejected before any I/O or scanning happens.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Tolerance below zero.
    NegativeTolerance(f64),
    /// Tolerance is NaN or infinite.
    NonFiniteTolerance(f64),
    /// Region label is empty or whitespace only.
    EmptyRegionLabel,
    /// File path is empty or whitespace only.
    EmptyPath,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeTolerance(t) => write!(f, "tolerance must be non-negative, got {t}"),
            Self::NonFiniteTolerance(t) => write!(f, "tolerance must be a finite number, got {t}"),
            Self::EmptyRegionLabel => write!(f, "region label cannot be empty"),
            Self::EmptyPath => write!(f, "file path cannot be empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
