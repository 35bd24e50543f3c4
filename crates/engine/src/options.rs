// Run configuration handed to the comparison engine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum absolute numeric difference still treated as a match.
///
/// Always non-negative and finite; the only way to build one is
/// [`Tolerance::new`], so nothing downstream re-validates it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Tolerance(f64);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(1e-15);
    pub const ZERO: Tolerance = Tolerance(0.0);

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || value.is_infinite() {
            return Err(ValidationError::NonFiniteTolerance(value));
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeTolerance(value));
        }
        // -0.0 passes the check above; store it as +0.0 so Display stays clean
        Ok(Self(value.abs()))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e}", self.0)
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Where a sheet scan starts when building the scan rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanAnchor {
    /// Scan from row 1 / column 1 up to the furthest populated cell of
    /// either grid.
    #[default]
    Origin,
    /// Scan only the union of the populated bounding boxes.
    Data,
}

impl ScanAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Data => "data",
        }
    }
}

impl FromStr for ScanAnchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "origin" => Ok(Self::Origin),
            "data" => Ok(Self::Data),
            other => Err(format!("unknown scan anchor {other:?} (expected origin or data)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompareOptions {
    pub tolerance: Tolerance,
    pub anchor: ScanAnchor,
}

impl CompareOptions {
    pub fn with_tolerance(tolerance: Tolerance) -> Self {
        Self { tolerance, ..Self::default() }
    }
}
