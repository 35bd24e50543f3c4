// Tolerance-aware comparison of two classified cells

use std::borrow::Cow;

use crate::options::Tolerance;
use crate::value::CellValue;

/// Per-cell verdict. Consumed immediately by the counters and the reporter.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome<'a> {
    Match,
    /// Both numeric, absolute difference above tolerance.
    NumericMismatch(f64, f64),
    /// Both textual (or empty), strings differ.
    TextMismatch(Cow<'a, str>, Cow<'a, str>),
    /// One side numeric, the other not. Counted as a text mismatch.
    TypeMismatch(Cow<'a, str>, Cow<'a, str>),
}

impl ComparisonOutcome<'_> {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonOutcome::Match)
    }

    pub fn kind(&self) -> Option<DifferenceKind> {
        match self {
            ComparisonOutcome::Match => None,
            ComparisonOutcome::NumericMismatch(..) => Some(DifferenceKind::Numeric),
            ComparisonOutcome::TextMismatch(..) => Some(DifferenceKind::Text),
            ComparisonOutcome::TypeMismatch(..) => Some(DifferenceKind::Type),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceKind {
    Numeric,
    Text,
    Type,
}

impl DifferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceKind::Numeric => "Numeric",
            DifferenceKind::Text => "Text",
            DifferenceKind::Type => "Type",
        }
    }

    /// Which counter the difference lands in. Type mismatches are text.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DifferenceKind::Numeric)
    }
}

/// Compare two classified cells.
///
/// Numbers match when `|a - b| <= tolerance`; everything else is compared
/// byte for byte with `Empty` standing in for "".
pub fn compare<'a>(
    a: &'a CellValue<'a>,
    b: &'a CellValue<'a>,
    tolerance: Tolerance,
) -> ComparisonOutcome<'a> {
    match (a, b) {
        (CellValue::Number(x, _), CellValue::Number(y, _)) => {
            if (x - y).abs() > tolerance.value() {
                ComparisonOutcome::NumericMismatch(*x, *y)
            } else {
                ComparisonOutcome::Match
            }
        }
        (CellValue::Number(..), _) | (_, CellValue::Number(..)) => {
            ComparisonOutcome::TypeMismatch(a.as_text(), b.as_text())
        }
        _ => {
            let left = a.as_text();
            let right = b.as_text();
            if left == right {
                ComparisonOutcome::Match
            } else {
                ComparisonOutcome::TextMismatch(left, right)
            }
        }
    }
}
