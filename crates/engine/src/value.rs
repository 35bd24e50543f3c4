// Cell classification: raw source values into Number / Text / Empty

use std::borrow::Cow;
use std::fmt;

/// A cell as an adapter hands it over, before classification.
///
/// Structured sources (worksheets) know when a cell is numeric; text
/// sources only ever produce `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell<'a> {
    Number(f64),
    Text(Cow<'a, str>),
}

impl<'a> RawCell<'a> {
    pub fn text(s: &'a str) -> Self {
        RawCell::Text(Cow::Borrowed(s))
    }
}

/// Classified cell value. Classification happens once per cell; the
/// comparator only ever matches on these three cases.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue<'a> {
    /// Parsed value, plus the source text when the cell arrived as text.
    Number(f64, Option<Cow<'a, str>>),
    Text(Cow<'a, str>),
    #[default]
    Empty,
}

impl<'a> CellValue<'a> {
    /// Classify a raw cell. An absent cell and a cell holding the empty
    /// string both become `Empty`.
    pub fn classify(raw: Option<RawCell<'a>>) -> Self {
        match raw {
            None => CellValue::Empty,
            Some(RawCell::Number(n)) => CellValue::Number(n, None),
            Some(RawCell::Text(s)) => {
                if s.is_empty() {
                    CellValue::Empty
                } else if let Some(n) = parse_number(&s) {
                    CellValue::Number(n, Some(s))
                } else {
                    CellValue::Text(s)
                }
            }
        }
    }

    /// A number with no source text (structured cells, tests).
    pub fn number(n: f64) -> Self {
        CellValue::Number(n, None)
    }

    /// Classify a delimited-text field.
    pub fn from_field(field: &'a str) -> Self {
        Self::classify(Some(RawCell::text(field)))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(..))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(..) => false,
        }
    }

    /// Text form used for byte-wise comparison and display. `Empty` is "";
    /// a text-sourced number keeps its original spelling.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Number(_, Some(raw)) => Cow::Borrowed(raw.as_ref()),
            CellValue::Number(n, None) => Cow::Owned(n.to_string()),
        }
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(_, Some(raw)) => f.write_str(raw),
            CellValue::Number(n, None) => write!(f, "{n}"),
        }
    }
}

/// Parse a culture-invariant floating-point literal.
///
/// Accepts optional surrounding ASCII whitespace, an optional sign, digits
/// with at most one decimal point, and an optional exponent. Named values
/// (`NaN`, `inf`, `Infinity`), hex and digit grouping are rejected.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    if trimmed.is_empty() || !is_float_literal(trimmed.as_bytes()) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn is_float_literal(bytes: &[u8]) -> bool {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
