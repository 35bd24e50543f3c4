// Difference reporting with a bounded display limit

use std::fmt;

use crate::compare::{ComparisonOutcome, DifferenceKind};

/// Difference lines shown per comparison run before suppression kicks in.
pub const MAX_REPORTED_DIFFERENCES: usize = 100;

/// What a [`ReportLine`] describes; presentation picks styling from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A region is about to be scanned.
    RegionStart,
    Difference(DifferenceKind),
    /// Emitted once when the display limit is reached.
    Suppressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub kind: LineKind,
    pub text: String,
}

impl ReportLine {
    pub fn is_difference(&self) -> bool {
        matches!(self.kind, LineKind::Difference(_))
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Consumer of report lines, called as soon as each line is produced.
pub trait ReportSink {
    fn emit(&mut self, line: ReportLine);
}

impl ReportSink for Vec<ReportLine> {
    fn emit(&mut self, line: ReportLine) {
        self.push(line);
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, line: ReportLine) {
        (**self).emit(line);
    }
}

/// Sink that drops everything (quiet runs, benchmarks).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn emit(&mut self, _line: ReportLine) {}
}

/// Stateful output governor for one comparison run.
///
/// Forwards up to `limit` difference lines, then emits a single suppression
/// notice and drops the rest. Only display is bounded; callers keep
/// counting every difference themselves.
#[derive(Debug)]
pub struct DifferenceReporter<S> {
    sink: S,
    limit: usize,
    shown: usize,
    received: u64,
    suppressed: bool,
}

impl<S: ReportSink> DifferenceReporter<S> {
    pub fn new(sink: S) -> Self {
        Self::with_limit(sink, MAX_REPORTED_DIFFERENCES)
    }

    pub fn with_limit(sink: S, limit: usize) -> Self {
        Self {
            sink,
            limit,
            shown: 0,
            received: 0,
            suppressed: false,
        }
    }

    pub fn begin_region(&mut self, label: &str) {
        self.sink.emit(ReportLine {
            kind: LineKind::RegionStart,
            text: format!("Comparing {label}"),
        });
    }

    /// Accept one mismatch at a 1-indexed cell. `Match` outcomes are ignored.
    pub fn record(&mut self, region: &str, row: u32, col: u32, outcome: &ComparisonOutcome<'_>) {
        let Some(kind) = outcome.kind() else {
            return;
        };
        self.received += 1;

        if self.shown < self.limit {
            self.shown += 1;
            self.sink.emit(ReportLine {
                kind: LineKind::Difference(kind),
                text: format_difference(region, row, col, outcome),
            });
        } else if !self.suppressed {
            self.suppressed = true;
            log::debug!("difference display limit reached after {} lines", self.shown);
            self.sink.emit(ReportLine {
                kind: LineKind::Suppressed,
                text: format!(
                    "... suppressing further difference output (max {} shown)",
                    self.limit
                ),
            });
        }
    }

    /// Difference lines actually forwarded.
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Every difference offered, shown or not.
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppressed
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn format_difference(region: &str, row: u32, col: u32, outcome: &ComparisonOutcome<'_>) -> String {
    match outcome {
        ComparisonOutcome::NumericMismatch(a, b) => {
            format!("Numeric mismatch at {region}!R{row}C{col}: {a} vs {b}")
        }
        ComparisonOutcome::TextMismatch(a, b) => {
            format!("Text mismatch at {region}!R{row}C{col}: '{a}' vs '{b}'")
        }
        ComparisonOutcome::TypeMismatch(a, b) => {
            format!("Type mismatch at {region}!R{row}C{col}: '{a}' vs '{b}'")
        }
        ComparisonOutcome::Match => String::new(),
    }
}
