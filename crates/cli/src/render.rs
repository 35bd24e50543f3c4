// Console presentation of report lines, banner and summary

use std::io::{self, Write};
use std::path::Path;

use crossterm::style::{style, Color, Stylize};
use gridcmp_engine::{ComparisonResult, LineKind, ReportLine, ReportSink, ScanAnchor, Tolerance};
use serde::Serialize;

use crate::file_type::FileType;

/// Writes report lines as they arrive, colored by kind.
pub struct ConsoleSink<W> {
    out: W,
    color: bool,
    broken: bool,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color, broken: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn emit(&mut self, line: ReportLine) {
        // Stop writing after the first failure (closed pipe); counting goes on.
        if self.broken {
            return;
        }
        let written = write_colored(&mut self.out, &line.text, line_color(line.kind), self.color);
        if let Err(e) = written {
            log::debug!("report output stopped: {}", e);
            self.broken = true;
        }
    }
}

pub fn line_color(kind: LineKind) -> Color {
    match kind {
        LineKind::RegionStart => Color::Cyan,
        LineKind::Difference(_) => Color::Red,
        LineKind::Suppressed => Color::Yellow,
    }
}

/// Write one line, styled only when `color` is on.
pub fn write_colored<W: Write + ?Sized>(
    out: &mut W,
    text: &str,
    fg: Color,
    color: bool,
) -> io::Result<()> {
    if color {
        writeln!(out, "{}", style(text).with(fg))
    } else {
        writeln!(out, "{}", text)
    }
}

pub struct Banner<'a> {
    pub file1: &'a Path,
    pub file2: &'a Path,
    pub file_type: FileType,
    pub tolerance: Tolerance,
}

pub fn write_banner<W: Write + ?Sized>(out: &mut W, banner: &Banner<'_>) -> io::Result<()> {
    writeln!(out, "Comparing files:")?;
    writeln!(out, "  File 1: {}", banner.file1.display())?;
    writeln!(out, "  File 2: {}", banner.file2.display())?;
    writeln!(out, "  File Type: {}", banner.file_type)?;
    writeln!(out, "  Tolerance: {}", banner.tolerance)?;
    writeln!(out)
}

pub fn write_summary<W: Write + ?Sized>(
    out: &mut W,
    result: &ComparisonResult,
    color: bool,
) -> io::Result<()> {
    writeln!(out)?;
    write_colored(out, "=== Comparison Summary ===", Color::Cyan, color)?;
    writeln!(out, "Regions compared: {}", result.regions_compared)?;
    writeln!(out, "Total cells compared: {}", result.cells_compared)?;
    writeln!(out, "Numeric mismatches: {}", result.numeric_mismatches)?;
    writeln!(out, "Text mismatches: {}", result.text_mismatches)?;

    if result.is_identical() {
        write_colored(out, "No differences found - files are identical!", Color::Green, color)
    } else {
        let line = format!("Total differences found: {}", result.total_mismatches());
        write_colored(out, &line, Color::Yellow, color)
    }
}

/// Machine-readable summary printed by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonSummary<'a> {
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
    pub total_mismatches: u64,
    pub identical: bool,
    pub tolerance: Tolerance,
    pub anchor: ScanAnchor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<'a> JsonSummary<'a> {
    pub fn new(result: &'a ComparisonResult, tolerance: Tolerance, anchor: ScanAnchor) -> Self {
        Self {
            result,
            total_mismatches: result.total_mismatches(),
            identical: result.is_identical(),
            tolerance,
            anchor,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

pub fn write_json_summary<W: Write + ?Sized>(
    out: &mut W,
    summary: &JsonSummary<'_>,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summary)?;
    writeln!(out)
}
