// Grid comparison loop and multi-region aggregation

use crate::aggregate::RegionPair;
use crate::compare::{compare, DifferenceKind};
use crate::error::ValidationError;
use crate::grid::{Grid, RowTable};
use crate::options::CompareOptions;
use crate::range::resolve_scan_range;
use crate::report::{DifferenceReporter, ReportSink};
use crate::result::ComparisonResult;
use crate::value::{CellValue, RawCell};

/// Runs comparisons for one invocation of the tool.
///
/// Owns the run's [`DifferenceReporter`], so the display limit spans every
/// region compared through the same `Comparer`.
#[derive(Debug)]
pub struct Comparer<S> {
    options: CompareOptions,
    reporter: DifferenceReporter<S>,
}

impl<S: ReportSink> Comparer<S> {
    pub fn new(options: CompareOptions, sink: S) -> Self {
        Self::with_reporter(options, DifferenceReporter::new(sink))
    }

    pub fn with_reporter(options: CompareOptions, reporter: DifferenceReporter<S>) -> Self {
        Self { options, reporter }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    pub fn reporter(&self) -> &DifferenceReporter<S> {
        &self.reporter
    }

    pub fn into_reporter(self) -> DifferenceReporter<S> {
        self.reporter
    }

    /// Compare two grids over their resolved scan rectangle, row-major.
    ///
    /// The result always has `regions_compared == 1`.
    pub fn compare_region<A, B>(
        &mut self,
        a: &A,
        b: &B,
        label: &str,
    ) -> Result<ComparisonResult, ValidationError>
    where
        A: Grid + ?Sized,
        B: Grid + ?Sized,
    {
        validate_label(label)?;
        Ok(self.scan_region(a, b, label))
    }

    /// Compare two delimited tables row by row.
    ///
    /// Row `r` is scanned across `max(len_a(r), len_b(r))` columns, so the
    /// shape follows each row's widest side rather than a rectangle.
    pub fn compare_rows(
        &mut self,
        a: &RowTable,
        b: &RowTable,
        label: &str,
    ) -> Result<ComparisonResult, ValidationError> {
        validate_label(label)?;

        let mut result = ComparisonResult::for_region();
        self.reporter.begin_region(label);
        if a.is_empty() && b.is_empty() {
            return Ok(result);
        }

        let row_count = to_index(a.row_count().max(b.row_count()));
        for row in 1..=row_count {
            let width = to_index(a.row_len(row).max(b.row_len(row)));
            for col in 1..=width {
                self.visit(label, row, col, a.cell_at(row, col), b.cell_at(row, col), &mut result);
            }
        }

        log::debug!(
            "{label}: {} cells, {} numeric / {} text mismatches",
            result.cells_compared,
            result.numeric_mismatches,
            result.text_mismatches
        );
        Ok(result)
    }

    /// Compare every pair in order and fold the per-region results.
    ///
    /// Labels are validated up front; nothing is scanned if any is invalid.
    pub fn compare_regions<'g, I>(&mut self, pairs: I) -> Result<ComparisonResult, ValidationError>
    where
        I: IntoIterator<Item = RegionPair<'g>>,
    {
        let pairs: Vec<RegionPair<'g>> = pairs.into_iter().collect();
        for pair in &pairs {
            validate_label(&pair.name)?;
        }

        let mut overall = ComparisonResult::default();
        for pair in &pairs {
            let region = self.scan_region(pair.left, pair.right, &pair.name);
            overall.absorb(&region);
        }
        Ok(overall)
    }

    fn scan_region<A, B>(&mut self, a: &A, b: &B, label: &str) -> ComparisonResult
    where
        A: Grid + ?Sized,
        B: Grid + ?Sized,
    {
        let mut result = ComparisonResult::for_region();
        self.reporter.begin_region(label);

        let used_a = a.used_range();
        let used_b = b.used_range();
        if used_a.is_none() && used_b.is_none() {
            return result;
        }

        let Some(scan) = resolve_scan_range(used_a, used_b, self.options.anchor) else {
            return result;
        };
        log::debug!("{label}: scanning {scan} ({} cells)", scan.cell_count());

        for row in scan.first_row..=scan.last_row {
            for col in scan.first_col..=scan.last_col {
                self.visit(label, row, col, a.cell_at(row, col), b.cell_at(row, col), &mut result);
            }
        }
        result
    }

    fn visit(
        &mut self,
        label: &str,
        row: u32,
        col: u32,
        left: Option<RawCell<'_>>,
        right: Option<RawCell<'_>>,
        result: &mut ComparisonResult,
    ) {
        let left = CellValue::classify(left);
        let right = CellValue::classify(right);
        let outcome = compare(&left, &right, self.options.tolerance);

        result.cells_compared += 1;
        match outcome.kind() {
            None => return,
            Some(DifferenceKind::Numeric) => result.numeric_mismatches += 1,
            Some(DifferenceKind::Text | DifferenceKind::Type) => result.text_mismatches += 1,
        }
        self.reporter.record(label, row, col, &outcome);
    }
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyRegionLabel);
    }
    Ok(())
}

fn to_index(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ScanAnchor, Tolerance};
    use crate::report::{LineKind, ReportLine};

    fn table(rows: &[&[&str]]) -> RowTable {
        RowTable::new(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect())
    }

    fn comparer() -> Comparer<Vec<ReportLine>> {
        Comparer::new(CompareOptions::default(), Vec::new())
    }

    #[test]
    fn test_rows_numeric_difference() {
        let a = table(&[&["A", "B"], &["1", "2"], &["3", "4"]]);
        let b = table(&[&["A", "B"], &["1", "99"], &["3", "4"]]);
        let result = comparer().compare_rows(&a, &b, "a.csv vs b.csv").unwrap();
        assert_eq!(result.cells_compared, 6);
        assert_eq!(result.numeric_mismatches, 1);
        assert_eq!(result.text_mismatches, 0);
        assert_eq!(result.regions_compared, 1);
    }

    #[test]
    fn test_rows_short_row_equals_trailing_empty_field() {
        let a = table(&[&["A", "B", "C"], &["1", "2", ""]]);
        let b = table(&[&["A", "B", "C"], &["1", "2"]]);
        let result = comparer().compare_rows(&a, &b, "x").unwrap();
        assert_eq!(result.cells_compared, 6);
        assert!(result.is_identical());
    }

    #[test]
    fn test_rows_scan_is_per_row_union() {
        let a = table(&[&["A", "B", "C"], &["1", "2", "3"], &["4", "5"]]);
        let result = comparer().compare_rows(&a, &a.clone(), "x").unwrap();
        assert_eq!(result.cells_compared, 8);
    }

    #[test]
    fn test_rows_extra_row_is_text_mismatch() {
        let a = table(&[&["A"], &["B"], &["C"]]);
        let b = table(&[&["A"], &["B"]]);
        let result = comparer().compare_rows(&a, &b, "x").unwrap();
        assert_eq!(result.cells_compared, 3);
        assert_eq!(result.text_mismatches, 1);
    }

    #[test]
    fn test_rows_both_empty() {
        let empty = RowTable::default();
        let result = comparer().compare_rows(&empty, &empty, "x").unwrap();
        assert_eq!(result, ComparisonResult::for_region());
    }

    #[test]
    fn test_region_uses_rectangle_for_ragged_table() {
        let a = table(&[&["A", "B", "C"], &["1", "2"]]);
        let result = comparer().compare_region(&a, &a, "x").unwrap();
        assert_eq!(result.cells_compared, 6);
    }

    #[test]
    fn test_region_data_anchor_scans_lone_range_only() {
        let empty = RowTable::default();
        let b = table(&[&["", ""], &["", "Data"]]);
        let mut comparer = Comparer::new(
            CompareOptions { tolerance: Tolerance::DEFAULT, anchor: ScanAnchor::Data },
            Vec::new(),
        );
        let result = comparer.compare_region(&empty, &b, "x").unwrap();
        assert_eq!(result.cells_compared, 4);
        assert_eq!(result.text_mismatches, 1);
    }

    #[test]
    fn test_empty_label_rejected_before_scan() {
        let a = table(&[&["1"]]);
        let mut comparer = comparer();
        assert_eq!(comparer.compare_rows(&a, &a, "  "), Err(ValidationError::EmptyRegionLabel));
        assert_eq!(comparer.compare_region(&a, &a, ""), Err(ValidationError::EmptyRegionLabel));
        assert!(comparer.reporter().sink().is_empty());
    }

    #[test]
    fn test_regions_fold_and_count_each_region() {
        let same = table(&[&["1", "x"]]);
        let other = table(&[&["2", "x"]]);
        let mut comparer = comparer();
        let result = comparer
            .compare_regions(vec![
                RegionPair::new("Clean", &same, &same),
                RegionPair::new("Dirty", &same, &other),
            ])
            .unwrap();
        assert_eq!(result.regions_compared, 2);
        assert_eq!(result.cells_compared, 4);
        assert_eq!(result.numeric_mismatches, 1);

        let lines = comparer.into_reporter().into_sink();
        let headers = lines.iter().filter(|l| l.kind == LineKind::RegionStart).count();
        assert_eq!(headers, 2);
        assert!(lines.iter().any(|l| l.text == "Numeric mismatch at Dirty!R1C1: 1 vs 2"));
    }

    #[test]
    fn test_regions_invalid_label_scans_nothing() {
        let t = table(&[&["1"]]);
        let mut comparer = comparer();
        let err = comparer
            .compare_regions(vec![RegionPair::new("ok", &t, &t), RegionPair::new("", &t, &t)])
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyRegionLabel);
        assert!(comparer.reporter().sink().is_empty());
    }
}
