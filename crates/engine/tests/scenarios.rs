// End-to-end comparison scenarios over in-memory grids.

use std::collections::BTreeMap;

use gridcmp_engine::*;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Sparse worksheet stand-in: only populated cells are stored.
#[derive(Default)]
struct SparseSheet {
    cells: BTreeMap<(u32, u32), Stored>,
}

enum Stored {
    Number(f64),
    Text(String),
}

impl SparseSheet {
    fn number(mut self, row: u32, col: u32, n: f64) -> Self {
        self.cells.insert((row, col), Stored::Number(n));
        self
    }

    fn text(mut self, row: u32, col: u32, s: &str) -> Self {
        self.cells.insert((row, col), Stored::Text(s.to_string()));
        self
    }
}

impl Grid for SparseSheet {
    fn used_range(&self) -> Option<CellRange> {
        let mut keys = self.cells.keys();
        let &(r, c) = keys.next()?;
        let mut range = CellRange::single(r, c);
        for &(r, c) in keys {
            range.include(r, c);
        }
        Some(range)
    }

    fn cell_at(&self, row: u32, col: u32) -> Option<RawCell<'_>> {
        self.cells.get(&(row, col)).map(|stored| match stored {
            Stored::Number(n) => RawCell::Number(*n),
            Stored::Text(s) => RawCell::text(s),
        })
    }
}

fn table(rows: &[&[&str]]) -> RowTable {
    RowTable::new(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect())
}

fn comparer() -> Comparer<Vec<ReportLine>> {
    Comparer::new(CompareOptions::default(), Vec::new())
}

fn differences(lines: &[ReportLine]) -> usize {
    lines.iter().filter(|l| l.is_difference()).count()
}

fn suppressions(lines: &[ReportLine]) -> usize {
    lines.iter().filter(|l| l.kind == LineKind::Suppressed).count()
}

// ---------------------------------------------------------------------------
// Region scans
// ---------------------------------------------------------------------------

#[test]
fn corner_cells_differ_in_ten_by_ten() {
    let a = SparseSheet::default().text(1, 1, "X").number(10, 10, 5.0);
    let b = SparseSheet::default().text(1, 1, "Y").number(10, 10, 6.0);

    let result = comparer().compare_region(&a, &b, "Sheet1").unwrap();
    assert_eq!(result.cells_compared, 100);
    assert_eq!(result.numeric_mismatches + result.text_mismatches, 2);
    assert_eq!(result.numeric_mismatches, 1);
    assert_eq!(result.text_mismatches, 1);
}

#[test]
fn empty_sheet_against_single_far_cell() {
    let a = SparseSheet::default();
    let b = SparseSheet::default().text(50, 50, "Data");

    let mut comparer = comparer();
    let result = comparer.compare_region(&a, &b, "Sheet1").unwrap();
    assert_eq!(result.cells_compared, 2500);
    assert_eq!(result.text_mismatches, 1);
    assert_eq!(result.numeric_mismatches, 0);

    let lines = comparer.into_reporter().into_sink();
    assert!(lines.iter().any(|l| l.text == "Text mismatch at Sheet1!R50C50: '' vs 'Data'"));
}

#[test]
fn data_anchor_scans_only_populated_rectangle() {
    let a = SparseSheet::default();
    let b = SparseSheet::default().text(50, 50, "Data");
    let options = CompareOptions { anchor: ScanAnchor::Data, ..CompareOptions::default() };

    let result = Comparer::new(options, NullSink).compare_region(&a, &b, "Sheet1").unwrap();
    assert_eq!(result.cells_compared, 1);
    assert_eq!(result.text_mismatches, 1);
}

#[test]
fn both_empty_sheets_take_fast_path() {
    let result = comparer()
        .compare_region(&SparseSheet::default(), &SparseSheet::default(), "Sheet1")
        .unwrap();
    assert_eq!(result.cells_compared, 0);
    assert_eq!(result.regions_compared, 1);
    assert!(result.is_identical());
}

#[test]
fn numeric_cell_against_numeric_looking_text_matches() {
    let a = SparseSheet::default().number(1, 1, 42.0);
    let b = SparseSheet::default().text(1, 1, "42.0");
    let result = comparer().compare_region(&a, &b, "S").unwrap();
    assert!(result.is_identical());
}

#[test]
fn number_against_empty_counts_as_text_mismatch() {
    let a = SparseSheet::default().number(1, 1, 0.0);
    let b = SparseSheet::default().text(2, 2, "");
    let mut comparer = comparer();
    let result = comparer.compare_region(&a, &b, "S").unwrap();
    assert_eq!(result.text_mismatches, 1);
    assert_eq!(result.numeric_mismatches, 0);

    let lines = comparer.into_reporter().into_sink();
    assert!(lines.iter().any(|l| l.kind == LineKind::Difference(DifferenceKind::Type)));
}

// ---------------------------------------------------------------------------
// Delimited tables
// ---------------------------------------------------------------------------

#[test]
fn csv_tables_one_numeric_difference() {
    let a = table(&[&["A", "B"], &["1", "2"]]);
    let b = table(&[&["A", "B"], &["1", "3"]]);

    let mut comparer = comparer();
    let result = comparer.compare_rows(&a, &b, "a.csv vs b.csv").unwrap();
    assert_eq!(result.cells_compared, 4);
    assert_eq!(result.numeric_mismatches, 1);
    assert_eq!(result.text_mismatches, 0);

    let lines = comparer.into_reporter().into_sink();
    assert_eq!(lines[0].text, "Comparing a.csv vs b.csv");
    assert_eq!(lines[1].text, "Numeric mismatch at a.csv vs b.csv!R2C2: 2 vs 3");
}

#[test]
fn type_mismatch_line_keeps_field_as_written() {
    let a = table(&[&["1.50", "1e3"]]);
    let b = table(&[&["abc", "1000"]]);

    let mut comparer = comparer();
    let result = comparer.compare_rows(&a, &b, "a.csv vs b.csv").unwrap();
    assert_eq!(result.text_mismatches, 1);
    assert_eq!(result.numeric_mismatches, 0);

    let lines = comparer.into_reporter().into_sink();
    assert_eq!(lines[1].text, "Type mismatch at a.csv vs b.csv!R1C1: '1.50' vs 'abc'");
}

#[test]
fn trailing_whitespace_is_text_mismatch() {
    let a = table(&[&["value "]]);
    let b = table(&[&["value"]]);
    let result = comparer().compare_rows(&a, &b, "x").unwrap();
    assert_eq!(result.text_mismatches, 1);
}

#[test]
fn tolerance_controls_numeric_equality() {
    let a = table(&[&["1.0"]]);
    let b = table(&[&["1.05"]]);

    let tight = comparer().compare_rows(&a, &b, "x").unwrap();
    assert_eq!(tight.numeric_mismatches, 1);

    let tolerance = Tolerance::new(0.1).unwrap();
    let loose = Comparer::new(CompareOptions::with_tolerance(tolerance), NullSink)
        .compare_rows(&a, &b, "x")
        .unwrap();
    assert!(loose.is_identical());
}

// ---------------------------------------------------------------------------
// Output governor across a run
// ---------------------------------------------------------------------------

fn column_of(n: usize, prefix: &str) -> RowTable {
    RowTable::new((0..n).map(|i| vec![format!("{prefix}{i}")]).collect())
}

#[test]
fn exactly_hundred_differences_no_notice() {
    let mut comparer = comparer();
    let result = comparer
        .compare_rows(&column_of(100, "a"), &column_of(100, "b"), "x")
        .unwrap();
    assert_eq!(result.text_mismatches, 100);

    let lines = comparer.into_reporter().into_sink();
    assert_eq!(differences(&lines), 100);
    assert_eq!(suppressions(&lines), 0);
}

#[test]
fn hundred_and_one_differences_one_notice_full_counts() {
    let mut comparer = comparer();
    let result = comparer
        .compare_rows(&column_of(101, "a"), &column_of(101, "b"), "x")
        .unwrap();
    assert_eq!(result.text_mismatches, 101);

    let reporter = comparer.into_reporter();
    assert_eq!(reporter.received(), 101);
    let lines = reporter.into_sink();
    assert_eq!(differences(&lines), 100);
    assert_eq!(suppressions(&lines), 1);
}

#[test]
fn display_limit_is_shared_across_regions() {
    let left = column_of(60, "a");
    let right = column_of(60, "b");

    let mut comparer = comparer();
    let result = comparer
        .compare_regions(vec![
            RegionPair::new("First", &left, &right),
            RegionPair::new("Second", &left, &right),
        ])
        .unwrap();
    assert_eq!(result.text_mismatches, 120);
    assert_eq!(result.regions_compared, 2);

    let lines = comparer.into_reporter().into_sink();
    assert_eq!(differences(&lines), 100);
    assert_eq!(suppressions(&lines), 1);
}

// ---------------------------------------------------------------------------
// Multi-region aggregation
// ---------------------------------------------------------------------------

#[test]
fn only_common_regions_are_compared() {
    let a_names = ["A", "B"];
    let b_names = ["A", "C"];
    let common = common_region_names(&a_names, &b_names);
    assert_eq!(common, vec!["A"]);

    let sheet = SparseSheet::default().number(1, 1, 1.0);
    let pairs = common.iter().map(|name| RegionPair::new(name.as_str(), &sheet, &sheet));
    let result = comparer().compare_regions(pairs).unwrap();
    assert_eq!(result.regions_compared, 1);
    assert!(result.is_identical());
}

#[test]
fn no_common_regions_is_identical_and_empty() {
    let common = common_region_names(&["A"], &["B"]);
    assert!(common.is_empty());

    let result = comparer().compare_regions(Vec::new()).unwrap();
    assert_eq!(result, ComparisonResult::default());
    assert!(result.is_identical());
}
