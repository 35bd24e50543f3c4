// Grid adapters: the read-only view the engine scans

use crate::range::CellRange;
use crate::value::RawCell;

/// A read-only, 1-indexed two-dimensional source of cells.
///
/// Implementations wrap a parsed worksheet or an in-memory row table. The
/// engine never mutates a grid.
pub trait Grid {
    /// Minimal rectangle holding every populated cell, or `None` when the
    /// grid is empty.
    fn used_range(&self) -> Option<CellRange>;

    /// Raw cell at (row, col); `None` for an absent cell.
    fn cell_at(&self, row: u32, col: u32) -> Option<RawCell<'_>>;
}

impl<G: Grid + ?Sized> Grid for &G {
    fn used_range(&self) -> Option<CellRange> {
        (**self).used_range()
    }

    fn cell_at(&self, row: u32, col: u32) -> Option<RawCell<'_>> {
        (**self).cell_at(row, col)
    }
}

/// Rows of string fields as produced by delimited-text ingestion.
///
/// Rows may be ragged. As a [`Grid`] the table spans every row and the
/// widest row's field count; a short row simply has absent trailing cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowTable {
    rows: Vec<Vec<String>>,
    width: usize,
}

impl RowTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, width }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Field count of the widest row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field count of a 1-indexed row; 0 past the end.
    pub fn row_len(&self, row: u32) -> usize {
        self.row(row).map_or(0, Vec::len)
    }

    /// Field at a 1-indexed position.
    pub fn field(&self, row: u32, col: u32) -> Option<&str> {
        let idx = (col as usize).checked_sub(1)?;
        self.row(row)?.get(idx).map(String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    fn row(&self, row: u32) -> Option<&Vec<String>> {
        let idx = (row as usize).checked_sub(1)?;
        self.rows.get(idx)
    }
}

impl From<Vec<Vec<String>>> for RowTable {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

impl Grid for RowTable {
    fn used_range(&self) -> Option<CellRange> {
        if self.rows.is_empty() || self.width == 0 {
            return None;
        }
        let last_row = u32::try_from(self.rows.len()).unwrap_or(u32::MAX);
        let last_col = u32::try_from(self.width).unwrap_or(u32::MAX);
        Some(CellRange::new(1, 1, last_row, last_col))
    }

    fn cell_at(&self, row: u32, col: u32) -> Option<RawCell<'_>> {
        self.field(row, col).map(RawCell::text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RowTable {
        RowTable::new(rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect())
    }

    #[test]
    fn test_row_table_dimensions() {
        let t = table(&[&["A", "B", "C"], &["1", "2"]]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.width(), 3);
        assert_eq!(t.row_len(2), 2);
        assert_eq!(t.row_len(3), 0);
        assert_eq!(t.used_range(), Some(CellRange::new(1, 1, 2, 3)));
    }

    #[test]
    fn test_row_table_is_one_indexed() {
        let t = table(&[&["A", "B"], &["1", "2"]]);
        assert_eq!(t.field(1, 1), Some("A"));
        assert_eq!(t.field(2, 2), Some("2"));
        assert_eq!(t.field(0, 1), None);
        assert_eq!(t.field(1, 0), None);
        assert_eq!(t.cell_at(2, 3), None);
    }

    #[test]
    fn test_empty_row_table_has_no_used_range() {
        assert_eq!(RowTable::default().used_range(), None);
        assert_eq!(table(&[&[]]).used_range(), None);
    }
}
