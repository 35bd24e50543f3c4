// Scan-rectangle resolution over two sparse grids

use serde::Serialize;

use crate::options::ScanAnchor;

/// Inclusive, 1-indexed rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl CellRange {
    /// Build a range from two corners. Coordinates are 1-indexed; the
    /// corners are normalized so first <= last.
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        Self {
            first_row: first_row.min(last_row).max(1),
            first_col: first_col.min(last_col).max(1),
            last_row: first_row.max(last_row).max(1),
            last_col: first_col.max(last_col).max(1),
        }
    }

    pub fn single(row: u32, col: u32) -> Self {
        Self::new(row, col, row, col)
    }

    pub fn rows(&self) -> u64 {
        u64::from(self.last_row - self.first_row) + 1
    }

    pub fn cols(&self) -> u64 {
        u64::from(self.last_col - self.first_col) + 1
    }

    pub fn cell_count(&self) -> u64 {
        self.rows() * self.cols()
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &CellRange) -> CellRange {
        CellRange {
            first_row: self.first_row.min(other.first_row),
            first_col: self.first_col.min(other.first_col),
            last_row: self.last_row.max(other.last_row),
            last_col: self.last_col.max(other.last_col),
        }
    }

    /// Grow to include a single cell.
    pub fn include(&mut self, row: u32, col: u32) {
        self.first_row = self.first_row.min(row);
        self.first_col = self.first_col.min(col);
        self.last_row = self.last_row.max(row);
        self.last_col = self.last_col.max(col);
    }

    fn anchored_at_origin(mut self) -> CellRange {
        self.first_row = 1;
        self.first_col = 1;
        self
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}C{}:R{}C{}", self.first_row, self.first_col, self.last_row, self.last_col)
    }
}

/// Rectangle to scan for two grids with the given used ranges.
///
/// `None` only when both grids are empty. With a single used range that
/// range is scanned; with two, their union. `ScanAnchor::Origin` then
/// stretches the result back to (1,1).
pub fn resolve_scan_range(
    a: Option<CellRange>,
    b: Option<CellRange>,
    anchor: ScanAnchor,
) -> Option<CellRange> {
    let range = match (a, b) {
        (None, None) => return None,
        (Some(only), None) | (None, Some(only)) => only,
        (Some(a), Some(b)) => a.union(&b),
    };

    Some(match anchor {
        ScanAnchor::Data => range,
        ScanAnchor::Origin => range.anchored_at_origin(),
    })
}
