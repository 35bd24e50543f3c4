// Workbook ingestion (xlsx, xlsm, xlsb, xls, ods) through calamine

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use gridcmp_engine::{CellRange, Grid, RawCell};

use crate::error::IngestError;

/// An open spreadsheet file. Sheets are loaded on demand.
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        if path.as_os_str().is_empty() {
            return Err(IngestError::InvalidPath { path: path.to_path_buf() });
        }
        if !path.exists() {
            return Err(IngestError::NotFound { path: path.to_path_buf() });
        }

        let sheets = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let sheet_names = sheets.sheet_names().to_vec();
        log::debug!("{}: {} sheet(s)", path.display(), sheet_names.len());

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            sheet_names,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names.iter().any(|n| n == name)
    }

    /// Load one sheet's cells.
    pub fn worksheet(&mut self, name: &str) -> Result<Worksheet, IngestError> {
        if !self.has_sheet(name) {
            return Err(IngestError::SheetNotFound {
                path: self.path.clone(),
                sheet: name.to_string(),
            });
        }
        let range = self.sheets.worksheet_range(name).map_err(|e| IngestError::Workbook {
            path: self.path.clone(),
            message: format!("failed to read sheet '{}': {}", name, e),
        })?;
        Ok(Worksheet::from_range(name, range))
    }
}

impl std::fmt::Debug for Workbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbook")
            .field("path", &self.path)
            .field("sheet_names", &self.sheet_names)
            .finish_non_exhaustive()
    }
}

/// One loaded sheet, addressable 1-indexed through [`Grid`].
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    range: Range<Data>,
    used: Option<CellRange>,
}

impl Worksheet {
    pub fn from_range(name: &str, range: Range<Data>) -> Self {
        let used = populated_bounds(&range);
        Self {
            name: name.to_string(),
            range,
            used,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Grid for Worksheet {
    fn used_range(&self) -> Option<CellRange> {
        self.used
    }

    fn cell_at(&self, row: u32, col: u32) -> Option<RawCell<'_>> {
        if row == 0 || col == 0 {
            return None;
        }
        self.range.get_value((row - 1, col - 1)).and_then(raw_cell)
    }
}

/// Bounding box of non-blank cells. calamine's own range may include
/// cells that hold only an empty string.
fn populated_bounds(range: &Range<Data>) -> Option<CellRange> {
    let (start_row, start_col) = range.start()?;
    let mut bounds: Option<CellRange> = None;

    for (r, c, cell) in range.used_cells() {
        if is_blank(cell) {
            continue;
        }
        let row = start_row + r as u32 + 1;
        let col = start_col + c as u32 + 1;
        match bounds.as_mut() {
            Some(b) => b.include(row, col),
            None => bounds = Some(CellRange::single(row, col)),
        }
    }
    bounds
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn raw_cell(cell: &Data) -> Option<RawCell<'_>> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(RawCell::text(s)),
        Data::Float(n) => Some(RawCell::Number(*n)),
        Data::Int(n) => Some(RawCell::Number(*n as f64)),
        Data::DateTime(dt) => Some(RawCell::Number(dt.as_f64())),
        Data::Bool(b) => Some(RawCell::text(if *b { "TRUE" } else { "FALSE" })),
        Data::Error(e) => Some(RawCell::Text(Cow::Owned(e.to_string()))),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(RawCell::text(s)),
    }
}
