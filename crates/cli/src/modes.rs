// Comparison modes: delimited files, one named sheet, or every common sheet

use std::fmt;
use std::path::Path;

use gridcmp_engine::{
    common_region_names, ComparisonResult, Comparer, RegionPair, ReportSink, ValidationError,
};
use gridcmp_io::{read_delimited, IngestError, Workbook, Worksheet};

use crate::exit_codes::{EXIT_INGEST, EXIT_USAGE};

/// Sheet compared when none is named.
pub const DEFAULT_SHEET: &str = "Sheet1";

/// Why a mode produced no comparison.
#[derive(Debug)]
pub enum RunError {
    Ingest(IngestError),
    Invalid(ValidationError),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Ingest(_) => EXIT_INGEST,
            RunError::Invalid(_) => EXIT_USAGE,
        }
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Ingest(e) => write!(f, "{e}"),
            RunError::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Ingest(e) => Some(e),
            RunError::Invalid(e) => Some(e),
        }
    }
}

impl From<IngestError> for RunError {
    fn from(e: IngestError) -> Self {
        RunError::Ingest(e)
    }
}

impl From<ValidationError> for RunError {
    fn from(e: ValidationError) -> Self {
        RunError::Invalid(e)
    }
}

/// Compare two delimited files. The region is labeled `"<name1> vs <name2>"`.
///
/// Both files are fully ingested before any cell is compared, so a rejected
/// file never yields partial difference output.
pub fn run_csv<S: ReportSink>(
    comparer: &mut Comparer<S>,
    file1: &Path,
    file2: &Path,
) -> Result<ComparisonResult, RunError> {
    let left = read_delimited(file1)?;
    let right = read_delimited(file2)?;
    let label = format!("{} vs {}", display_name(file1), display_name(file2));
    Ok(comparer.compare_rows(&left, &right, &label)?)
}

/// Compare one sheet that must exist in both workbooks.
pub fn run_single_sheet<S: ReportSink>(
    comparer: &mut Comparer<S>,
    file1: &Path,
    file2: &Path,
    sheet: &str,
) -> Result<ComparisonResult, RunError> {
    let mut left_book = Workbook::open(file1)?;
    let mut right_book = Workbook::open(file2)?;

    for book in [&left_book, &right_book] {
        if !book.has_sheet(sheet) {
            return Err(IngestError::SheetNotFound {
                path: book.path().to_path_buf(),
                sheet: sheet.to_string(),
            }
            .into());
        }
    }

    let left = left_book.worksheet(sheet)?;
    let right = right_book.worksheet(sheet)?;
    Ok(comparer.compare_region(&left, &right, sheet)?)
}

/// Compare every sheet whose name appears in both workbooks, in the first
/// workbook's order. Sheets present on one side only are skipped.
pub fn run_all_sheets<S: ReportSink>(
    comparer: &mut Comparer<S>,
    file1: &Path,
    file2: &Path,
) -> Result<ComparisonResult, RunError> {
    let mut left_book = Workbook::open(file1)?;
    let mut right_book = Workbook::open(file2)?;

    let common = common_region_names(left_book.sheet_names(), right_book.sheet_names());
    if common.is_empty() {
        log::warn!("no sheet names in common between {} and {}", file1.display(), file2.display());
    }

    let mut loaded: Vec<(String, Worksheet, Worksheet)> = Vec::with_capacity(common.len());
    for name in common {
        let left = left_book.worksheet(&name)?;
        let right = right_book.worksheet(&name)?;
        loaded.push((name, left, right));
    }

    let pairs = loaded
        .iter()
        .map(|(name, left, right)| RegionPair::new(name.as_str(), left, right));
    Ok(comparer.compare_regions(pairs)?)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
