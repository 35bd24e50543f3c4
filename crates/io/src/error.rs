// Ingestion errors

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Fatal failure to load one source. Each variant names the offending file.
#[derive(Debug)]
pub enum IngestError {
    /// Empty or otherwise unusable path.
    InvalidPath { path: PathBuf },
    NotFound { path: PathBuf },
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    TooManyRows { path: PathBuf, limit: usize },
    /// Permission denied, a directory, or any other I/O failure.
    Read { path: PathBuf, source: io::Error },
    /// The spreadsheet container could not be opened, or a sheet could not be read.
    Workbook { path: PathBuf, message: String },
    SheetNotFound { path: PathBuf, sheet: String },
}

impl IngestError {
    pub fn path(&self) -> &Path {
        match self {
            IngestError::InvalidPath { path }
            | IngestError::NotFound { path }
            | IngestError::FileTooLarge { path, .. }
            | IngestError::TooManyRows { path, .. }
            | IngestError::Read { path, .. }
            | IngestError::Workbook { path, .. }
            | IngestError::SheetNotFound { path, .. } => path,
        }
    }

    /// True for the size and row ceilings.
    pub fn is_limit(&self) -> bool {
        matches!(self, IngestError::FileTooLarge { .. } | IngestError::TooManyRows { .. })
    }

    /// Map an I/O error on `path`, keeping "not found" distinguishable.
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            IngestError::NotFound { path: path.to_path_buf() }
        } else {
            IngestError::Read { path: path.to_path_buf(), source: err }
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::InvalidPath { path } => {
                write!(f, "invalid file path '{}'", path.display())
            }
            IngestError::NotFound { path } => write!(f, "file not found: {}", path.display()),
            IngestError::FileTooLarge { path, size, limit } => write!(
                f,
                "cannot read '{}' - file size ({} bytes) exceeds maximum allowed size ({} bytes)",
                path.display(),
                group_thousands(*size),
                group_thousands(*limit)
            ),
            IngestError::TooManyRows { path, limit } => write!(
                f,
                "cannot read '{}' - file contains more than {} rows, which exceeds the maximum allowed",
                path.display(),
                group_thousands(*limit as u64)
            ),
            IngestError::Read { path, source } => {
                write!(f, "cannot read '{}' - {}", path.display(), source)
            }
            IngestError::Workbook { path, message } => {
                write!(f, "cannot open '{}' - {}", path.display(), message)
            }
            IngestError::SheetNotFound { path, sheet } => {
                write!(f, "sheet '{}' not found in '{}'", sheet, path.display())
            }
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IngestError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
