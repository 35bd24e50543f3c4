// Source type detection by file extension

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Kind of source a path points at, judged by extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileType {
    Excel,
    Csv,
    Unknown,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileType::Excel => "Excel",
            FileType::Csv => "Csv",
            FileType::Unknown => "Unknown",
        })
    }
}

/// Extensions accepted, for error hints.
pub const SUPPORTED_EXTENSIONS: &str = ".xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv, .txt";

pub fn detect_file_type(path: &Path) -> FileType {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileType::Unknown;
    };
    match ext.to_ascii_lowercase().as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => FileType::Excel,
        "csv" | "tsv" | "txt" => FileType::Csv,
        _ => FileType::Unknown,
    }
}

/// Both paths are the same known type.
pub fn are_same_type(a: &Path, b: &Path) -> bool {
    let left = detect_file_type(a);
    left != FileType::Unknown && left == detect_file_type(b)
}
