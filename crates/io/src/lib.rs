// Source ingestion: delimited text files and spreadsheet workbooks

pub mod csv;
pub mod encoding;
pub mod error;
pub mod xlsx;

pub use crate::csv::{read_delimited, read_delimited_with_limits, IngestLimits};
pub use crate::encoding::{detect_encoding, TextEncoding};
pub use crate::error::IngestError;
pub use crate::xlsx::{Workbook, Worksheet};
