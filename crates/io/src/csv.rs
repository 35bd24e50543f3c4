// Delimited text ingestion (CSV, TSV, semicolon and pipe separated)

use std::fs;
use std::path::Path;

use gridcmp_engine::RowTable;

use crate::encoding::detect_encoding;
use crate::error::IngestError;

/// Ceilings applied while ingesting one delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    /// Files larger than this are rejected before any parsing.
    pub max_file_bytes: u64,
    /// Checked per record while reading.
    pub max_rows: usize,
}

impl IngestLimits {
    pub const DEFAULT_MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;
    pub const DEFAULT_MAX_ROWS: usize = 1_000_000;
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: Self::DEFAULT_MAX_FILE_BYTES,
            max_rows: Self::DEFAULT_MAX_ROWS,
        }
    }
}

/// Read a delimited file with the default limits.
pub fn read_delimited(path: &Path) -> Result<RowTable, IngestError> {
    read_delimited_with_limits(path, &IngestLimits::default())
}

/// Read a delimited file into rows of string fields.
///
/// Every row is data (no header handling). The delimiter is sniffed per
/// file. Short rows stay short; bad quoting is recovered by the reader
/// rather than reported.
pub fn read_delimited_with_limits(
    path: &Path,
    limits: &IngestLimits,
) -> Result<RowTable, IngestError> {
    if path.as_os_str().is_empty() {
        return Err(IngestError::InvalidPath { path: path.to_path_buf() });
    }

    let metadata = fs::metadata(path).map_err(|e| IngestError::from_io(path, e))?;
    if metadata.is_dir() {
        return Err(IngestError::InvalidPath { path: path.to_path_buf() });
    }
    if metadata.len() > limits.max_file_bytes {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: limits.max_file_bytes,
        });
    }

    let encoding = detect_encoding(path);
    let bytes = fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    let content = encoding.decode(&bytes);
    drop(bytes);

    let delimiter = sniff_delimiter(&content);
    log::debug!(
        "{}: {} bytes, {}, delimiter {:?}",
        path.display(),
        metadata.len(),
        encoding.name(),
        delimiter as char
    );

    let rows = parse_rows(&content, delimiter, limits.max_rows)
        .map_err(|limit| IngestError::TooManyRows { path: path.to_path_buf(), limit })?;
    Ok(RowTable::new(rows))
}

/// Parse decoded text into rows; `Err(max_rows)` when the ceiling is crossed.
fn parse_rows(content: &str, delimiter: u8, max_rows: usize) -> Result<Vec<Vec<String>>, usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    // Decoded text with flexible(true): the reader yields no Err records
    for record in reader.records().flatten() {
        if rows.len() >= max_rows {
            return Err(max_rows);
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins. Falls back to comma.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must split the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Lines agreeing with line 1, weighted by its field count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn rows(content: &str) -> Vec<Vec<String>> {
        parse_rows(content, sniff_delimiter(content), usize::MAX).unwrap()
    }

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "Name;Age;City\nAlice;30;Paris\nBob;25;London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "Name,Age,City\nAlice,30,Paris\nBob,25,London\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "Name\tAge\tCity\nAlice\t30\tParis\nBob\t25\tLondon\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_pipe_delimiter() {
        let content = "Name|Age|City\nAlice|30|Paris\nBob|25|London\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        let content =
            "Name;Address;City\n\"Doe, Jane\";\"123 Main St, Apt 4\";Paris\nBob;\"456 Elm\";London\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_single_column_defaults_to_comma() {
        assert_eq!(sniff_delimiter("Header\nvalue1\nvalue2\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_short_rows_are_kept_short() {
        let parsed = rows("A,B,C\n1,2\n");
        assert_eq!(parsed[0].len(), 3);
        assert_eq!(parsed[1], vec!["1", "2"]);
    }

    #[test]
    fn test_header_is_data_and_whitespace_preserved() {
        let parsed = rows("Name,Value\n  padded ,x\n");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], vec!["Name", "Value"]);
        assert_eq!(parsed[1][0], "  padded ");
    }

    #[test]
    fn test_unclosed_quote_does_not_fail() {
        let parsed = rows("A,B\n\"unterminated,2\n3,4\n");
        assert_eq!(parsed[0], vec!["A", "B"]);
        // The open quote swallows the rest of the input as one field
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], vec!["unterminated,2\n3,4\n"]);
    }

    #[test]
    fn test_every_record_counts_toward_row_ceiling() {
        let content = "A,B,C\n1\n\"q\",2,3,4\n\n5,6\n";
        let parsed = parse_rows(content, b',', 10).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parse_rows(content, b',', 3), Err(3));
    }

    #[test]
    fn test_row_ceiling_is_exact() {
        let content = "1\n2\n3\n";
        assert_eq!(parse_rows(content, b',', 3).unwrap().len(), 3);
        assert_eq!(parse_rows(content, b',', 2), Err(2));
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let err = read_delimited(Path::new("")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidPath { .. }));
    }

    #[test]
    fn test_directory_is_invalid() {
        let dir = tempdir().unwrap();
        let err = read_delimited(dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidPath { .. }));
    }

    #[test]
    fn test_size_ceiling_checked_before_reading() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.csv");
        File::create(&path).unwrap().set_len(2048).unwrap();

        let limits = IngestLimits { max_file_bytes: 1024, ..IngestLimits::default() };
        let err = read_delimited_with_limits(&path, &limits).unwrap_err();
        match err {
            IngestError::FileTooLarge { size, limit, .. } => {
                assert_eq!(size, 2048);
                assert_eq!(limit, 1024);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
