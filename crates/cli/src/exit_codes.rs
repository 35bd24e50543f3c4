//! CLI Exit Code Registry
//!
//! This is the single source of truth for all `gridcmp` exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 0    | Compared, no differences                                       |
//! | 1    | Compared, differences found (like `diff(1)`)                   |
//! | 2    | Usage error (bad flags, invalid tolerance, missing file, type) |
//! | 3    | Ingestion failure (too large, too many rows, unreadable, sheet) |
//!
//! A run that fails at ingestion still prints a zero-valued summary before
//! exiting with 3.

/// Both sources compared and no cell differed.
pub const EXIT_IDENTICAL: u8 = 0;

/// Comparison completed and at least one mismatch was counted.
pub const EXIT_DIFFERENCES: u8 = 1;

/// Usage error - bad arguments, invalid tolerance, missing or mismatched files.
pub const EXIT_USAGE: u8 = 2;

/// A source could not be ingested: size or row ceiling, read failure,
/// unreadable workbook, or a requested sheet missing.
pub const EXIT_INGEST: u8 = 3;

/// Exit code for a completed comparison.
pub fn for_mismatches(total_mismatches: u64) -> u8 {
    if total_mismatches == 0 {
        EXIT_IDENTICAL
    } else {
        EXIT_DIFFERENCES
    }
}
