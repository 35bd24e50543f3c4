//! `gridcmp-engine`: cell-level comparison of two tabular grids.
//!
//! Pure engine crate: grids come in through the [`Grid`] trait, counts come
//! out as a [`ComparisonResult`], and difference lines go to a [`ReportSink`].
//! No file I/O and no terminal state.

pub mod aggregate;
pub mod compare;
pub mod engine;
pub mod error;
pub mod grid;
pub mod options;
pub mod range;
pub mod report;
pub mod result;
pub mod value;

pub use aggregate::{common_region_names, RegionPair};
pub use compare::{compare, ComparisonOutcome, DifferenceKind};
pub use engine::Comparer;
pub use error::ValidationError;
pub use grid::{Grid, RowTable};
pub use options::{CompareOptions, ScanAnchor, Tolerance};
pub use range::{resolve_scan_range, CellRange};
pub use report::{
    DifferenceReporter, LineKind, NullSink, ReportLine, ReportSink, MAX_REPORTED_DIFFERENCES,
};
pub use result::ComparisonResult;
pub use value::{CellValue, RawCell};
