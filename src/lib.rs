//! treecat - print a directory tree, or concatenate a source tree into one file

pub mod concat;
pub mod error;
pub mod file_utils;
pub mod report;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use concat::{ConcatConfig, ConcatSummary, Concatenator, ConsoleProgress, Manifest, ProgressSink};
pub use error::{Error, Result};
pub use report::{ReportConfig, ReportCounts, ReportFormatter, ReportOutput, ReportWalker, write_report};
