//! Directory report
//!
//! Walks a tree depth-first and writes one line per directory and file, with
//! a header and a summary, to the console and to a report file at the same
//! time.
//!
//! - `ReportWalker`: traversal, counting and exclusion
//! - `ReportFormatter`: tee output to a color console and a plain file

mod config;
mod formatter;
mod walker;

pub use config::{PROGRAM_NAME, REPORT_FILE_NAME, ReportConfig};
pub use formatter::{REPORT_TITLE, ReportFormatter, format_header, format_summary, write_report};
pub use walker::{ReportCounts, ReportOutput, ReportWalker, TIMESTAMP_FORMAT};
