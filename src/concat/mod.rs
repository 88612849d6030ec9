//! Source concatenation
//!
//! Collects every file under a root whose extension is on a fixed allow-list
//! and which does not sit below an excluded directory, sorts them by relative
//! path and writes them into one text file, one delimited section each.

mod config;
mod manifest;
mod progress;
mod writer;

pub use config::{ConcatConfig, EXCLUDED_DIRS, ExclusionSet, INCLUDED_EXTENSIONS, OUTPUT_FILE_NAME};
pub use manifest::{FileEntry, Manifest};
pub use progress::{BAR_WIDTH, ConsoleProgress, ProgressSink, render_bar};
pub use writer::{ConcatSummary, Concatenator, format_banner, format_section_header};
