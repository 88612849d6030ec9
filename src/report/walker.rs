//! ReportWalker - depth-first traversal that streams report lines

use std::path::Path;

use chrono::Local;
use tracing::{debug, warn};

use crate::error::Result;
use crate::file_utils::{display_name, resolve_root};

use super::config::ReportConfig;

/// Format of the "Generated on" timestamp in the report header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Directories and files emitted so far. Both counters only grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportCounts {
    pub directories: usize,
    pub files: usize,
}

/// Receives report events in traversal order.
pub trait ReportOutput {
    fn header(&mut self, root: &Path, generated_at: &str) -> Result<()>;

    /// A directory at `depth`, where the root is depth 0.
    fn directory(&mut self, name: &str, depth: usize) -> Result<()>;

    /// A file at `depth`, one deeper than the directory containing it.
    fn file(&mut self, name: &str, depth: usize) -> Result<()>;

    fn finish(&mut self, counts: ReportCounts) -> Result<()>;
}

/// Walks a tree in pre-order: a directory's own line, its files sorted by
/// name, then each subdirectory in turn.
pub struct ReportWalker {
    config: ReportConfig,
}

impl ReportWalker {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Walk `root` and stream the report to `output`.
    ///
    /// Fails with `NotFound` before emitting anything if `root` is missing.
    pub fn walk<O: ReportOutput>(&self, root: &Path, output: &mut O) -> Result<ReportCounts> {
        let absolute = resolve_root(root)?;
        let generated_at = Local::now().format(TIMESTAMP_FORMAT).to_string();

        output.header(&absolute, &generated_at)?;

        let mut counts = ReportCounts::default();
        self.walk_dir(root, &display_name(root), 0, output, &mut counts)?;

        output.finish(counts)?;
        Ok(counts)
    }

    fn walk_dir<O: ReportOutput>(
        &self,
        path: &Path,
        name: &str,
        depth: usize,
        output: &mut O,
        counts: &mut ReportCounts,
    ) -> Result<()> {
        let entries = match std::fs::read_dir(path) {
            Ok(e) => e,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable directory");
                return Ok(());
            }
        };

        let mut files = Vec::new();
        let mut dirs = Vec::new();

        for entry in entries.filter_map(|e| e.ok()) {
            let entry_path = entry.path();
            let entry_name = entry.file_name().to_string_lossy().to_string();

            if entry_path.is_dir() {
                // Links to directories are neither listed nor followed
                if entry_path.is_symlink() {
                    debug!(path = %entry_path.display(), "skipping directory symlink");
                    continue;
                }
                dirs.push((entry_name, entry_path));
            } else {
                files.push(entry_name);
            }
        }

        output.directory(name, depth)?;
        counts.directories += 1;

        files.sort();
        for file in files {
            if self.config.is_excluded(&file) {
                continue;
            }
            output.file(&file, depth + 1)?;
            counts.files += 1;
        }

        if self.config.sort_directories {
            dirs.sort_by(|a, b| a.0.cmp(&b.0));
        }
        for (dir_name, dir_path) in dirs {
            self.walk_dir(&dir_path, &dir_name, depth + 1, output, counts)?;
        }

        Ok(())
    }
}
