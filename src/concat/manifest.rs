//! Discovery of the files to concatenate

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

use crate::error::Result;
use crate::file_utils::resolve_root;

use super::config::ConcatConfig;

/// A qualifying file, relative to the walk root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Extension as written on disk, without the dot.
    pub extension: String,
}

impl FileEntry {
    /// The `.ext` tag shown in a section header.
    pub fn type_tag(&self) -> String {
        format!(".{}", self.extension)
    }
}

/// Qualifying files under a root, sorted by relative path.
#[derive(Debug, Clone)]
pub struct Manifest {
    root: PathBuf,
    entries: Vec<FileEntry>,
}

impl Manifest {
    /// Walk `root` and collect every qualifying file.
    ///
    /// Links are not followed and no ignore files are consulted. Excluded
    /// directories are pruned without being entered.
    pub fn discover(root: &Path, config: &ConcatConfig) -> Result<Self> {
        resolve_root(root)?;

        let excluded = config.excluded_dirs.clone();
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(entry.depth() > 0
                    && is_dir
                    && excluded.contains(&entry.file_name().to_string_lossy()))
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            if !config.qualifies(relative) {
                continue;
            }

            let extension = relative
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            entries.push(FileEntry {
                path: relative.to_path_buf(),
                extension,
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(root = %root.display(), files = entries.len(), "manifest built");

        Ok(Self {
            root: root.to_path_buf(),
            entries,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full path of an entry on disk.
    pub fn source_path(&self, entry: &FileEntry) -> PathBuf {
        self.root.join(&entry.path)
    }
}
