//! Fixed selection rules for concatenation

use std::collections::HashSet;
use std::path::{Component, Path};

/// File the concatenation is written to, relative to the working directory.
pub const OUTPUT_FILE_NAME: &str = "ALL_SOURCES.txt";

/// Extensions that qualify a file, lowercase and without the dot. Source
/// text, structured data and markup.
pub const INCLUDED_EXTENSIONS: &[&str] = &["py", "json", "md", "csv", "yml", "yaml", "toml"];

/// Directory names whose contents are never included: version control,
/// virtual environments and caches.
pub const EXCLUDED_DIRS: &[&str] = &["venv", ".venv", ".git", "__pycache__"];

/// Directory names checked against every segment of a path.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet(HashSet<String>);

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// True if any normal component of `path` is an excluded name.
    pub fn matches(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(name) => name.to_str().is_some_and(|n| self.contains(n)),
            _ => false,
        })
    }
}

/// Configuration for concatenation. The CLI always uses the defaults.
#[derive(Debug, Clone)]
pub struct ConcatConfig {
    /// Allowed extensions, lowercase without the dot, in banner order.
    pub extensions: Vec<String>,
    pub excluded_dirs: ExclusionSet,
}

impl ConcatConfig {
    /// Case-insensitive check of a file extension against the allow-list.
    pub fn allows_extension(&self, extension: &str) -> bool {
        let lower = extension.to_lowercase();
        self.extensions.iter().any(|e| *e == lower)
    }

    /// True if the file at `relative` (to the walk root) should be included.
    pub fn qualifies(&self, relative: &Path) -> bool {
        let allowed = relative
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.allows_extension(e));
        allowed && !self.excluded_dirs.matches(relative)
    }
}

impl Default for ConcatConfig {
    fn default() -> Self {
        Self {
            extensions: INCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: ExclusionSet::new(EXCLUDED_DIRS.iter().copied()),
        }
    }
}
