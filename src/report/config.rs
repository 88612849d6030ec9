//! Configuration for the directory report

/// File the report is saved to, relative to the working directory.
pub const REPORT_FILE_NAME: &str = "walkerlist.txt";

/// Name of this program, excluded from listings along with its own report.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Configuration for report walking behavior.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// File names never listed, wherever they appear in the tree.
    pub excluded_files: Vec<String>,
    /// Visit subdirectories in name order. When false they are visited in
    /// the order the filesystem returns them.
    pub sort_directories: bool,
}

impl ReportConfig {
    /// Add a file name to the exclusion list unless it is already present.
    pub fn exclude_file(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.excluded_files.contains(&name) {
            self.excluded_files.push(name);
        }
        self
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_files.iter().any(|n| n == name)
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            excluded_files: vec![PROGRAM_NAME.to_string(), REPORT_FILE_NAME.to_string()],
            sort_directories: true,
        }
    }
}
