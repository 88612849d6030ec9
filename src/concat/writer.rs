//! Concatenated output: banner, then one delimited section per file

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::file_utils::{normalize_newlines, read_text};

use super::config::ConcatConfig;
use super::manifest::{FileEntry, Manifest};
use super::progress::ProgressSink;

const BANNER_RULE_WIDTH: usize = 60;
const SECTION_RULE_WIDTH: usize = 80;

/// Outcome of a concatenation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConcatSummary {
    pub files_written: usize,
    /// Files whose bytes were not valid UTF-8.
    pub lossy_files: usize,
    /// Files that could not be read and got an empty section.
    pub unreadable_files: usize,
}

pub fn format_banner(extensions: &[String]) -> String {
    let rule = format!("# {}\n", "=".repeat(BANNER_RULE_WIDTH));
    let includes = extensions
        .iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{rule}# CONCATENATED SOURCE FILE\n# Includes: {includes}\n# Each section is a file from the original directory tree\n{rule}\n"
    )
}

pub fn format_section_header(entry: &FileEntry) -> String {
    let rule = "#".repeat(SECTION_RULE_WIDTH);
    format!(
        "\n{rule}\n# FILE: {}\n# TYPE: {}\n{rule}\n\n",
        entry.path.display(),
        entry.type_tag()
    )
}

/// Writes a manifest's files into one output file.
pub struct Concatenator {
    config: ConcatConfig,
}

impl Concatenator {
    pub fn new(config: ConcatConfig) -> Self {
        Self { config }
    }

    pub fn discover(&self, root: &Path) -> Result<Manifest> {
        Manifest::discover(root, &self.config)
    }

    /// Discover files under `root` and write them to `output_path`.
    pub fn run<P: ProgressSink>(
        &self,
        root: &Path,
        output_path: &Path,
        progress: &mut P,
    ) -> Result<ConcatSummary> {
        let manifest = self.discover(root)?;
        self.write(&manifest, output_path, progress)
    }

    /// Write every manifest entry in order.
    ///
    /// An empty manifest leaves `output_path` untouched.
    pub fn write<P: ProgressSink>(
        &self,
        manifest: &Manifest,
        output_path: &Path,
        progress: &mut P,
    ) -> Result<ConcatSummary> {
        let mut summary = ConcatSummary::default();
        if manifest.is_empty() {
            return Ok(summary);
        }

        let file = File::create(output_path).map_err(Error::write(output_path))?;
        let mut out = BufWriter::new(file);
        let total = manifest.len();

        out.write_all(format_banner(&self.config.extensions).as_bytes())
            .map_err(Error::write(output_path))?;

        for (idx, entry) in manifest.entries().iter().enumerate() {
            let source = manifest.source_path(entry);
            let content = match read_text(&source) {
                Ok(decoded) => {
                    if decoded.lossy {
                        debug!(path = %source.display(), "invalid UTF-8, using replacement characters");
                        summary.lossy_files += 1;
                    }
                    decoded.text
                }
                Err(e) => {
                    warn!(path = %source.display(), error = %e, "cannot read file, writing empty section");
                    summary.unreadable_files += 1;
                    String::new()
                }
            };

            write_section(&mut out, entry, &content).map_err(Error::write(output_path))?;
            summary.files_written += 1;
            progress.update(idx + 1, total);
        }

        out.flush().map_err(Error::write(output_path))?;
        Ok(summary)
    }
}

fn write_section<W: Write>(out: &mut W, entry: &FileEntry, content: &str) -> std::io::Result<()> {
    out.write_all(format_section_header(entry).as_bytes())?;
    out.write_all(normalize_newlines(content).trim_end().as_bytes())?;
    out.write_all(b"\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTree;
    use std::fs;

    fn run(tree: &TestTree, output: &Path) -> (ConcatSummary, Vec<(usize, usize)>) {
        let mut updates = Vec::new();
        let summary = Concatenator::new(ConcatConfig::default())
            .run(tree.path(), output, &mut |c: usize, t: usize| updates.push((c, t)))
            .unwrap();
        (summary, updates)
    }

    #[test]
    fn test_banner() {
        let banner = format_banner(&ConcatConfig::default().extensions);
        let rule = format!("# {}", "=".repeat(60));
        assert_eq!(
            banner,
            format!(
                "{rule}\n# CONCATENATED SOURCE FILE\n# Includes: .py, .json, .md, .csv, .yml, .yaml, .toml\n# Each section is a file from the original directory tree\n{rule}\n\n"
            )
        );
    }

    #[test]
    fn test_section_layout() {
        let tree = TestTree::new();
        tree.add_file("a/x.py", "print('x')\n\n   \n");
        let output = tree.path().join("out.txt");

        run(&tree, &output);
        let text = fs::read_to_string(&output).unwrap();
        let rule = "#".repeat(80);
        let section = format!(
            "\n{rule}\n# FILE: {}\n# TYPE: .py\n{rule}\n\nprint('x')\n\n",
            Path::new("a").join("x.py").display()
        );
        assert!(text.ends_with(&section), "unexpected output:\n{}", text);
        assert_eq!(text, format_banner(&ConcatConfig::default().extensions) + &section);
    }

    #[test]
    fn test_scenario_only_qualifying_file() {
        let tree = TestTree::new();
        tree.add_file("a/x.py", "x = 1");
        tree.add_file("a/y.txt", "not included");
        tree.add_file("b/.git/z.py", "z = 1");
        let output = tree.path().join("out.txt");

        let (summary, _) = run(&tree, &output);
        let text = fs::read_to_string(&output).unwrap();

        assert_eq!(summary.files_written, 1);
        assert_eq!(text.matches("# FILE: ").count(), 1);
        assert!(text.contains("x = 1"));
        assert!(!text.contains("not included"));
        assert!(!text.contains("z = 1"));
    }

    #[test]
    fn test_progress_reported_per_file() {
        let tree = TestTree::new();
        tree.add_file("a.py", "");
        tree.add_file("b.md", "");
        tree.add_file("c.json", "");
        let output = tree.path().join("out.txt");

        let (_, updates) = run(&tree, &output);
        assert_eq!(updates, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_deterministic_output() {
        let tree = TestTree::new();
        tree.add_file("z.py", "z");
        tree.add_file("m/a.toml", "a = 1");
        tree.add_file("m/b.yaml", "b: 2");
        let first = tree.path().join("first.txt");
        let second = tree.path().join("second.txt");

        run(&tree, &first);
        run(&tree, &second);
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_empty_manifest_writes_nothing() {
        let tree = TestTree::new();
        tree.add_file("notes.txt", "");
        let output = tree.path().join("out.txt");

        let (summary, updates) = run(&tree, &output);
        assert_eq!(summary, ConcatSummary::default());
        assert!(updates.is_empty());
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_manifest_keeps_previous_output() {
        let tree = TestTree::new();
        let output = tree.path().join("out.txt");
        fs::write(&output, "previous").unwrap();

        run(&tree, &output);
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_invalid_utf8_degrades() {
        let tree = TestTree::new();
        tree.add_bytes("bad.py", &[b'o', b'k', 0xff, 0xfe, b'!']);
        tree.add_file("good.py", "fine");
        let output = tree.path().join("out.txt");

        let (summary, _) = run(&tree, &output);
        let text = fs::read_to_string(&output).unwrap();

        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.lossy_files, 1);
        assert!(text.contains("ok\u{FFFD}\u{FFFD}!"));
        assert!(text.contains("fine"));
    }

    #[test]
    fn test_crlf_normalized() {
        let tree = TestTree::new();
        tree.add_file("win.md", "line one\r\nline two\r\n");
        let output = tree.path().join("out.txt");

        run(&tree, &output);
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("line one\nline two\n\n"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_unwritable_output() {
        let tree = TestTree::new();
        tree.add_file("a.py", "");
        let output = tree.path().join("missing_dir").join("out.txt");

        let result = Concatenator::new(ConcatConfig::default()).run(
            tree.path(),
            &output,
            &mut |_: usize, _: usize| {},
        );
        assert!(matches!(result, Err(Error::Write { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_gets_empty_section() {
        use std::os::unix::fs::PermissionsExt;

        let tree = TestTree::new();
        let locked = tree.add_file("locked.py", "secret");
        tree.add_file("open.py", "visible");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Root can read anything regardless of mode bits
        if fs::read(&locked).is_ok() {
            return;
        }

        let output = tree.path().join("out.txt");
        let (summary, _) = run(&tree, &output);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.unreadable_files, 1);
        assert!(text.contains("# FILE: locked.py"));
        assert!(!text.contains("secret"));
        assert!(text.contains("visible"));
    }
}
