//! Report formatter that writes every line to the console and a report file

use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::{Error, Result};

use super::config::ReportConfig;
use super::walker::{ReportCounts, ReportOutput, ReportWalker};

pub const REPORT_TITLE: &str = "DIRECTORY WALKER REPORT";
const RULE_WIDTH: usize = 80;
const INDENT: &str = "│   ";
const FOLDER_MARKER: &str = "📁";
const FILE_MARKER: &str = "📄";

fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Header block: title, absolute root, timestamp and a rule, then a blank line.
pub fn format_header(root: &Path, generated_at: &str) -> String {
    format!(
        "{}\nFull path: {}\nGenerated on: {}\n{}\n\n",
        REPORT_TITLE,
        root.display(),
        generated_at,
        "=".repeat(RULE_WIDTH)
    )
}

pub fn format_summary(counts: ReportCounts) -> String {
    format!(
        "\nSummary: Found {} directories and {} files.\n",
        counts.directories, counts.files
    )
}

/// Tee formatter. The file sink receives exactly the text shown on the
/// console; color codes only ever go to the console.
pub struct ReportFormatter<C: WriteColor, W: Write> {
    console: C,
    sink: W,
    sink_path: PathBuf,
}

impl<C: WriteColor, W: Write> ReportFormatter<C, W> {
    pub fn new(console: C, sink: W, sink_path: impl Into<PathBuf>) -> Self {
        Self {
            console,
            sink,
            sink_path: sink_path.into(),
        }
    }

    fn write_sink(&mut self, text: &str) -> Result<()> {
        self.sink
            .write_all(text.as_bytes())
            .map_err(Error::write(&self.sink_path))
    }

    fn write_plain(&mut self, text: &str) -> Result<()> {
        self.console
            .write_all(text.as_bytes())
            .map_err(Error::Console)?;
        self.write_sink(text)
    }

    /// Flush both sinks and hand them back.
    pub fn into_inner(mut self) -> Result<(C, W)> {
        self.console.flush().map_err(Error::Console)?;
        self.sink.flush().map_err(Error::write(&self.sink_path))?;
        Ok((self.console, self.sink))
    }
}

impl<C: WriteColor, W: Write> ReportOutput for ReportFormatter<C, W> {
    fn header(&mut self, root: &Path, generated_at: &str) -> Result<()> {
        self.write_plain(&format_header(root, generated_at))
    }

    fn directory(&mut self, name: &str, depth: usize) -> Result<()> {
        let lead = format!("{}{} ", indent(depth), FOLDER_MARKER);
        let label = format!("{}/", name);

        write_directory_line(&mut self.console, &lead, &label).map_err(Error::Console)?;
        self.write_sink(&format!("{}{}\n", lead, label))
    }

    fn file(&mut self, name: &str, depth: usize) -> Result<()> {
        self.write_plain(&format!("{}{} {}\n", indent(depth), FILE_MARKER, name))
    }

    fn finish(&mut self, counts: ReportCounts) -> Result<()> {
        self.write_plain(&format_summary(counts))
    }
}

fn write_directory_line<C: WriteColor>(console: &mut C, lead: &str, label: &str) -> io::Result<()> {
    write!(console, "{}", lead)?;
    console.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
    write!(console, "{}", label)?;
    console.reset()?;
    writeln!(console)
}

/// Walk `root`, writing the report to stdout and to `report_path`.
///
/// The root is checked before `report_path` is created, so a missing root
/// leaves any previous report untouched.
pub fn write_report(
    root: &Path,
    config: &ReportConfig,
    report_path: &Path,
    use_color: bool,
) -> Result<ReportCounts> {
    crate::file_utils::resolve_root(root)?;

    let file = File::create(report_path).map_err(Error::write(report_path))?;
    let choice = if use_color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut formatter = ReportFormatter::new(
        StandardStream::stdout(choice),
        LineWriter::new(file),
        report_path,
    );

    let counts = ReportWalker::new(config.clone()).walk(root, &mut formatter)?;
    formatter.into_inner()?;
    Ok(counts)
}
