//! CLI entry point for treecat

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;
use treecat::concat::OUTPUT_FILE_NAME;
use treecat::report::REPORT_FILE_NAME;
use treecat::{ConcatConfig, Concatenator, ConsoleProgress, ReportConfig, write_report};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treecat")]
#[command(about = "Print a directory tree, or concatenate a source tree into one file")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Log skipped entries and decoding fallbacks to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the directory tree and save it to walkerlist.txt
    Walk {
        /// Directory to walk
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Concatenate source, data and markup files into ALL_SOURCES.txt
    Concat {
        /// Directory to collect files from
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("treecat: cannot initialize logging: {}", e);
    }
}

fn absolute_display(path: &Path) -> String {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Default exclusions plus the file name of the running executable.
fn report_config() -> ReportConfig {
    let config = ReportConfig::default();
    match std::env::current_exe()
        .ok()
        .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().to_string()))
    {
        Some(name) => config.exclude_file(name),
        None => config,
    }
}

fn run_walk(path: &Path, use_color: bool) -> treecat::Result<()> {
    let report_path = PathBuf::from(REPORT_FILE_NAME);

    println!("Walking directory: {}", absolute_display(path));
    println!("Output will be saved to: {}\n", absolute_display(&report_path));

    let counts = write_report(path, &report_config(), &report_path, use_color)?;
    info!(
        directories = counts.directories,
        files = counts.files,
        "report written"
    );

    println!("Successfully saved directory listing to {}", REPORT_FILE_NAME);
    Ok(())
}

fn run_concat(path: &Path) -> treecat::Result<()> {
    let output = PathBuf::from(OUTPUT_FILE_NAME);
    let mut progress = ConsoleProgress::stdout();

    let summary = Concatenator::new(ConcatConfig::default()).run(path, &output, &mut progress)?;
    if summary.files_written == 0 {
        println!("No matching source files found.");
        return Ok(());
    }

    info!(
        files = summary.files_written,
        lossy = summary.lossy_files,
        unreadable = summary.unreadable_files,
        "concatenation written"
    );
    println!(
        "\nDone. Wrote {} files into {}",
        summary.files_written, OUTPUT_FILE_NAME
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Command::Walk { path } => run_walk(path, should_use_color(args.color)),
        Command::Concat { path } => run_concat(path),
    };

    if let Err(e) = result {
        eprintln!("treecat: {}", e);
        process::exit(1);
    }
}
