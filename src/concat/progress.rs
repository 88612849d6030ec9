//! Progress reporting for concatenation

use std::io::{self, Write};

use tracing::debug;

/// Width of the console progress bar in characters.
pub const BAR_WIDTH: usize = 40;

/// Receives `(current, total)` after each file is written.
pub trait ProgressSink {
    fn update(&mut self, current: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressSink for F {
    fn update(&mut self, current: usize, total: usize) {
        self(current, total)
    }
}

/// Render `[####----] 50.00% (1/2 files)`.
pub fn render_bar(current: usize, total: usize, width: usize) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        (current as f64 / total as f64).min(1.0)
    };
    let filled = ((width as f64 * fraction) as usize).min(width);
    format!(
        "[{}{}] {:6.2}% ({}/{} files)",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0,
        current,
        total
    )
}

/// Redraws a single console line in place on every update.
pub struct ConsoleProgress<W: Write> {
    out: W,
    width: usize,
}

impl ConsoleProgress<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            width: BAR_WIDTH,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn update(&mut self, current: usize, total: usize) {
        let line = render_bar(current, total, self.width);
        // Best-effort: console failures never fail the run
        if let Err(e) = write!(self.out, "\r{}", line).and_then(|_| self.out.flush()) {
            debug!(error = %e, "progress write failed");
        }
    }
}
