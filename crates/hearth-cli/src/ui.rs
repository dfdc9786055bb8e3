//! Line-oriented user interface for commands.
//!
//! Informational lines go to stdout and warnings to stderr. [`Ui::run`]
//! frames a long-running action with progress lines but always hands back
//! the action's own result.

use std::io::{self, Write};

/// Output surface used by commands.
pub trait Ui {
    /// Writes an informational line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn log(&mut self, message: &str) -> io::Result<()>;

    /// Writes a warning line.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn warn(&mut self, message: &str) -> io::Result<()>;

    /// Runs `action` as a labelled task and returns exactly its result.
    ///
    /// # Errors
    ///
    /// Returns whatever error `action` returns.
    fn run<T, E, F>(&mut self, label: &str, action: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>;
}

/// [`Ui`] writing plain lines to a pair of streams.
pub struct TerminalUi<W: Write, E: Write> {
    stdout: W,
    stderr: E,
    progress: bool,
}

impl<W: Write, E: Write> TerminalUi<W, E> {
    /// Creates a UI that renders task progress.
    #[must_use]
    pub const fn new(stdout: W, stderr: E) -> Self {
        Self {
            stdout,
            stderr,
            progress: true,
        }
    }

    /// Enables or disables task progress lines.
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    fn progress_line(&mut self, args: std::fmt::Arguments<'_>) {
        if !self.progress {
            return;
        }
        if let Err(error) = writeln!(self.stderr, "{args}") {
            tracing::debug!(target: "hearth::ui", %error, "failed to render progress");
        }
    }
}

impl<W: Write, E: Write> Ui for TerminalUi<W, E> {
    fn log(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stdout, "{message}")?;
        self.stdout.flush()
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.stderr, "Warning: {message}")?;
        self.stderr.flush()
    }

    fn run<T, X, F>(&mut self, label: &str, action: F) -> Result<T, X>
    where
        F: FnOnce() -> Result<T, X>,
    {
        self.progress_line(format_args!("{label}..."));
        let result = action();
        let status = if result.is_ok() { "done" } else { "failed" };
        self.progress_line(format_args!("{label}... {status}"));
        result
    }
}
