//! CLI entrypoint for `hearth`.
//!
//! The binary delegates to [`hearth_cli::run`], passing the raw argument
//! vector, the process working directory, and locked output streams.

use std::env;
use std::io::{self, StderrLock, StdoutLock};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    hearth_cli::run(env::args_os(), &cwd, &mut stdout, &mut stderr)
}
