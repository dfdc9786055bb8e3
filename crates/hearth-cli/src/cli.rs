//! Built-in command-line surface for `hearth`.
//!
//! Extension and diagnostics options are not declared here; they are added
//! to the subcommands at runtime (see [`crate::commands`]).

use clap::{Args, Parser, Subcommand};

/// Command-line interface for the `hearth` instance manager.
#[derive(Parser, Debug)]
#[command(
    name = "hearth",
    version,
    about = "Manage a locally installed server instance",
    disable_help_subcommand = true
)]
pub(crate) struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Subcommands of the `hearth` CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Starts the instance in the working directory.
    Start(QuietArgs),
    /// Stops the instance in the working directory.
    Stop(QuietArgs),
    /// Runs diagnostic checks against the instance.
    Doctor(DoctorArgs),
}

impl CliCommand {
    pub(crate) const NAMES: [&'static str; 3] = ["start", "stop", "doctor"];
}

/// Arguments shared by commands that only support `--quiet`.
#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct QuietArgs {
    /// Suppresses informational output.
    #[arg(long, short = 'q')]
    pub(crate) quiet: bool,
}

/// Arguments for `hearth doctor`.
#[derive(Args, Debug, Clone)]
pub(crate) struct DoctorArgs {
    /// Categories to check (for example `start`); defaults to all.
    #[arg(value_name = "CATEGORY")]
    pub(crate) categories: Vec<String>,
    /// Suppresses informational output.
    #[arg(long, short = 'q')]
    pub(crate) quiet: bool,
}

/// Returns `true` when the command tokens ask for quiet output.
///
/// Options are registered before parsing, so this looks at raw tokens.
pub(crate) fn requests_quiet<S: AsRef<std::ffi::OsStr>>(tokens: &[S]) -> bool {
    tokens
        .iter()
        .any(|token| token.as_ref() == "--quiet" || token.as_ref() == "-q")
}
