//! Command-line runtime for `hearth`.
//!
//! The runtime loads configuration, discovers the extensions installed next
//! to the instance, assembles the command surface from the built-in
//! subcommands plus every option contributed by extensions and diagnostics,
//! and dispatches to the lifecycle commands. Arguments, the working
//! directory, and IO streams are all passed in so tests can substitute them.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use clap::FromArgMatches;
use hearth_doctor::{Doctor, DiagnosticsDispatcher};
use hearth_extensions::{ExtensionError, ExtensionRegistry, discover};
use hearth_instance::{Registry, SystemRegistry, WorkingContext};

mod cli;
mod commands;
mod config;
mod errors;
pub mod lifecycle;
pub mod options;
mod telemetry;
pub mod ui;

#[cfg(test)]
mod tests;

use cli::{Cli, CliCommand, requests_quiet};
use commands::{CommandSurfaces, extension_option_names, forwarded_check_mem, start_options};
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use errors::AppError;
use lifecycle::{DoctorCommand, DoctorOptions, StartCommand, StopCommand, StopOptions};
use ui::TerminalUi;

/// Bundles the IO streams handed to the runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

/// Collaborators resolved for the working directory.
pub(crate) trait Services {
    /// Registry used to resolve the managed instance.
    fn registry(&self) -> &dyn Registry;

    /// Extensions installed for the instance owning `dir`.
    fn extensions(&self, dir: &Path) -> Result<ExtensionRegistry, ExtensionError>;

    /// Diagnostics dispatcher for the instance owning `dir`.
    fn dispatcher(&self, dir: &Path) -> Box<dyn DiagnosticsDispatcher>;
}

/// Services backed by the filesystem.
pub(crate) struct SystemServices;

impl Services for SystemServices {
    fn registry(&self) -> &dyn Registry {
        &SystemRegistry
    }

    fn extensions(&self, dir: &Path) -> Result<ExtensionRegistry, ExtensionError> {
        SystemRegistry::locate(dir)
            .map_or_else(|| Ok(ExtensionRegistry::new()), |root| discover(&root))
    }

    fn dispatcher(&self, dir: &Path) -> Box<dyn DiagnosticsDispatcher> {
        let root = SystemRegistry::locate(dir).unwrap_or_else(|| dir.to_path_buf());
        Box::new(Doctor::new(root))
    }
}

struct CliRunner<'a, 'io, W: Write, E: Write, L: ConfigLoader, S: Services> {
    io: &'a mut IoStreams<'io, W, E>,
    loader: &'a L,
    services: &'a S,
}

impl<'a, 'io, W, E, L, S> CliRunner<'a, 'io, W, E, L, S>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    S: Services,
{
    const fn new(io: &'a mut IoStreams<'io, W, E>, loader: &'a L, services: &'a S) -> Self {
        Self {
            io,
            loader,
            services,
        }
    }

    fn run<I>(&mut self, args: I, cwd: &Path) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        match self.execute(&args, cwd) {
            Ok(()) => ExitCode::SUCCESS,
            Err(AppError::CliUsage(error)) => self.report_usage(&error),
            Err(error) => {
                tracing::debug!(target: "hearth::cli", %error, "command failed");
                if let Err(write_error) = writeln!(self.io.stderr, "Error: {error}") {
                    tracing::debug!(target: "hearth::cli", error = %write_error, "failed to report error");
                }
                ExitCode::FAILURE
            }
        }
    }

    fn execute(&mut self, args: &[OsString], cwd: &Path) -> Result<(), AppError> {
        let split = split_config_arguments(args);
        let config = self.loader.load(&split.config_arguments)?;
        telemetry::initialise(&config)?;

        let working_dir = config.working_dir(cwd);
        let extensions = self.services.extensions(&working_dir)?;
        let dispatcher = self.services.dispatcher(&working_dir);
        let quiet = requests_quiet(&split.command_arguments);
        let surfaces = CommandSurfaces::configure(extensions.as_slice(), quiet, dispatcher.as_ref());

        let matches = surfaces
            .command()
            .try_get_matches_from(&split.command_arguments)
            .map_err(AppError::CliUsage)?;
        let cli = Cli::from_arg_matches(&matches).map_err(AppError::CliUsage)?;
        let context = WorkingContext::new(working_dir);
        tracing::debug!(
            target: "hearth::cli",
            dir = %context.dir().display(),
            extensions = extensions.len(),
            "dispatching command"
        );

        match cli.command {
            CliCommand::Start(arguments) => {
                let parsed = surfaces.read("start", &matches);
                let names = extension_option_names("start", extensions.as_slice());
                let options = start_options(arguments.quiet, parsed, &names);
                let mut ui = TerminalUi::new(&mut *self.io.stdout, &mut *self.io.stderr)
                    .with_progress(!arguments.quiet);
                StartCommand::new(
                    self.services.registry(),
                    dispatcher.as_ref(),
                    &mut ui,
                    context,
                )
                .run(&options)?;
            }
            CliCommand::Stop(arguments) => {
                let mut ui = TerminalUi::new(&mut *self.io.stdout, &mut *self.io.stderr)
                    .with_progress(!arguments.quiet);
                StopCommand::new(self.services.registry(), &mut ui, context).run(StopOptions {
                    quiet: arguments.quiet,
                })?;
            }
            CliCommand::Doctor(arguments) => {
                let parsed = surfaces.read("doctor", &matches);
                let options = DoctorOptions {
                    categories: arguments.categories,
                    check_mem: forwarded_check_mem(&parsed),
                    quiet: arguments.quiet,
                };
                let mut ui = TerminalUi::new(&mut *self.io.stdout, &mut *self.io.stderr)
                    .with_progress(!arguments.quiet);
                DoctorCommand::new(dispatcher.as_ref(), &mut ui).run(&options)?;
            }
        }
        Ok(())
    }

    fn report_usage(&mut self, error: &clap::Error) -> ExitCode {
        let rendered = error.render().to_string();
        let written = if error.use_stderr() {
            write!(self.io.stderr, "{rendered}")
        } else {
            write!(self.io.stdout, "{rendered}")
        };
        if let Err(write_error) = written {
            tracing::debug!(target: "hearth::cli", error = %write_error, "failed to render usage");
        }
        u8::try_from(error.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from)
    }
}

/// Runs the CLI with the given arguments, working directory, and streams.
#[must_use]
pub fn run<I, W, E>(args: I, cwd: &Path, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with(args, cwd, &mut io, &OrthoConfigLoader, &SystemServices)
}

pub(crate) fn run_with<I, W, E, L, S>(
    args: I,
    cwd: &Path,
    io: &mut IoStreams<'_, W, E>,
    loader: &L,
    services: &S,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    S: Services,
{
    CliRunner::new(io, loader, services).run(args, cwd)
}
