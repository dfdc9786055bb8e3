//! Assembly of the full command surface and the option allow-list.

use clap::{ArgMatches, Command, CommandFactory};
use hearth_config::OptionValue;
use hearth_doctor::{CHECK_MEM_OPTION, DiagnosticsDispatcher};
use hearth_extensions::ExtensionDescriptor;

use crate::cli::{Cli, CliCommand};
use crate::lifecycle::StartOptions;
use crate::options::{
    OptionSurface, ParsedOption, configure_options, register_extension_options,
};

/// Option surfaces for every subcommand.
pub(crate) struct CommandSurfaces {
    surfaces: Vec<(&'static str, OptionSurface)>,
}

impl CommandSurfaces {
    /// Collects extension options for each subcommand, plus the diagnostics
    /// options of the subcommands that forward them.
    ///
    /// `start` only forwards `check-mem`, so its dispatcher hook always runs
    /// quiet. `stop` takes no diagnostics options.
    pub(crate) fn configure(
        extensions: &[ExtensionDescriptor],
        quiet: bool,
        dispatcher: &dyn DiagnosticsDispatcher,
    ) -> Self {
        let base = Cli::command();
        let surfaces = CliCommand::NAMES
            .iter()
            .filter_map(|name| {
                let subcommand = base.find_subcommand(name)?;
                let mut surface = OptionSurface::for_command(subcommand);
                match *name {
                    "start" => configure_options(name, &mut surface, extensions, true, dispatcher),
                    "doctor" => {
                        configure_options(name, &mut surface, extensions, quiet, dispatcher)
                    }
                    _ => register_extension_options(name, &mut surface, extensions),
                };
                Some((*name, surface))
            })
            .collect();
        Self { surfaces }
    }

    /// Builds the clap command with every runtime option attached.
    pub(crate) fn command(&self) -> Command {
        self.surfaces
            .iter()
            .fold(Cli::command(), |command, (name, surface)| {
                command.mut_subcommand(*name, |subcommand| surface.apply(subcommand))
            })
    }

    /// Reads the runtime options of `name` from its subcommand matches.
    pub(crate) fn read(&self, name: &str, matches: &ArgMatches) -> Vec<ParsedOption> {
        let Some(subcommand_matches) = matches.subcommand_matches(name) else {
            return Vec::new();
        };
        self.surfaces
            .iter()
            .find(|(surface_name, _)| *surface_name == name)
            .map(|(_, surface)| surface.read(subcommand_matches))
            .unwrap_or_default()
    }
}

/// Names of the options `extensions` declare for `command_name`.
pub(crate) fn extension_option_names(
    command_name: &str,
    extensions: &[ExtensionDescriptor],
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for table in extensions
        .iter()
        .filter_map(|extension| extension.options_for(command_name))
    {
        for (name, _) in table.iter() {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_owned());
            }
        }
    }
    names
}

/// Returns the memory-check flag when the operator supplied it.
pub(crate) fn forwarded_check_mem(parsed: &[ParsedOption]) -> Option<bool> {
    parsed
        .iter()
        .find(|option| option.name == CHECK_MEM_OPTION && option.explicit)
        .and_then(|option| option.value.as_bool())
}

/// Builds the start options from parsed runtime options.
///
/// Diagnostics only see `check-mem`; extension values only include options
/// an extension declared.
pub(crate) fn start_options(
    quiet: bool,
    parsed: Vec<ParsedOption>,
    extension_names: &[String],
) -> StartOptions {
    let check_mem = forwarded_check_mem(&parsed);
    let extension_values: Vec<(String, OptionValue)> = parsed
        .into_iter()
        .filter(|option| extension_names.contains(&option.name))
        .map(|option| (option.name, option.value))
        .collect();
    StartOptions::new()
        .with_quiet(quiet)
        .with_check_mem(check_mem)
        .with_extension_values(extension_values)
}
