//! Command options contributed by extensions and diagnostics.
//!
//! [`configure_options`] collects the extra options for one command into an
//! [`OptionSink`]. [`OptionSurface`] is the sink used by the binary: it turns
//! each registration into a clap argument and reads the parsed values back.

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use hearth_config::{OptionKind, OptionSink, OptionSpec, OptionValue};
use hearth_doctor::DiagnosticsDispatcher;
use hearth_extensions::ExtensionDescriptor;

/// Registers the options `extensions` declare for `command_name`, then the
/// dispatcher's own options, on `sink`.
///
/// Extensions are visited in order and each table in declaration order. A
/// name that is already registered, whether built in or claimed by an
/// earlier extension, is left alone. The dispatcher is consulted exactly
/// once, even when there are no extensions.
pub fn configure_options<'s, S: OptionSink>(
    command_name: &str,
    sink: &'s mut S,
    extensions: &[ExtensionDescriptor],
    quiet: bool,
    dispatcher: &(impl DiagnosticsDispatcher + ?Sized),
) -> &'s mut S {
    let sink = register_extension_options(command_name, sink, extensions);
    dispatcher.configure_options(&mut *sink, quiet);
    sink
}

/// Registers only the options `extensions` declare for `command_name`.
pub fn register_extension_options<'s, S: OptionSink>(
    command_name: &str,
    sink: &'s mut S,
    extensions: &[ExtensionDescriptor],
) -> &'s mut S {
    for extension in extensions {
        let Some(table) = extension.options_for(command_name) else {
            continue;
        };
        for (name, spec) in table.iter() {
            if sink.contains(name) {
                tracing::debug!(
                    target: "hearth::extensions",
                    extension = extension.name(),
                    option = name,
                    command = command_name,
                    "option already registered"
                );
                continue;
            }
            sink.register(name, spec);
        }
    }
    sink
}

/// A value read back from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOption {
    /// Option name.
    pub name: String,
    /// Parsed value, or the declared default.
    pub value: OptionValue,
    /// `true` when the value came from the command line.
    pub explicit: bool,
}

/// [`OptionSink`] backed by a clap subcommand.
#[derive(Debug, Clone, Default)]
pub struct OptionSurface {
    reserved: Vec<String>,
    registered: Vec<(String, OptionSpec)>,
}

impl OptionSurface {
    /// Creates a surface for `command`, treating its existing argument ids,
    /// long flags, and aliases as taken, along with clap's generated help and
    /// version flags.
    #[must_use]
    pub fn for_command(command: &Command) -> Self {
        let mut reserved: Vec<String> = ["help", "version", "h", "V"]
            .into_iter()
            .map(String::from)
            .collect();
        for argument in command.get_arguments() {
            reserved.push(argument.get_id().as_str().to_owned());
            reserved.extend(argument.get_long().map(str::to_owned));
            reserved.extend(
                argument
                    .get_all_aliases()
                    .unwrap_or_default()
                    .into_iter()
                    .map(str::to_owned),
            );
            reserved.extend(argument.get_short().map(String::from));
        }
        Self {
            reserved,
            registered: Vec::new(),
        }
    }

    /// Registered options in registration order.
    pub fn registered(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.registered
            .iter()
            .map(|(name, spec)| (name.as_str(), spec))
    }

    fn is_taken(&self, name: &str) -> bool {
        self.reserved.iter().any(|taken| taken == name)
            || self.registered.iter().any(|(existing, spec)| {
                existing == name
                    || spec.alias() == Some(name)
                    || negated_name(existing).as_deref() == Some(name)
            })
    }

    /// Adds one clap argument per registered option to `command`.
    #[must_use]
    pub fn apply(&self, command: Command) -> Command {
        let mut command = command;
        for (name, spec) in &self.registered {
            command = command.arg(build_argument(name, spec, self.alias_for(name, spec)));
            let negation = negated_name(name)
                .filter(|negated| spec.kind() == OptionKind::Boolean && !self.is_declared(negated));
            if let Some(negated) = negation {
                command = command.arg(
                    Arg::new(negated.clone())
                        .long(negated)
                        .action(ArgAction::SetTrue)
                        .hide(true)
                        .conflicts_with(name.clone()),
                );
            }
        }
        command
    }

    fn is_declared(&self, name: &str) -> bool {
        self.reserved.iter().any(|taken| taken == name)
            || self.registered.iter().any(|(existing, _)| existing == name)
    }

    fn alias_for<'a>(&self, name: &str, spec: &'a OptionSpec) -> Option<&'a str> {
        let alias = spec.alias().filter(|alias| is_flag_name(alias))?;
        let claimed_earlier = self
            .registered
            .iter()
            .take_while(|(existing, _)| existing != name)
            .any(|(existing, other)| existing == alias || other.alias() == Some(alias));
        let clashes = claimed_earlier
            || self.reserved.iter().any(|taken| taken == alias)
            || self.registered.iter().any(|(existing, _)| existing == alias);
        (!clashes).then_some(alias)
    }

    /// Reads every registered option back from `matches`.
    ///
    /// Options without a value and without a default are omitted.
    #[must_use]
    pub fn read(&self, matches: &ArgMatches) -> Vec<ParsedOption> {
        self.registered
            .iter()
            .filter_map(|(name, spec)| read_option(matches, name, spec))
            .collect()
    }
}

impl OptionSink for OptionSurface {
    fn contains(&self, name: &str) -> bool {
        self.is_taken(name)
    }

    fn register(&mut self, name: &str, spec: &OptionSpec) {
        if !is_flag_name(name) {
            tracing::debug!(target: "hearth::cli", option = name, "option name is not a valid flag");
            return;
        }
        self.registered.push((name.to_owned(), spec.clone()));
    }
}

/// Whether `name` can be used as a long flag or alias.
fn is_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && !name.contains(|ch: char| ch == '=' || ch.is_whitespace())
}

fn negated_name(name: &str) -> Option<String> {
    (!name.starts_with("no-")).then(|| format!("no-{name}"))
}

fn build_argument(name: &str, spec: &OptionSpec, alias: Option<&str>) -> Arg {
    let mut argument = Arg::new(name.to_owned()).long(name.to_owned());
    if let Some(description) = spec.description() {
        argument = argument.help(description.to_owned());
    }
    if let Some(alias) = alias {
        let mut characters = alias.chars();
        argument = match (characters.next(), characters.next()) {
            (Some(short), None) => argument.short_alias(short),
            _ => argument.alias(alias.to_owned()),
        };
    }
    argument = match spec.kind() {
        OptionKind::Boolean => argument
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true")
            .value_parser(value_parser!(bool))
            .action(ArgAction::Set),
        OptionKind::String => argument.value_parser(value_parser!(String)),
        OptionKind::Number => argument
            .value_parser(value_parser!(f64))
            .allow_negative_numbers(true),
        OptionKind::Array => argument
            .num_args(1..)
            .value_parser(value_parser!(String))
            .action(ArgAction::Append),
    };
    if let Some(default) = spec.default_literal() {
        argument = argument.default_value(default);
    }
    argument
}

fn read_option(matches: &ArgMatches, name: &str, spec: &OptionSpec) -> Option<ParsedOption> {
    if spec.kind() == OptionKind::Boolean
        && let Some(negated) = negated_name(name)
        && matches.try_get_one::<bool>(&negated).ok().flatten() == Some(&true)
    {
        return Some(ParsedOption {
            name: name.to_owned(),
            value: OptionValue::Boolean(false),
            explicit: true,
        });
    }
    let value = match spec.kind() {
        OptionKind::Boolean => matches
            .try_get_one::<bool>(name)
            .ok()
            .flatten()
            .map(|flag| OptionValue::Boolean(*flag)),
        OptionKind::String => matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(|text| OptionValue::String(text.clone())),
        OptionKind::Number => matches
            .try_get_one::<f64>(name)
            .ok()
            .flatten()
            .map(|number| OptionValue::Number(*number)),
        OptionKind::Array => matches
            .try_get_many::<String>(name)
            .ok()
            .flatten()
            .map(|items| OptionValue::List(items.cloned().collect())),
    }?;
    Some(ParsedOption {
        name: name.to_owned(),
        value,
        explicit: matches.value_source(name) == Some(ValueSource::CommandLine),
    })
}
