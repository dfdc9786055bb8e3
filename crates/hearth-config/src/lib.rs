//! Shared configuration for the `hearth` command-line tool.
//!
//! [`Config`] is loaded through `ortho_config`, which layers built-in
//! defaults, an optional `hearth.toml` file, `HEARTH_*` environment variables,
//! and command-line flags (highest precedence). The crate also defines the
//! option specifications that extensions and the diagnostics dispatcher use to
//! contribute flags to a command surface; see [`options`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

mod defaults;
mod logging;
pub mod options;

pub use defaults::{
    DEFAULT_LOG_FILTER, default_log_filter, default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use options::{OptionKind, OptionSink, OptionSpec, OptionTable, OptionValue};
pub use ortho_config::OrthoConfig;

/// Configuration consumed by the `hearth` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HEARTH")]
pub struct Config {
    /// Filter expression passed to the tracing subscriber.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for structured log events.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Directory used instead of the process working directory when locating
    /// the managed instance.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            dir: None,
        }
    }
}

impl Config {
    /// Returns the configured log filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the configured log format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the working-directory override, if one was configured.
    #[must_use]
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Resolves the directory commands operate in.
    ///
    /// The configured override wins; relative overrides are joined onto
    /// `cwd`.
    #[must_use]
    pub fn working_dir(&self, cwd: &Path) -> PathBuf {
        match self.dir() {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }
}
