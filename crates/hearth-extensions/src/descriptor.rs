//! Extension descriptors.
//!
//! A descriptor is the parsed form of an extension manifest:
//!
//! ```json
//! {
//!   "name": "mailer",
//!   "version": "1.2.0",
//!   "config": {
//!     "options": {
//!       "start": {
//!         "smtp-host": {"type": "string", "description": "Relay host"}
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Options are keyed by command name, and each table keeps the order its
//! options were declared in.

use std::collections::BTreeMap;

use hearth_config::OptionTable;
use serde::{Deserialize, Serialize};

use crate::error::ExtensionError;

/// Read-only description of an installed extension.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtensionDescriptor {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    config: ExtensionConfig,
}

/// Configuration block of a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtensionConfig {
    #[serde(default)]
    options: BTreeMap<String, OptionTable>,
}

impl ExtensionDescriptor {
    /// Creates a descriptor with no command options.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            config: ExtensionConfig::default(),
        }
    }

    /// Declares the options this extension adds to `command`.
    #[must_use]
    pub fn with_options(mut self, command: impl Into<String>, options: OptionTable) -> Self {
        self.config.options.insert(command.into(), options);
        self
    }

    /// Returns the extension name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the extension version.
    #[must_use]
    pub const fn version(&self) -> &str {
        self.version.as_str()
    }

    /// Returns the option table declared for `command`, if any.
    #[must_use]
    pub fn options_for(&self, command: &str) -> Option<&OptionTable> {
        self.config.options.get(command)
    }

    /// Validates the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::InvalidDescriptor`] when the name is blank
    /// or an option name is empty.
    pub fn validate(&self) -> Result<(), ExtensionError> {
        if self.name.trim().is_empty() {
            return Err(ExtensionError::InvalidDescriptor {
                message: String::from("extension name must not be empty"),
            });
        }
        for (command, table) in &self.config.options {
            if table.iter().any(|(name, _)| name.trim().is_empty()) {
                return Err(ExtensionError::InvalidDescriptor {
                    message: format!(
                        "extension '{}' declares an unnamed option for '{command}'",
                        self.name
                    ),
                });
            }
        }
        Ok(())
    }
}
