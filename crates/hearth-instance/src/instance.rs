use std::path::Path;

use hearth_config::OptionValue;

use crate::config::ConfigSource;
use crate::environment::Environment;
use crate::error::InstanceError;

/// Capability object for one managed server installation.
///
/// Running state is owned by the implementation and queried on every call;
/// callers must not cache it.
pub trait Instance {
    /// Human-readable instance name.
    fn name(&self) -> &str;

    /// Install directory.
    fn dir(&self) -> &Path;

    /// Environment the instance runs in.
    fn environment(&self) -> &Environment;

    /// Configuration for the active environment.
    fn config(&self) -> &dyn ConfigSource;

    /// Reports whether the server process is currently alive.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError`] when the runtime state cannot be inspected.
    fn is_running(&self) -> Result<bool, InstanceError>;

    /// Validates that the instance can be started in its environment.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError`] describing the first problem found.
    fn check_environment(&self) -> Result<(), InstanceError>;

    /// Starts the server process.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError`] when the process cannot be launched or dies
    /// during startup.
    fn start(&self, options: &LaunchOptions) -> Result<(), InstanceError>;

    /// Stops the server process.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError`] when the process cannot be signalled or does
    /// not exit in time.
    fn stop(&self) -> Result<(), InstanceError>;
}

/// Values handed to [`Instance::start`].
///
/// Carries the option values contributed by extensions so the process layer
/// can expose them to the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaunchOptions {
    extension_options: Vec<(String, OptionValue)>,
}

impl LaunchOptions {
    /// Builds launch options from extension option values.
    #[must_use]
    pub const fn new(extension_options: Vec<(String, OptionValue)>) -> Self {
        Self { extension_options }
    }

    /// Iterates extension option values in registration order.
    pub fn extension_options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.extension_options
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns `true` when no extension options were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.extension_options.is_empty()
    }
}
