//! Lifecycle command options and outcomes.

use hearth_config::OptionValue;

/// Options for `hearth start`, fixed for the lifetime of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartOptions {
    quiet: bool,
    check_mem: Option<bool>,
    extension_values: Vec<(String, OptionValue)>,
}

impl StartOptions {
    /// Creates default options: verbose, nothing forwarded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses informational output.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Sets the memory-check flag forwarded to diagnostics.
    #[must_use]
    pub const fn with_check_mem(mut self, check_mem: Option<bool>) -> Self {
        self.check_mem = check_mem;
        self
    }

    /// Sets the values of extension-contributed options.
    #[must_use]
    pub fn with_extension_values(mut self, values: Vec<(String, OptionValue)>) -> Self {
        self.extension_values = values;
        self
    }

    /// Quiet flag.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Memory-check flag, `None` when not supplied.
    #[must_use]
    pub const fn check_mem(&self) -> Option<bool> {
        self.check_mem
    }

    /// Extension option values in registration order.
    #[must_use]
    pub const fn extension_values(&self) -> &[(String, OptionValue)] {
        self.extension_values.as_slice()
    }
}

/// Result of a successful `hearth start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The instance was started by this invocation.
    Started,
    /// The instance was already running; nothing was done.
    AlreadyRunning,
}

/// Options for `hearth stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopOptions {
    /// Suppresses informational output.
    pub quiet: bool,
}

/// Result of a successful `hearth stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The instance was stopped by this invocation.
    Stopped,
    /// The instance was not running; nothing was done.
    NotRunning,
}

/// Options for `hearth doctor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctorOptions {
    /// Categories to run; empty selects every category.
    pub categories: Vec<String>,
    /// Memory-check flag, `None` when not supplied.
    pub check_mem: Option<bool>,
    /// Suppresses informational output.
    pub quiet: bool,
}
