use serde::{Deserialize, Serialize};

/// Category run before an instance is started.
pub const START_CATEGORY: &str = "start";

/// Category run before an instance is installed.
pub const INSTALL_CATEGORY: &str = "install";

/// Parameters for one diagnostics run.
///
/// Serialises with camel-cased keys; `checkMem` is omitted unless it was
/// explicitly supplied:
///
/// ```json
/// {"categories": ["start"], "quiet": false, "checkMem": false}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRequest {
    categories: Vec<String>,
    #[serde(default)]
    quiet: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    check_mem: Option<bool>,
}

impl DiagnosticRequest {
    /// Creates a request for `categories`, dropping repeated names while
    /// keeping first occurrences in order.
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for category in categories {
            let name: String = category.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self {
            categories: unique,
            quiet: false,
            check_mem: None,
        }
    }

    /// Sets whether the run should stay silent.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Forwards the memory-check flag.
    #[must_use]
    pub const fn with_check_mem(mut self, check_mem: Option<bool>) -> Self {
        self.check_mem = check_mem;
        self
    }

    /// Requested categories in order.
    #[must_use]
    pub const fn categories(&self) -> &[String] {
        self.categories.as_slice()
    }

    /// Returns `true` when `category` was requested.
    #[must_use]
    pub fn includes(&self, category: &str) -> bool {
        self.categories.iter().any(|requested| requested == category)
    }

    /// Quiet flag.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Forwarded memory-check flag, if supplied.
    #[must_use]
    pub const fn check_mem(&self) -> Option<bool> {
        self.check_mem
    }
}
