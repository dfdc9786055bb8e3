use std::path::{Path, PathBuf};

use hearth_config::{OptionSink, OptionSpec};
use serde_json::Value;

use crate::check::{Check, CheckContext};
use crate::checks::{FolderPermissionsCheck, FreeMemoryCheck, InstanceFilesCheck};
use crate::dispatcher::DiagnosticsDispatcher;
use crate::error::DiagnosticError;
use crate::report::{CheckFailure, DiagnosticReport};
use crate::request::DiagnosticRequest;

/// Name of the option that toggles the memory check.
pub const CHECK_MEM_OPTION: &str = "check-mem";

/// Name of the option that selects categories for a standalone run.
pub const CATEGORIES_OPTION: &str = "categories";

/// Dispatcher running an ordered list of checks against an install directory.
pub struct Doctor {
    dir: PathBuf,
    checks: Vec<Box<dyn Check>>,
}

impl Doctor {
    /// Creates a doctor with the built-in checks.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_checks(
            dir,
            vec![
                Box::new(FreeMemoryCheck::default()),
                Box::new(FolderPermissionsCheck),
                Box::new(InstanceFilesCheck),
            ],
        )
    }

    /// Creates a doctor with a custom set of checks.
    #[must_use]
    pub fn with_checks(dir: impl Into<PathBuf>, checks: Vec<Box<dyn Check>>) -> Self {
        Self {
            dir: dir.into(),
            checks,
        }
    }

    /// Install directory the checks inspect.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }
}

impl DiagnosticsDispatcher for Doctor {
    fn run(&self, request: &DiagnosticRequest) -> Result<DiagnosticReport, DiagnosticError> {
        let context = CheckContext {
            dir: &self.dir,
            request,
        };
        let mut report = DiagnosticReport::new();
        let mut failures = Vec::new();
        for check in self.checks.iter().filter(|check| check.is_selected(request)) {
            if let Some(reason) = check.skip_reason(request) {
                tracing::debug!(target: "hearth::doctor", check = check.id(), %reason, "check skipped");
                report.record_skip(check.id(), reason);
                continue;
            }
            match check.run(&context) {
                Ok(()) => {
                    tracing::debug!(target: "hearth::doctor", check = check.id(), "check passed");
                    report.record_pass(check.id());
                }
                Err(message) => {
                    tracing::warn!(
                        target: "hearth::doctor",
                        check = check.id(),
                        %message,
                        "check failed"
                    );
                    failures.push(CheckFailure {
                        id: check.id().to_owned(),
                        message,
                    });
                }
            }
        }
        if failures.is_empty() {
            Ok(report)
        } else {
            Err(DiagnosticError::ChecksFailed { failures })
        }
    }

    fn configure_options(&self, sink: &mut dyn OptionSink, quiet: bool) {
        if !sink.contains(CHECK_MEM_OPTION) {
            sink.register(
                CHECK_MEM_OPTION,
                &OptionSpec::boolean()
                    .with_default(Value::Bool(true))
                    .with_description("Check that enough memory is available"),
            );
        }
        if !quiet && !sink.contains(CATEGORIES_OPTION) {
            sink.register(
                CATEGORIES_OPTION,
                &OptionSpec::array().with_description("Diagnostic categories to run"),
            );
        }
    }
}
