use std::fmt;

use serde::Serialize;

/// A check that did not pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    /// Identifier of the failing check.
    pub id: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.message)
    }
}

/// A check that was selected but not executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCheck {
    /// Identifier of the skipped check.
    pub id: String,
    /// Why the check did not run.
    pub reason: String,
}

/// Outcome of a successful diagnostics run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    passed: Vec<String>,
    skipped: Vec<SkippedCheck>,
}

impl DiagnosticReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            passed: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Records a passing check.
    pub fn record_pass(&mut self, id: impl Into<String>) {
        self.passed.push(id.into());
    }

    /// Records a skipped check.
    pub fn record_skip(&mut self, id: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedCheck {
            id: id.into(),
            reason: reason.into(),
        });
    }

    /// Identifiers of checks that passed, in execution order.
    #[must_use]
    pub const fn passed(&self) -> &[String] {
        self.passed.as_slice()
    }

    /// Checks that were skipped, in execution order.
    #[must_use]
    pub const fn skipped(&self) -> &[SkippedCheck] {
        self.skipped.as_slice()
    }
}
