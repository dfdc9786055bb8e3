use thiserror::Error;

use crate::report::CheckFailure;

/// Errors returned by a diagnostics dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    /// One or more checks failed.
    #[error("{}", describe_failures(.failures))]
    ChecksFailed {
        /// Every failure, in execution order.
        failures: Vec<CheckFailure>,
    },
}

impl DiagnosticError {
    /// Returns the failures carried by the error.
    #[must_use]
    pub const fn failures(&self) -> &[CheckFailure] {
        match self {
            Self::ChecksFailed { failures } => failures.as_slice(),
        }
    }
}

fn describe_failures(failures: &[CheckFailure]) -> String {
    let details = failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    match failures.len() {
        1 => format!("doctor check failed: {details}"),
        count => format!("{count} doctor checks failed: {details}"),
    }
}
