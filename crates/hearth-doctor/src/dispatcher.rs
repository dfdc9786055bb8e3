use hearth_config::OptionSink;

use crate::error::DiagnosticError;
use crate::report::DiagnosticReport;
use crate::request::DiagnosticRequest;

/// Entry point for running diagnostics.
///
/// The orchestrator depends on this trait rather than on [`Doctor`] so the
/// checks behind it stay replaceable.
///
/// [`Doctor`]: crate::Doctor
pub trait DiagnosticsDispatcher {
    /// Runs every check selected by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosticError`] when any selected check fails.
    fn run(&self, request: &DiagnosticRequest) -> Result<DiagnosticReport, DiagnosticError>;

    /// Registers the options diagnostics understand on `sink`.
    fn configure_options(&self, sink: &mut dyn OptionSink, quiet: bool);
}
