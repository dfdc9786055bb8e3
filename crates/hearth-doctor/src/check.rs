use std::path::Path;

use crate::request::DiagnosticRequest;

/// Inputs shared by every check in a run.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// Install directory under inspection.
    pub dir: &'a Path,
    /// Request that selected the check.
    pub request: &'a DiagnosticRequest,
}

/// A single diagnostic.
pub trait Check {
    /// Stable identifier, e.g. `free-memory`.
    fn id(&self) -> &str;

    /// Categories the check belongs to.
    fn categories(&self) -> &[&str];

    /// Returns a reason when the request asks for the check to be skipped.
    fn skip_reason(&self, request: &DiagnosticRequest) -> Option<String> {
        let _ = request;
        None
    }

    /// Runs the check, returning a description of the problem on failure.
    ///
    /// # Errors
    ///
    /// Returns the human-readable failure message.
    fn run(&self, context: &CheckContext<'_>) -> Result<(), String>;

    /// Returns `true` when the check belongs to any requested category.
    fn is_selected(&self, request: &DiagnosticRequest) -> bool {
        self.categories()
            .iter()
            .any(|category| request.includes(category))
    }
}
