//! `hearth doctor`.

use hearth_doctor::{
    DiagnosticRequest, DiagnosticsDispatcher, INSTALL_CATEGORY, START_CATEGORY,
};

use super::error::LifecycleError;
use super::types::DoctorOptions;
use crate::ui::Ui;

/// Runs diagnostics without starting anything.
pub struct DoctorCommand<'a, D: ?Sized, U> {
    dispatcher: &'a D,
    ui: &'a mut U,
}

impl<'a, D, U> DoctorCommand<'a, D, U>
where
    D: DiagnosticsDispatcher + ?Sized,
    U: Ui,
{
    /// Wires the command to its collaborators.
    pub const fn new(dispatcher: &'a D, ui: &'a mut U) -> Self {
        Self { dispatcher, ui }
    }

    /// Runs the requested categories, or every category when none are given.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Diagnostics`] when any check fails, or
    /// [`LifecycleError::Output`] when output cannot be written.
    pub fn run(&mut self, options: &DoctorOptions) -> Result<(), LifecycleError> {
        let request = if options.categories.is_empty() {
            DiagnosticRequest::new([INSTALL_CATEGORY, START_CATEGORY])
        } else {
            DiagnosticRequest::new(options.categories.iter().cloned())
        }
        .with_quiet(options.quiet)
        .with_check_mem(options.check_mem);

        let dispatcher = self.dispatcher;
        let report = self
            .ui
            .run("Running doctor checks", || dispatcher.run(&request))?;
        if options.quiet {
            return Ok(());
        }
        for skipped in report.skipped() {
            self.ui
                .log(&format!("{} skipped: {}", skipped.id, skipped.reason))?;
        }
        self.ui.log(&format!(
            "{} doctor check(s) passed for {}",
            report.passed().len(),
            request.categories().join(", ")
        ))?;
        Ok(())
    }
}
