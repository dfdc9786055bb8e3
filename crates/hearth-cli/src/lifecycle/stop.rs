//! `hearth stop`.

use hearth_instance::{Registry, WorkingContext};

use super::error::LifecycleError;
use super::types::{StopOptions, StopOutcome};
use crate::ui::Ui;

/// The `hearth stop` command.
pub struct StopCommand<'a, R: ?Sized, U> {
    registry: &'a R,
    ui: &'a mut U,
    context: WorkingContext,
}

impl<'a, R, U> StopCommand<'a, R, U>
where
    R: Registry + ?Sized,
    U: Ui,
{
    /// Wires the command to its collaborators.
    pub const fn new(registry: &'a R, ui: &'a mut U, context: WorkingContext) -> Self {
        Self {
            registry,
            ui,
            context,
        }
    }

    /// Stops the instance owning the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the instance cannot be resolved or
    /// stopped, or output cannot be written.
    pub fn run(&mut self, options: StopOptions) -> Result<StopOutcome, LifecycleError> {
        let instance = self.registry.get_instance(&self.context)?;
        if !instance.is_running()? {
            if !options.quiet {
                self.ui
                    .log(&format!("Instance '{}' is not running", instance.name()))?;
            }
            return Ok(StopOutcome::NotRunning);
        }
        let label = format!("Stopping {}", instance.name());
        self.ui.run(&label, || instance.stop())?;
        tracing::info!(target: "hearth::stop", instance = instance.name(), "instance stopped");
        if !options.quiet {
            self.ui
                .log(&format!("Instance '{}' stopped", instance.name()))?;
        }
        Ok(StopOutcome::Stopped)
    }
}
