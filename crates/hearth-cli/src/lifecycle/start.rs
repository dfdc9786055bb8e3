//! Startup orchestration for `hearth start`.
//!
//! The flow is ordered and short-circuits on the first failure:
//!
//! 1. resolve the instance for the working directory;
//! 2. stop early when it is already running;
//! 3. validate its environment;
//! 4. warn when production serves a non-https URL;
//! 5. run the `start` diagnostics;
//! 6. start the instance inside a UI task;
//! 7. report where it is reachable.
//!
//! Nothing is rolled back: every step before the start only reads state.

use hearth_doctor::{DiagnosticRequest, DiagnosticsDispatcher, START_CATEGORY};
use hearth_instance::{Instance, LaunchOptions, Registry, WorkingContext};

use super::error::LifecycleError;
use super::types::{StartOptions, StartOutcome};
use crate::ui::Ui;

/// Builds the diagnostics request for a start.
///
/// Only the memory-check flag is forwarded from the start options; every
/// other option stays with the start command.
#[must_use]
pub fn diagnostic_request(options: &StartOptions) -> DiagnosticRequest {
    DiagnosticRequest::new([START_CATEGORY])
        .with_quiet(options.quiet())
        .with_check_mem(options.check_mem())
}

/// The `hearth start` command.
pub struct StartCommand<'a, R: ?Sized, D: ?Sized, U> {
    registry: &'a R,
    dispatcher: &'a D,
    ui: &'a mut U,
    context: WorkingContext,
}

impl<'a, R, D, U> StartCommand<'a, R, D, U>
where
    R: Registry + ?Sized,
    D: DiagnosticsDispatcher + ?Sized,
    U: Ui,
{
    /// Wires the command to its collaborators.
    pub const fn new(
        registry: &'a R,
        dispatcher: &'a D,
        ui: &'a mut U,
        context: WorkingContext,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            ui,
            context,
        }
    }

    /// Starts the instance owning the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError`] when the instance cannot be resolved, its
    /// environment is invalid, diagnostics fail, it fails to start, or
    /// output cannot be written.
    pub fn run(&mut self, options: &StartOptions) -> Result<StartOutcome, LifecycleError> {
        let instance = self.registry.get_instance(&self.context)?;
        if instance.is_running()? {
            tracing::info!(
                target: "hearth::start",
                instance = instance.name(),
                "instance already running"
            );
            if !options.quiet() {
                self.ui
                    .log(&format!("Instance '{}' is already running", instance.name()))?;
            }
            return Ok(StartOutcome::AlreadyRunning);
        }

        instance.check_environment()?;
        self.warn_if_insecure(instance.as_ref())?;

        let request = diagnostic_request(options);
        let report = self.dispatcher.run(&request)?;
        tracing::debug!(
            target: "hearth::start",
            passed = report.passed().len(),
            skipped = report.skipped().len(),
            "diagnostics passed"
        );

        let launch = LaunchOptions::new(options.extension_values().to_vec());
        let label = format!("Starting {}", instance.name());
        self.ui.run(&label, || instance.start(&launch))?;
        tracing::info!(
            target: "hearth::start",
            instance = instance.name(),
            environment = %instance.environment(),
            "instance started"
        );

        if !options.quiet() {
            self.report_started(instance.as_ref())?;
        }
        Ok(StartOutcome::Started)
    }

    fn warn_if_insecure(&mut self, instance: &dyn Instance) -> Result<(), LifecycleError> {
        let url = instance.config().get_str("url");
        if !instance.environment().is_production() {
            return Ok(());
        }
        if url.as_deref().is_some_and(|value| value.starts_with("https://")) {
            return Ok(());
        }
        let shown = url.as_deref().unwrap_or("<unset>");
        self.ui.warn(&format!(
            "production url '{shown}' does not use https; using https for all URLs is highly recommended"
        ))?;
        Ok(())
    }

    fn report_started(&mut self, instance: &dyn Instance) -> Result<(), LifecycleError> {
        self.ui.log(&format!(
            "Instance '{}' started in the {} environment",
            instance.name(),
            instance.environment()
        ))?;
        let config = instance.config();
        let admin = config.get_str("admin.url").or_else(|| config.get_str("url"));
        let line = admin.map_or_else(
            || String::from("Admin interface address is not configured"),
            |address| format!("Admin interface available at {address}"),
        );
        self.ui.log(&line)?;
        Ok(())
    }
}
