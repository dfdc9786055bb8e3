//! Error types for lifecycle commands.

use std::io;

use hearth_doctor::DiagnosticError;
use hearth_instance::{InstanceError, RegistryError};
use thiserror::Error;

/// Errors raised while executing lifecycle commands.
///
/// Collaborator errors pass through unchanged so the operator sees the
/// original message.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The working directory could not be resolved to an instance.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The instance rejected its environment or failed to start or stop.
    #[error(transparent)]
    Instance(#[from] InstanceError),
    /// Diagnostics reported problems.
    #[error(transparent)]
    Diagnostics(#[from] DiagnosticError),
    /// Writing user-facing output failed.
    #[error("failed to write command output: {0}")]
    Output(#[from] io::Error),
}
