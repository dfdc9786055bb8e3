//! Instance lifecycle commands.
//!
//! - `types` defines command options and outcomes.
//! - `error` captures the error surface shared by every command.
//! - `start` implements the startup orchestration.
//! - `stop` stops a running instance.
//! - `doctor` runs diagnostics on their own.

mod doctor;
mod error;
mod start;
mod stop;
mod types;

pub use doctor::DoctorCommand;
pub use error::LifecycleError;
pub use start::{StartCommand, diagnostic_request};
pub use stop::StopCommand;
pub use types::{DoctorOptions, StartOptions, StartOutcome, StopOptions, StopOutcome};
