//! Diagnostics for `hearth` instances.
//!
//! A [`Doctor`] runs a list of [`Check`]s against an install directory. Each
//! check belongs to one or more categories (`start`, `install`), and a
//! [`DiagnosticRequest`] selects which categories to run. Callers depend on
//! the [`DiagnosticsDispatcher`] trait, which also lets diagnostics add their
//! own flags to a command surface.

mod check;
pub mod checks;
mod dispatcher;
mod doctor;
mod error;
mod report;
mod request;

pub use check::{Check, CheckContext};
pub use dispatcher::DiagnosticsDispatcher;
pub use doctor::{CATEGORIES_OPTION, CHECK_MEM_OPTION, Doctor};
pub use error::DiagnosticError;
pub use report::{CheckFailure, DiagnosticReport, SkippedCheck};
pub use request::{DiagnosticRequest, INSTALL_CATEGORY, START_CATEGORY};
