//! Managed server instances.
//!
//! An instance is a server installation living in an install directory. The
//! [`Registry`] trait resolves the directory a command runs in to a boxed
//! [`Instance`]; [`SystemRegistry`] does so by walking up to the nearest
//! `.hearth-cli` marker and opening a [`LocalInstance`] there.
//!
//! The instance owns its running state. Callers ask [`Instance::is_running`]
//! each time rather than caching the answer.

mod config;
mod environment;
mod error;
mod instance;
mod local;
mod marker;
mod process;
mod registry;

pub use config::{ConfigSource, InstanceConfig};
pub use environment::Environment;
pub use error::{ConfigError, InstanceError, RegistryError};
pub use instance::{Instance, LaunchOptions};
pub use local::{LocalInstance, RUNTIME_DIR};
pub use marker::{InstanceMarker, MARKER_FILE};
pub use registry::{Registry, SystemRegistry, WorkingContext};
