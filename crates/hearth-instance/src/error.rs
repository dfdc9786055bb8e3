//! Errors raised by instance resolution and instance control.
//!
//! I/O and JSON failures are wrapped in `Arc` so the errors stay cheap to
//! clone into test doubles and satisfy the `result_large_err` lint.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while resolving a working directory to an instance.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// No marker file was found in the directory or any of its ancestors.
    #[error("no hearth instance found in {path:?} or any parent directory")]
    NotFound {
        /// Directory the search started from.
        path: PathBuf,
    },
    /// The marker file could not be read.
    #[error("failed to read instance marker {path:?}: {source}")]
    ReadMarker {
        /// Marker file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The marker file is not valid JSON or is missing fields.
    #[error("failed to parse instance marker {path:?}: {source}")]
    ParseMarker {
        /// Marker file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },
    /// The instance configuration file exists but could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading an instance configuration file.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read instance config {path:?}: {source}")]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The file is not valid JSON.
    #[error("failed to parse instance config {path:?}: {source}")]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },
    /// The top-level JSON value is not an object.
    #[error("instance config {path:?} must contain a JSON object")]
    NotAnObject {
        /// Config file path.
        path: PathBuf,
    },
}

/// Errors raised by an [`Instance`](crate::Instance).
#[derive(Debug, Clone, Error)]
pub enum InstanceError {
    /// The instance has no environment name.
    #[error("instance '{name}' does not declare an environment")]
    MissingEnvironment {
        /// Instance name.
        name: String,
    },
    /// The configuration file for the active environment is missing.
    #[error(
        "no configuration for the {environment} environment at {path:?}; create it before starting"
    )]
    MissingConfig {
        /// Active environment.
        environment: String,
        /// Expected config path.
        path: PathBuf,
    },
    /// A configuration value is missing or malformed.
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidConfig {
        /// Dotted configuration key.
        key: String,
        /// Human-readable description of the problem.
        message: String,
    },
    /// The instance declares no start command.
    #[error("instance '{name}' does not declare a start command")]
    MissingCommand {
        /// Instance name.
        name: String,
    },
    /// A live process is already recorded for the instance.
    #[error("instance '{name}' is already running (pid {pid})")]
    AlreadyRunning {
        /// Instance name.
        name: String,
        /// Recorded process id.
        pid: u32,
    },
    /// The runtime directory could not be created.
    #[error("failed to prepare runtime directory {path:?}: {source}")]
    RuntimeDirectory {
        /// Runtime directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The server process could not be spawned.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Program that was executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The server process exited during the startup grace period.
    #[error("instance '{name}' exited during startup (status: {exit_status:?}); see {log_path:?}")]
    StartFailed {
        /// Instance name.
        name: String,
        /// Exit code, when the process exited normally.
        exit_status: Option<i32>,
        /// Log file capturing the process output.
        log_path: PathBuf,
    },
    /// The spawned process could not be monitored.
    #[error("failed to monitor instance process: {source}")]
    MonitorProcess {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The pid file could not be read, written, or removed.
    #[error("failed to access pid file {path:?}: {source}")]
    PidFile {
        /// Pid file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The pid file does not contain a process id.
    #[error("failed to parse pid file {path:?}: {source}")]
    ParsePid {
        /// Pid file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: std::num::ParseIntError,
    },
    /// The process could not be signalled.
    #[error("failed to signal pid {pid}: {source}")]
    Signal {
        /// Process id.
        pid: u32,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
    /// The process did not exit in time after being signalled.
    #[error("instance pid {pid} did not stop within {timeout_ms} ms")]
    ShutdownTimeout {
        /// Process id.
        pid: u32,
        /// Elapsed wait in milliseconds.
        timeout_ms: u64,
    },
    /// Process control is not available on this platform.
    #[cfg(not(unix))]
    #[error("platform does not support instance process control")]
    UnsupportedPlatform,
}
