//! Instance implementation backed by an install directory on disk.
//!
//! Layout of an install directory:
//!
//! - `.hearth-cli`: the [`InstanceMarker`] (name, environment, start command).
//! - `config.<environment>.json`: configuration for the active environment.
//! - `.hearth/instance.pid`: pid of the running server, when there is one.
//! - `.hearth/instance.log`: stdout and stderr of the server process.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{ConfigSource, InstanceConfig};
use crate::environment::Environment;
use crate::error::{InstanceError, RegistryError};
use crate::instance::{Instance, LaunchOptions};
use crate::marker::InstanceMarker;
use crate::process::{
    POLL_INTERVAL, process_alive, read_pid, remove_pid, signal_terminate, wait_for_exit,
    write_pid,
};

/// Directory, relative to the install directory, holding runtime artefacts.
pub const RUNTIME_DIR: &str = ".hearth";

const DEFAULT_STARTUP_GRACE: Duration = Duration::from_secs(2);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);
const OPTION_VARIABLE_PREFIX: &str = "HEARTH_OPT_";

/// An instance living in a local install directory.
#[derive(Debug, Clone)]
pub struct LocalInstance {
    dir: PathBuf,
    marker: InstanceMarker,
    config: InstanceConfig,
    config_present: bool,
    startup_grace: Duration,
    shutdown_timeout: Duration,
}

impl LocalInstance {
    /// Opens the instance installed in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the marker is unreadable or the
    /// environment's config file exists but cannot be parsed.
    pub fn open(dir: &Path) -> Result<Self, RegistryError> {
        let marker = InstanceMarker::read(dir)?;
        let config_path = dir.join(marker.environment.config_file_name());
        let loaded = InstanceConfig::load(&config_path)?;
        let config_present = loaded.is_some();
        Ok(Self {
            dir: dir.to_path_buf(),
            marker,
            config: loaded.unwrap_or_default(),
            config_present,
            startup_grace: DEFAULT_STARTUP_GRACE,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        })
    }

    /// Overrides how long a freshly spawned process must survive before the
    /// start counts as successful.
    #[must_use]
    pub const fn with_startup_grace(mut self, grace: Duration) -> Self {
        self.startup_grace = grace;
        self
    }

    /// Overrides how long `stop` waits for the process to exit.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Directory holding runtime artefacts.
    #[must_use]
    pub fn runtime_dir(&self) -> PathBuf {
        self.dir.join(RUNTIME_DIR)
    }

    /// Path of the pid file.
    #[must_use]
    pub fn pid_path(&self) -> PathBuf {
        self.runtime_dir().join("instance.pid")
    }

    /// Path of the process log.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.runtime_dir().join("instance.log")
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(self.marker.environment.config_file_name())
    }

    fn live_pid(&self) -> Result<Option<u32>, InstanceError> {
        let pid_path = self.pid_path();
        let Some(pid) = read_pid(&pid_path)? else {
            return Ok(None);
        };
        if process_alive(pid)? {
            return Ok(Some(pid));
        }
        tracing::warn!(
            target: "hearth::instance",
            pid,
            path = %pid_path.display(),
            "removing stale pid file"
        );
        remove_pid(&pid_path)?;
        Ok(None)
    }

    fn open_log(&self) -> Result<(File, File), InstanceError> {
        let runtime_dir = self.runtime_dir();
        let runtime_error = |source: io::Error| InstanceError::RuntimeDirectory {
            path: runtime_dir.clone(),
            source: Arc::new(source),
        };
        fs::create_dir_all(&runtime_dir).map_err(runtime_error)?;
        let stdout = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .map_err(runtime_error)?;
        let stderr = stdout.try_clone().map_err(runtime_error)?;
        Ok((stdout, stderr))
    }

    fn build_command(&self, options: &LaunchOptions) -> Result<Command, InstanceError> {
        let Some((program, arguments)) = self.marker.command.split_first() else {
            return Err(InstanceError::MissingCommand {
                name: self.marker.name.clone(),
            });
        };
        let mut command = Command::new(program);
        command
            .args(arguments)
            .current_dir(&self.dir)
            .env("HEARTH_ENV", self.marker.environment.as_str());
        if let Some(url) = self.config.get_str("url") {
            command.env("HEARTH_URL", url);
        }
        for (name, value) in options.extension_options() {
            command.env(option_variable(name), value.to_string());
        }
        Ok(command)
    }

    fn await_startup(
        &self,
        child: &mut Child,
        pid_path: &Path,
    ) -> Result<(), InstanceError> {
        let deadline = Instant::now() + self.startup_grace;
        while Instant::now() < deadline {
            let status = child
                .try_wait()
                .map_err(|source| InstanceError::MonitorProcess {
                    source: Arc::new(source),
                })?;
            if let Some(status) = status {
                if let Err(error) = remove_pid(pid_path) {
                    tracing::warn!(
                        target: "hearth::instance",
                        %error,
                        path = %pid_path.display(),
                        "failed to remove pid file of exited process"
                    );
                }
                return Err(InstanceError::StartFailed {
                    name: self.marker.name.clone(),
                    exit_status: status.code(),
                    log_path: self.log_path(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
        Ok(())
    }
}

/// Kills and reaps a child whose pid could not be recorded.
fn discard_child(child: &mut Child) {
    let pid = child.id();
    if let Err(error) = child.kill() {
        tracing::warn!(target: "hearth::instance", pid, %error, "failed to kill unrecorded process");
    }
    if let Err(error) = child.wait() {
        tracing::warn!(target: "hearth::instance", pid, %error, "failed to reap unrecorded process");
    }
}

/// Environment variable carrying the value of extension option `name`.
fn option_variable(name: &str) -> String {
    let suffix: String = name
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' => ch.to_ascii_uppercase(),
            _ => '_',
        })
        .collect();
    format!("{OPTION_VARIABLE_PREFIX}{suffix}")
}

impl Instance for LocalInstance {
    fn name(&self) -> &str {
        self.marker.name.as_str()
    }

    fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    fn environment(&self) -> &Environment {
        &self.marker.environment
    }

    fn config(&self) -> &dyn ConfigSource {
        &self.config
    }

    fn is_running(&self) -> Result<bool, InstanceError> {
        self.live_pid().map(|pid| pid.is_some())
    }

    fn check_environment(&self) -> Result<(), InstanceError> {
        if self.marker.environment.as_str().is_empty() {
            return Err(InstanceError::MissingEnvironment {
                name: self.marker.name.clone(),
            });
        }
        if !self.config_present {
            return Err(InstanceError::MissingConfig {
                environment: self.marker.environment.to_string(),
                path: self.config_path(),
            });
        }
        let Some(url) = self.config.get_str("url") else {
            return Err(InstanceError::InvalidConfig {
                key: String::from("url"),
                message: String::from("a site URL must be configured"),
            });
        };
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InstanceError::InvalidConfig {
                key: String::from("url"),
                message: format!("'{url}' must use the http or https scheme"),
            });
        }
        Ok(())
    }

    fn start(&self, options: &LaunchOptions) -> Result<(), InstanceError> {
        if let Some(pid) = self.live_pid()? {
            return Err(InstanceError::AlreadyRunning {
                name: self.marker.name.clone(),
                pid,
            });
        }
        let mut command = self.build_command(options)?;
        let (stdout, stderr) = self.open_log()?;
        command
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        let program = command.get_program().to_string_lossy().into_owned();
        let mut child = command
            .spawn()
            .map_err(|source| InstanceError::Launch {
                program,
                source: Arc::new(source),
            })?;
        let pid_path = self.pid_path();
        if let Err(error) = write_pid(&pid_path, child.id()) {
            discard_child(&mut child);
            return Err(error);
        }
        self.await_startup(&mut child, &pid_path)?;
        tracing::info!(
            target: "hearth::instance",
            instance = %self.marker.name,
            pid = child.id(),
            environment = %self.marker.environment,
            "instance process started"
        );
        Ok(())
    }

    fn stop(&self) -> Result<(), InstanceError> {
        let pid_path = self.pid_path();
        let Some(pid) = self.live_pid()? else {
            return Ok(());
        };
        signal_terminate(pid)?;
        wait_for_exit(pid, self.shutdown_timeout)?;
        remove_pid(&pid_path)?;
        tracing::info!(
            target: "hearth::instance",
            instance = %self.marker.name,
            pid,
            "instance process stopped"
        );
        Ok(())
    }
}
