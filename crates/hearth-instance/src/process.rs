//! Process bookkeeping for locally managed instances.
//!
//! Provides pid file access, liveness checks and signalling. The pid file
//! is the only record of a running server; a pid file whose process has gone
//! away is treated as stale.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::InstanceError;

#[cfg(unix)]
use libc::{EPERM, SIGTERM, kill};

pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub(crate) fn read_pid(path: &Path) -> Result<Option<u32>, InstanceError> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<u32>()
                .map(Some)
                .map_err(|source| InstanceError::ParsePid {
                    path: path.to_path_buf(),
                    source,
                })
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(pid_file_error(path, source)),
    }
}

pub(crate) fn write_pid(path: &Path, pid: u32) -> Result<(), InstanceError> {
    fs::write(path, format!("{pid}\n")).map_err(|source| pid_file_error(path, source))
}

pub(crate) fn remove_pid(path: &Path) -> Result<(), InstanceError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(pid_file_error(path, source)),
    }
}

fn pid_file_error(path: &Path, source: io::Error) -> InstanceError {
    InstanceError::PidFile {
        path: path.to_path_buf(),
        source: Arc::new(source),
    }
}

/// Reports whether a process with `pid` exists.
#[cfg(unix)]
pub(crate) fn process_alive(pid: u32) -> Result<bool, InstanceError> {
    // Pid 0 addresses the caller's own process group.
    if pid == 0 {
        return Ok(false);
    }
    let Ok(raw) = libc::pid_t::try_from(pid) else {
        return Ok(false);
    };
    // SAFETY: signal 0 performs the permission and existence checks of
    // `kill(2)` without delivering anything.
    let result = unsafe { kill(raw, 0) };
    if result == 0 {
        return Ok(true);
    }
    let error = io::Error::last_os_error();
    // EPERM means the process exists but belongs to someone else.
    Ok(error.raw_os_error() == Some(EPERM))
}

#[cfg(not(unix))]
pub(crate) fn process_alive(_pid: u32) -> Result<bool, InstanceError> {
    Err(InstanceError::UnsupportedPlatform)
}

/// Requests a graceful shutdown with SIGTERM.
#[cfg(unix)]
pub(crate) fn signal_terminate(pid: u32) -> Result<(), InstanceError> {
    let raw = libc::pid_t::try_from(pid)
        .ok()
        .filter(|raw| *raw > 0)
        .ok_or_else(|| InstanceError::Signal {
            pid,
            source: Arc::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                "pid out of range",
            )),
        })?;
    // SAFETY: `kill(2)` is memory-safe even when the pid is invalid; the
    // kernel reports an error instead.
    let result = unsafe { kill(raw, SIGTERM) };
    if result == 0 {
        Ok(())
    } else {
        Err(InstanceError::Signal {
            pid,
            source: Arc::new(io::Error::last_os_error()),
        })
    }
}

#[cfg(not(unix))]
pub(crate) fn signal_terminate(_pid: u32) -> Result<(), InstanceError> {
    Err(InstanceError::UnsupportedPlatform)
}

/// Polls until the process exits or `timeout` elapses.
pub(crate) fn wait_for_exit(pid: u32, timeout: Duration) -> Result<(), InstanceError> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if !process_alive(pid)? {
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL);
    }
    Err(InstanceError::ShutdownTimeout {
        pid,
        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
    })
}
