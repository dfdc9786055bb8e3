//! Resolution of a working directory to the instance that owns it.

use std::path::{Path, PathBuf};

use crate::error::RegistryError;
use crate::instance::Instance;
use crate::local::LocalInstance;
use crate::marker::InstanceMarker;

/// Directory a command was invoked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingContext {
    dir: PathBuf,
}

impl WorkingContext {
    /// Creates a context rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the working directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }
}

/// Looks up the instance for a working context.
pub trait Registry {
    /// Returns the instance that owns `context`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when no instance can be resolved.
    fn get_instance(&self, context: &WorkingContext) -> Result<Box<dyn Instance>, RegistryError>;
}

/// Registry that resolves instances from marker files on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRegistry;

impl SystemRegistry {
    /// Finds the closest directory at or above `start` holding a marker.
    #[must_use]
    pub fn locate(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|candidate| InstanceMarker::path_in(candidate).is_file())
            .map(Path::to_path_buf)
    }
}

impl Registry for SystemRegistry {
    fn get_instance(&self, context: &WorkingContext) -> Result<Box<dyn Instance>, RegistryError> {
        let dir = Self::locate(context.dir()).ok_or_else(|| RegistryError::NotFound {
            path: context.dir().to_path_buf(),
        })?;
        tracing::debug!(
            target: "hearth::instance",
            dir = %dir.display(),
            "resolved instance directory"
        );
        let instance = LocalInstance::open(&dir)?;
        Ok(Box::new(instance))
    }
}
