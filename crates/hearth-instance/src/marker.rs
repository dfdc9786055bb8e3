//! The marker file that identifies an install directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::RegistryError;

/// File name of the marker written into every install directory.
pub const MARKER_FILE: &str = ".hearth-cli";

/// Contents of the marker file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstanceMarker {
    /// Instance name shown to operators.
    pub name: String,
    /// Environment the instance runs in.
    #[serde(default)]
    pub environment: Environment,
    /// Program and arguments that run the server in the foreground.
    #[serde(default)]
    pub command: Vec<String>,
}

impl InstanceMarker {
    /// Path of the marker file inside `dir`.
    #[must_use]
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MARKER_FILE)
    }

    /// Reads the marker stored in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ReadMarker`] or [`RegistryError::ParseMarker`]
    /// when the file cannot be read or decoded.
    pub fn read(dir: &Path) -> Result<Self, RegistryError> {
        let path = Self::path_in(dir);
        let content = fs::read_to_string(&path).map_err(|source| RegistryError::ReadMarker {
            path: path.clone(),
            source: Arc::new(source),
        })?;
        serde_json::from_str(&content).map_err(|source| RegistryError::ParseMarker {
            path,
            source: Arc::new(source),
        })
    }
}
