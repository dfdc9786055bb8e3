//! Error types for extension discovery and registration.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors raised while loading or registering extensions.
#[derive(Debug, Clone, Error)]
pub enum ExtensionError {
    /// The extensions directory exists but could not be listed.
    #[error("failed to read extensions directory {path:?}: {source}")]
    ReadDirectory {
        /// Directory that was listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A manifest file could not be read.
    #[error("failed to read extension manifest {path:?}: {source}")]
    ReadManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// A manifest file is not a valid descriptor.
    #[error("failed to parse extension manifest {path:?}: {source}")]
    ParseManifest {
        /// Manifest path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: Arc<serde_json::Error>,
    },

    /// A descriptor failed validation.
    #[error("invalid extension descriptor: {message}")]
    InvalidDescriptor {
        /// Description of the problem.
        message: String,
    },

    /// An extension with the same name is already registered.
    #[error("extension '{name}' is already registered")]
    Duplicate {
        /// Conflicting extension name.
        name: String,
    },
}
