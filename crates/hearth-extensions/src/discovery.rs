//! Discovery of extension manifests inside an install directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::descriptor::ExtensionDescriptor;
use crate::error::ExtensionError;
use crate::registry::ExtensionRegistry;

/// Directory, relative to the install directory, holding manifests.
pub const EXTENSIONS_DIR: &str = ".hearth/extensions";

/// Returns the manifest directory for the install at `dir`.
#[must_use]
pub fn extensions_dir(dir: &Path) -> PathBuf {
    dir.join(EXTENSIONS_DIR)
}

/// Loads every `*.json` manifest of the install at `dir`.
///
/// Manifests are registered in file-name order. A missing manifest
/// directory yields an empty registry.
///
/// # Errors
///
/// Returns [`ExtensionError`] when the directory cannot be listed, or a
/// manifest cannot be read, parsed, or registered.
pub fn discover(dir: &Path) -> Result<ExtensionRegistry, ExtensionError> {
    let manifest_dir = extensions_dir(dir);
    let mut registry = ExtensionRegistry::new();
    let Some(paths) = manifest_paths(&manifest_dir)? else {
        tracing::debug!(
            target: "hearth::extensions",
            dir = %manifest_dir.display(),
            "no extensions directory"
        );
        return Ok(registry);
    };
    for path in paths {
        let descriptor = load_manifest(&path)?;
        tracing::debug!(
            target: "hearth::extensions",
            extension = descriptor.name(),
            version = descriptor.version(),
            path = %path.display(),
            "loaded extension manifest"
        );
        registry.register(descriptor)?;
    }
    Ok(registry)
}

fn manifest_paths(manifest_dir: &Path) -> Result<Option<Vec<PathBuf>>, ExtensionError> {
    let read_error = |source: io::Error| ExtensionError::ReadDirectory {
        path: manifest_dir.to_path_buf(),
        source: Arc::new(source),
    };
    let entries = match fs::read_dir(manifest_dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(read_error(source)),
    };
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(read_error)?.path();
        let is_manifest = path.is_file()
            && path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_manifest {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(Some(paths))
}

fn load_manifest(path: &Path) -> Result<ExtensionDescriptor, ExtensionError> {
    let content = fs::read_to_string(path).map_err(|source| ExtensionError::ReadManifest {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })?;
    serde_json::from_str(&content).map_err(|source| ExtensionError::ParseManifest {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}
