//! Key-value configuration attached to an instance.
//!
//! Keys are dotted paths into a JSON object: `admin.url` reads the `url`
//! member of the top-level `admin` object.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Read access to instance configuration values.
///
/// Values are returned by value so implementations are free to compute or
/// record each lookup.
pub trait ConfigSource {
    /// Returns the value stored under the dotted `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns the value under `key` when it is a string.
    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

/// JSON-backed instance configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceConfig {
    values: Map<String, Value>,
}

impl InstanceConfig {
    /// Wraps an already-parsed JSON object.
    #[must_use]
    pub const fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields `Ok(None)` so callers can distinguish "not yet
    /// configured" from a broken file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is not JSON, or
    /// does not hold a JSON object.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: Arc::new(source),
                });
            }
        };
        let value: Value = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source: Arc::new(source),
        })?;
        match value {
            Value::Object(values) => Ok(Some(Self { values })),
            _ => Err(ConfigError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Borrowing lookup used by [`ConfigSource::get`].
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        segments.try_fold(self.values.get(first)?, |value, segment| {
            value.as_object()?.get(segment)
        })
    }
}

impl ConfigSource for InstanceConfig {
    fn get(&self, key: &str) -> Option<Value> {
        self.lookup(key).cloned()
    }
}
