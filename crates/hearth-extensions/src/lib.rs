//! Extension manifests for the `hearth` command-line tool.
//!
//! Extensions are declared by JSON manifests in an install directory's
//! `.hearth/extensions/` folder. Each manifest parses into an
//! [`ExtensionDescriptor`], which may contribute extra options to individual
//! commands. [`discover`] loads the manifests into an ordered
//! [`ExtensionRegistry`].

mod descriptor;
mod discovery;
mod error;
mod registry;

pub use descriptor::{ExtensionConfig, ExtensionDescriptor};
pub use discovery::{EXTENSIONS_DIR, discover, extensions_dir};
pub use error::ExtensionError;
pub use registry::ExtensionRegistry;
