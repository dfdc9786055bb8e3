//! Built-in checks.

mod files;
mod memory;
mod permissions;

pub use files::InstanceFilesCheck;
pub use memory::{FreeMemoryCheck, MIN_FREE_MEMORY_BYTES, MemoryGauge, SystemMemory};
pub use permissions::FolderPermissionsCheck;
