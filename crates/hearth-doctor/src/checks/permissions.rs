use crate::check::{Check, CheckContext};
use crate::request::{INSTALL_CATEGORY, START_CATEGORY};

/// Verifies the install directory accepts new files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderPermissionsCheck;

impl Check for FolderPermissionsCheck {
    fn id(&self) -> &str {
        "folder-permissions"
    }

    fn categories(&self) -> &[&str] {
        &[START_CATEGORY, INSTALL_CATEGORY]
    }

    fn run(&self, context: &CheckContext<'_>) -> Result<(), String> {
        tempfile::Builder::new()
            .prefix(".hearth-doctor")
            .tempfile_in(context.dir)
            .map(drop)
            .map_err(|error| {
                format!(
                    "install directory {} is not writable: {error}",
                    context.dir.display()
                )
            })
    }
}
