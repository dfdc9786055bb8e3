use hearth_instance::InstanceMarker;

use crate::check::{Check, CheckContext};
use crate::request::START_CATEGORY;

/// Verifies the marker and the active environment's config file exist.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceFilesCheck;

impl Check for InstanceFilesCheck {
    fn id(&self) -> &str {
        "instance-files"
    }

    fn categories(&self) -> &[&str] {
        &[START_CATEGORY]
    }

    fn run(&self, context: &CheckContext<'_>) -> Result<(), String> {
        let marker = InstanceMarker::read(context.dir).map_err(|error| error.to_string())?;
        let config = context.dir.join(marker.environment.config_file_name());
        if config.is_file() {
            Ok(())
        } else {
            Err(format!(
                "config file {} for the {} environment is missing",
                config.display(),
                marker.environment
            ))
        }
    }
}
