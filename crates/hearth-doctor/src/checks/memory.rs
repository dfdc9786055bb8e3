use sysinfo::System;

use crate::check::{Check, CheckContext};
use crate::request::{DiagnosticRequest, INSTALL_CATEGORY, START_CATEGORY};

/// Memory the server needs to boot comfortably.
pub const MIN_FREE_MEMORY_BYTES: u64 = 150 << MB_SHIFT;

const MB_SHIFT: u32 = 20;

/// Source of the available-memory figure.
pub trait MemoryGauge {
    /// Bytes of memory currently available to new processes.
    fn available_bytes(&self) -> u64;
}

/// Reads available memory from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMemory;

impl MemoryGauge for SystemMemory {
    fn available_bytes(&self) -> u64 {
        let mut system = System::new();
        system.refresh_memory();
        system.available_memory()
    }
}

/// Fails when less than [`MIN_FREE_MEMORY_BYTES`] are available.
///
/// Skipped when the request carries `check_mem == Some(false)`.
pub struct FreeMemoryCheck {
    gauge: Box<dyn MemoryGauge>,
    minimum_bytes: u64,
}

impl FreeMemoryCheck {
    /// Creates the check with a custom gauge.
    #[must_use]
    pub fn new(gauge: Box<dyn MemoryGauge>) -> Self {
        Self {
            gauge,
            minimum_bytes: MIN_FREE_MEMORY_BYTES,
        }
    }
}

impl Default for FreeMemoryCheck {
    fn default() -> Self {
        Self::new(Box::new(SystemMemory))
    }
}

impl Check for FreeMemoryCheck {
    fn id(&self) -> &str {
        "free-memory"
    }

    fn categories(&self) -> &[&str] {
        &[START_CATEGORY, INSTALL_CATEGORY]
    }

    fn skip_reason(&self, request: &DiagnosticRequest) -> Option<String> {
        (request.check_mem() == Some(false))
            .then(|| String::from("memory check disabled with --no-check-mem"))
    }

    fn run(&self, _context: &CheckContext<'_>) -> Result<(), String> {
        let available = self.gauge.available_bytes();
        if available >= self.minimum_bytes {
            return Ok(());
        }
        Err(format!(
            "only {} MB of memory available; at least {} MB is required",
            available >> MB_SHIFT,
            self.minimum_bytes >> MB_SHIFT
        ))
    }
}
