//! Filesystem formatting operations trait.

use crate::HalResult;
use std::path::Path;

/// Trait for formatting block devices.
pub trait FormatOps {
    /// Create a filesystem on `device` with `mkfs -t <fs_type> -L <label>`.
    fn format(&self, device: &Path, opts: &FormatOptions) -> HalResult<()>;
}

/// Options for formatting operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Filesystem type handed to `mkfs -t` (e.g. `ext4`, `xfs`)
    pub fs_type: String,
    /// Filesystem label handed to `mkfs -L`
    pub label: String,
}

impl FormatOptions {
    pub fn new(fs_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fs_type: fs_type.into(),
            label: label.into(),
        }
    }
}
