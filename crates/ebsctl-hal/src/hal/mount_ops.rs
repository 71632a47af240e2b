//! Mount operations trait.

use crate::HalResult;
use std::path::Path;

/// Trait for mounting filesystems.
pub trait MountOps {
    /// Mount a device to a target path.
    ///
    /// # Arguments
    /// * `device` - Device path (e.g., `/dev/nvme1n1`)
    /// * `target` - Mount point path; must already exist
    fn mount_device(&self, device: &Path, target: &Path) -> HalResult<()>;
}
