//! Device probing operations (nvme list / blkid).

use crate::HalResult;
use std::path::Path;

/// Probing operations trait.
pub trait ProbeOps {
    /// Raw JSON printed by `nvme list --output-format=json`.
    fn nvme_list_json(&self) -> HalResult<String>;

    /// Raw `KEY=value` lines printed by `blkid --probe --output export <device>`.
    fn blkid_export(&self, device: &Path) -> HalResult<String>;
}
