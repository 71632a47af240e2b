//! Existing filesystem metadata via `blkid --output export`.

use crate::resolve::resolve_device_path;
use crate::volume::VolumeId;
use ebsctl_error::EbsResult;
use ebsctl_hal::ProbeOps;
use std::collections::HashMap;

/// `KEY=value` pairs reported by blkid for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeInfo(HashMap<String, String>);

impl VolumeInfo {
    /// Parse export-style output. Lines without `=` are skipped; a repeated
    /// key keeps its last value.
    pub fn parse_export(output: &str) -> Self {
        let mut map = HashMap::new();
        for line in output.lines() {
            if let Some((key, value)) = line.split_once('=') {
                map.insert(key.to_string(), value.to_string());
            }
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn label(&self) -> Option<&str> {
        self.get("LABEL")
    }

    pub fn fs_type(&self) -> Option<&str> {
        self.get("TYPE")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Probe the device backing `volume_id`.
///
/// Resolution errors propagate. A failing `blkid` (not installed, or exit 2
/// on a device with no signature) yields an empty [`VolumeInfo`] instead of
/// an error.
pub fn volume_info<H: ProbeOps + ?Sized>(hal: &H, volume_id: &VolumeId) -> EbsResult<VolumeInfo> {
    let device = resolve_device_path(hal, volume_id)?;

    match hal.blkid_export(&device) {
        Ok(output) => Ok(VolumeInfo::parse_export(&output)),
        Err(err) => {
            log::warn!(
                "blkid probe of {} failed, treating it as unformatted: {}",
                device.display(),
                err
            );
            Ok(VolumeInfo::default())
        }
    }
}
