//! Volume id -> NVMe device path resolution.
//!
//! EBS volumes attached to Nitro instances show up as NVMe controllers whose
//! serial number is the volume id without its hyphen.

use crate::volume::VolumeId;
use ebsctl_error::{EbsError, EbsResult};
use ebsctl_hal::ProbeOps;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct NvmeList {
    #[serde(rename = "Devices")]
    pub devices: Vec<NvmeDevice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NvmeDevice {
    #[serde(rename = "SerialNumber")]
    pub serial_number: String,
    #[serde(rename = "DevicePath")]
    pub device_path: PathBuf,
}

pub fn parse_device_list(json: &str) -> EbsResult<Vec<NvmeDevice>> {
    let list: NvmeList = serde_json::from_str(json).map_err(EbsError::DeviceList)?;
    Ok(list.devices)
}

/// Find the device node backing `volume_id`. Queries `nvme list` on every call.
pub fn resolve_device_path<H: ProbeOps + ?Sized>(
    hal: &H,
    volume_id: &VolumeId,
) -> EbsResult<PathBuf> {
    let serial = volume_id.serial();
    let devices = parse_device_list(&hal.nvme_list_json()?)?;

    let device = devices
        .into_iter()
        .find(|d| d.serial_number == serial)
        .ok_or_else(|| EbsError::DeviceNotFound(volume_id.to_string()))?;

    log::debug!("{} resolved to {}", volume_id, device.device_path.display());
    Ok(device.device_path)
}
