//! Mount point creation and mounting.

use crate::resolve::resolve_device_path;
use crate::volume::VolumeId;
use ebsctl_error::{EbsError, EbsResult};
use ebsctl_hal::command::mount_spec;
use ebsctl_hal::{MountOps, ProbeOps};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Mount the volume at `mountpoint`, creating the directory tree first.
///
/// In dry-run mode only the mount command line is written to `out`.
pub fn mount_volume<H: ProbeOps + MountOps + ?Sized>(
    hal: &H,
    mountpoint: &Path,
    volume_id: &VolumeId,
    dry_run: bool,
    out: &mut dyn Write,
) -> EbsResult<()> {
    let device = resolve_device_path(hal, volume_id)?;

    if dry_run {
        writeln!(out, "running command '{}'", mount_spec(&device, mountpoint))?;
        return Ok(());
    }

    fs::create_dir_all(mountpoint).map_err(|source| EbsError::CreateMountPoint {
        path: mountpoint.to_path_buf(),
        source,
    })?;
    hal.mount_device(&device, mountpoint)?;
    Ok(())
}
