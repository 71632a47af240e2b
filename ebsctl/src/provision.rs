//! Conditional filesystem creation.

use crate::probe::volume_info;
use crate::resolve::resolve_device_path;
use crate::volume::{FsType, VolumeId};
use ebsctl_error::EbsResult;
use ebsctl_hal::command::mkfs_spec;
use ebsctl_hal::{FormatOps, FormatOptions, ProbeOps};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    /// Label and type already matched; nothing to do.
    AlreadyFormatted,
    /// Dry run: the mkfs command was reported, not executed.
    Planned,
    Formatted,
}

/// Format the volume unless it already carries `label` and `fs_type`.
///
/// In dry-run mode the mkfs command line is written to `out` instead.
pub fn create_filesystem<H: ProbeOps + FormatOps + ?Sized>(
    hal: &H,
    volume_id: &VolumeId,
    fs_type: FsType,
    label: &str,
    dry_run: bool,
    out: &mut dyn Write,
) -> EbsResult<FormatOutcome> {
    let device = resolve_device_path(hal, volume_id)?;
    let info = volume_info(hal, volume_id)?;

    if let (Some(existing_label), Some(existing_type)) = (info.label(), info.fs_type()) {
        if !existing_label.is_empty()
            && !existing_type.is_empty()
            && existing_type == fs_type.as_str()
            && existing_label == label
        {
            log::info!(
                "{} already has {} filesystem labelled {}, skipping mkfs",
                device.display(),
                existing_type,
                existing_label
            );
            return Ok(FormatOutcome::AlreadyFormatted);
        }
    }

    let opts = FormatOptions::new(fs_type.as_str(), label);
    if dry_run {
        writeln!(out, "running command '{}'", mkfs_spec(&device, &opts))?;
        return Ok(FormatOutcome::Planned);
    }

    hal.format(&device, &opts)?;
    Ok(FormatOutcome::Formatted)
}
