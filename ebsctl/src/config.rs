use crate::cli::Cli;
use crate::fstab::FstabEntry;
use crate::volume::{FsType, VolumeId};
use ebsctl_error::EbsError;
use std::path::PathBuf;

/// Validated settings for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub volume_id: VolumeId,
    pub fs_type: FsType,
    pub label: String,
    pub mountpoint: PathBuf,
    pub fstab_path: PathBuf,
    pub dry_run: bool,
}

impl ProvisionConfig {
    /// The line registered in fstab: `LABEL=<label> <mountpoint> <fs> defaults 0 0`.
    pub fn fstab_entry(&self) -> FstabEntry {
        FstabEntry::new(
            format!("LABEL={}", self.label),
            self.mountpoint.display().to_string(),
            self.fs_type.as_str(),
            "defaults",
            "0",
            "0",
        )
    }
}

impl TryFrom<&Cli> for ProvisionConfig {
    type Error = EbsError;

    /// The volume id is checked before the filesystem type.
    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let volume_id: VolumeId = cli.volume_id.parse()?;
        let fs_type: FsType = cli.mkfs.parse()?;
        Ok(Self {
            volume_id,
            fs_type,
            label: cli.label.clone(),
            mountpoint: cli.mountpoint.clone(),
            fstab_path: cli.fstab.clone(),
            dry_run: cli.dry_run,
        })
    }
}
