//! Top-level command handler: validate, format, mount, register.

use crate::cli::Cli;
use crate::config::ProvisionConfig;
use crate::fstab;
use crate::mount::mount_volume;
use crate::preflight;
use crate::provision::create_filesystem;
use anyhow::{Context, Result};
use ebsctl_error::EbsError;
use ebsctl_hal::SystemHal;
use std::io::Write;

/// Validate `cli` and provision the volume.
///
/// A volume id or filesystem type that fails validation is reported on `out`
/// and the run ends successfully without touching the host.
pub fn run<H: SystemHal + ?Sized>(hal: &H, cli: &Cli, out: &mut dyn Write) -> Result<()> {
    let config = match ProvisionConfig::try_from(cli) {
        Ok(config) => config,
        Err(EbsError::ValidationFailed(msg)) => {
            writeln!(out, "{msg}")?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    provision(hal, &config, out)
}

/// Format, mount and register. Stops at the first failure; earlier steps are
/// not rolled back.
pub fn provision<H: SystemHal + ?Sized>(
    hal: &H,
    config: &ProvisionConfig,
    out: &mut dyn Write,
) -> Result<()> {
    if !config.dry_run {
        preflight::run();
    }

    create_filesystem(
        hal,
        &config.volume_id,
        config.fs_type,
        &config.label,
        config.dry_run,
        out,
    )
    .with_context(|| format!("failed to create filesystem on {}", config.volume_id))?;

    mount_volume(
        hal,
        &config.mountpoint,
        &config.volume_id,
        config.dry_run,
        out,
    )
    .with_context(|| {
        format!(
            "failed to mount {} at {}",
            config.volume_id,
            config.mountpoint.display()
        )
    })?;

    fstab::write_entry(
        &config.fstab_path,
        &config.fstab_entry(),
        config.dry_run,
        out,
    )
    .with_context(|| format!("failed to update {}", config.fstab_path.display()))?;

    Ok(())
}
