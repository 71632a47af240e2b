//! Linux HAL implementation using real processes.

use super::{FormatOps, FormatOptions, MountOps, ProbeOps, ProcessOps};
use crate::command::{blkid_export_spec, mkfs_spec, mount_spec, nvme_list_spec, CommandSpec};
use crate::{HalError, HalResult};
use std::path::Path;
use std::process::{Command, Output};

/// Real HAL implementation for Linux systems.
#[derive(Debug, Clone, Default)]
pub struct LinuxHal;

impl LinuxHal {
    pub fn new() -> Self {
        Self
    }

    fn run_spec(&self, spec: &CommandSpec) -> HalResult<Output> {
        self.command_output(&spec.program, &spec.args())
    }
}

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

impl ProcessOps for LinuxHal {
    fn command_output(&self, program: &str, args: &[&str]) -> HalResult<Output> {
        log::debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| map_command_err(program, e))?;

        if !output.status.success() {
            return Err(output_failed(program, &output));
        }
        Ok(output)
    }
}

impl ProbeOps for LinuxHal {
    fn nvme_list_json(&self) -> HalResult<String> {
        let output = self.run_spec(&nvme_list_spec())?;
        Ok(String::from_utf8(output.stdout)?)
    }

    fn blkid_export(&self, device: &Path) -> HalResult<String> {
        let output = self.run_spec(&blkid_export_spec(device))?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl FormatOps for LinuxHal {
    fn format(&self, device: &Path, opts: &FormatOptions) -> HalResult<()> {
        log::info!(
            "Formatting {} as {} (label {})",
            device.display(),
            opts.fs_type,
            opts.label
        );
        let spec = mkfs_spec(device, opts);
        self.command_status(&spec.program, &spec.args())
    }
}

impl MountOps for LinuxHal {
    fn mount_device(&self, device: &Path, target: &Path) -> HalResult<()> {
        log::info!("Mounting {} -> {}", device.display(), target.display());
        let spec = mount_spec(device, target);
        self.command_status(&spec.program, &spec.args())
    }
}
