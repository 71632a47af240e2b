//! Fake HAL implementation for testing.
//!
//! This implementation records all operations without executing them,
//! allowing for CI-safe testing without root privileges or NVMe hardware.
//! Probe output is scripted per device.

use super::{FormatOps, FormatOptions, MountOps, ProbeOps};
use crate::{HalError, HalResult};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    NvmeList,
    BlkidProbe {
        device: PathBuf,
    },
    Format {
        device: PathBuf,
        fs_type: String,
        label: String,
    },
    Mount {
        device: PathBuf,
        target: PathBuf,
    },
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Raw `nvme list` JSON; `None` means an empty device list
    nvme_output: Option<String>,
    /// `blkid` export output keyed by device
    blkid_output: HashMap<PathBuf, String>,
    /// Programs that exit non-zero
    failing: HashSet<String>,
    /// Programs that are not installed
    missing: HashSet<String>,
    /// Currently mounted paths
    mounted_paths: HashSet<PathBuf>,
}

/// Fake HAL implementation that records operations without executing them.
///
/// Devices without scripted `blkid` output behave like blank disks: `blkid`
/// exits with status 2.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// Script `nvme list` to report the given `(serial, device path)` pairs.
    pub fn with_nvme_devices(self, devices: &[(&str, &str)]) -> Self {
        let devices: Vec<serde_json::Value> = devices
            .iter()
            .map(|(serial, path)| {
                serde_json::json!({
                    "DevicePath": path,
                    "Firmware": "1.0",
                    "ModelNumber": "Amazon Elastic Block Store",
                    "SerialNumber": serial,
                })
            })
            .collect();
        let json = serde_json::json!({ "Devices": devices }).to_string();
        self.with_nvme_output(json)
    }

    /// Script the raw stdout of `nvme list`.
    pub fn with_nvme_output(self, raw: impl Into<String>) -> Self {
        self.state.lock().unwrap().nvme_output = Some(raw.into());
        self
    }

    /// Script the `blkid --output export` lines for a device.
    pub fn with_blkid_output(self, device: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .blkid_output
            .insert(device.into(), raw.into());
        self
    }

    /// Make `program` exit non-zero.
    pub fn failing(self, program: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(program.to_string());
        self
    }

    /// Make `program` look uninstalled.
    pub fn missing(self, program: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .missing
            .insert(program.to_string());
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// True if anything other than a read-only probe was recorded.
    pub fn has_mutations(&self) -> bool {
        self.has_operation(|op| matches!(op, Operation::Format { .. } | Operation::Mount { .. }))
    }

    pub fn is_mounted(&self, path: &Path) -> bool {
        self.state.lock().unwrap().mounted_paths.contains(path)
    }

    /// Clear all recorded operations.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.operations.clear();
        state.mounted_paths.clear();
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn check_program(&self, program: &str) -> HalResult<()> {
        let state = self.state.lock().unwrap();
        if state.missing.contains(program) {
            return Err(HalError::CommandNotFound(program.to_string()));
        }
        if state.failing.contains(program) {
            return Err(HalError::CommandFailed {
                program: program.to_string(),
                code: Some(1),
                stderr: format!("FAKE HAL: {program} failed"),
            });
        }
        Ok(())
    }
}

impl ProbeOps for FakeHal {
    fn nvme_list_json(&self) -> HalResult<String> {
        self.record_operation(Operation::NvmeList);
        self.check_program("nvme")?;
        let output = self.state.lock().unwrap().nvme_output.clone();
        Ok(output.unwrap_or_else(|| r#"{"Devices":[]}"#.to_string()))
    }

    fn blkid_export(&self, device: &Path) -> HalResult<String> {
        self.record_operation(Operation::BlkidProbe {
            device: device.to_path_buf(),
        });
        self.check_program("blkid")?;
        let output = self.state.lock().unwrap().blkid_output.get(device).cloned();
        output.ok_or_else(|| HalError::CommandFailed {
            program: "blkid".to_string(),
            code: Some(2),
            stderr: String::new(),
        })
    }
}

impl FormatOps for FakeHal {
    fn format(&self, device: &Path, opts: &FormatOptions) -> HalResult<()> {
        log::info!(
            "FAKE HAL: mkfs -t {} -L {} {}",
            opts.fs_type,
            opts.label,
            device.display()
        );
        self.check_program("mkfs")?;
        self.record_operation(Operation::Format {
            device: device.to_path_buf(),
            fs_type: opts.fs_type.clone(),
            label: opts.label.clone(),
        });

        // A freshly formatted device probes as the new filesystem.
        let probed = format!(
            "DEVNAME={}\nLABEL={}\nTYPE={}\n",
            device.display(),
            opts.label,
            opts.fs_type
        );
        self.state
            .lock()
            .unwrap()
            .blkid_output
            .insert(device.to_path_buf(), probed);
        Ok(())
    }
}

impl MountOps for FakeHal {
    fn mount_device(&self, device: &Path, target: &Path) -> HalResult<()> {
        log::info!("FAKE HAL: mount {} -> {}", device.display(), target.display());
        self.check_program("mount")?;
        self.record_operation(Operation::Mount {
            device: device.to_path_buf(),
            target: target.to_path_buf(),
        });
        self.state
            .lock()
            .unwrap()
            .mounted_paths
            .insert(target.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_hal_records_mount() {
        let hal = FakeHal::new();
        let device = Path::new("/dev/nvme1n1");
        let target = Path::new("/mnt/test");

        hal.mount_device(device, target).unwrap();

        assert_eq!(hal.operation_count(), 1);
        assert!(hal.has_operation(|op| matches!(op, Operation::Mount { .. })));
        assert!(hal.is_mounted(target));
    }

    #[test]
    fn fake_hal_records_format_and_updates_probe() {
        let hal = FakeHal::new();
        let device = Path::new("/dev/nvme1n1");

        hal.format(device, &FormatOptions::new("xfs", "logs")).unwrap();

        assert_eq!(
            hal.operations(),
            vec![Operation::Format {
                device: device.to_path_buf(),
                fs_type: "xfs".to_string(),
                label: "logs".to_string(),
            }]
        );
        let probed = hal.blkid_export(device).unwrap();
        assert!(probed.contains("LABEL=logs"));
        assert!(probed.contains("TYPE=xfs"));
    }

    #[test]
    fn fake_hal_serves_scripted_nvme_devices() {
        let hal = FakeHal::new().with_nvme_devices(&[("vol0abc", "/dev/nvme1n1")]);
        let json = hal.nvme_list_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["Devices"][0]["SerialNumber"], "vol0abc");
        assert_eq!(value["Devices"][0]["DevicePath"], "/dev/nvme1n1");
    }

    #[test]
    fn fake_hal_blank_device_fails_blkid() {
        let hal = FakeHal::new();
        let err = hal.blkid_export(Path::new("/dev/nvme2n1")).unwrap_err();
        assert!(matches!(err, HalError::CommandFailed { code: Some(2), .. }));
    }

    #[test]
    fn fake_hal_missing_program() {
        let hal = FakeHal::new().missing("nvme");
        let err = hal.nvme_list_json().unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(ref p) if p == "nvme"));
    }

    #[test]
    fn fake_hal_failing_mount_is_not_recorded() {
        let hal = FakeHal::new().failing("mount");
        let target = Path::new("/mnt/test");
        assert!(hal.mount_device(Path::new("/dev/nvme1n1"), target).is_err());
        assert!(!hal.has_mutations());
        assert!(!hal.is_mounted(target));
    }

    #[test]
    fn fake_hal_can_clear() {
        let hal = FakeHal::new();
        hal.mount_device(Path::new("/dev/nvme1n1"), Path::new("/mnt/test"))
            .unwrap();
        assert_eq!(hal.operation_count(), 1);

        hal.clear();
        assert_eq!(hal.operation_count(), 0);
        assert!(!hal.is_mounted(Path::new("/mnt/test")));
    }
}
