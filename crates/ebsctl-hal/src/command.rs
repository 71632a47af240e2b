//! Command lines for the external utilities, shared by the real HAL and by
//! dry-run reporting so both always agree on the exact argument shape.

use crate::FormatOptions;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn args(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

pub fn nvme_list_spec() -> CommandSpec {
    CommandSpec::new("nvme", &["list", "--output-format=json"])
}

pub fn blkid_export_spec(device: &Path) -> CommandSpec {
    let device = device.display().to_string();
    CommandSpec::new("blkid", &["--probe", "--output", "export", &device])
}

pub fn mkfs_spec(device: &Path, opts: &FormatOptions) -> CommandSpec {
    let device = device.display().to_string();
    CommandSpec::new("mkfs", &["-t", &opts.fs_type, "-L", &opts.label, &device])
}

pub fn mount_spec(device: &Path, target: &Path) -> CommandSpec {
    let device = device.display().to_string();
    let target = target.display().to_string();
    CommandSpec::new("mount", &[&device, &target])
}
