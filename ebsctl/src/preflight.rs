//! Best-effort host checks before a real run.
//!
//! Nothing here fails the run: a missing tool or a non-root user surfaces
//! later as a concrete command or permission error. The warnings just make
//! the cause obvious up front.

use log::warn;
use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const REQUIRED_BINARIES: &[&str] = &["nvme", "blkid", "mkfs", "mount"];

/// Run all checks and return the warnings that were logged.
pub fn run() -> Vec<String> {
    let mut warnings = Vec::new();

    if !nix::unistd::geteuid().is_root() {
        warnings.push(
            "not running as root; mkfs, mount and the fstab write will likely fail".to_string(),
        );
    }

    let path = env::var_os("PATH").unwrap_or_default();
    let dirs = env::split_paths(&path).collect::<Vec<_>>();
    for bin in missing_binaries(REQUIRED_BINARIES, &dirs) {
        warnings.push(format!("required binary '{bin}' not found in PATH"));
    }

    for warning in &warnings {
        warn!("preflight: {warning}");
    }
    warnings
}

pub fn missing_binaries<'a>(bins: &[&'a str], dirs: &[PathBuf]) -> Vec<&'a str> {
    bins.iter()
        .copied()
        .filter(|bin| find_in_paths(bin, dirs).is_none())
        .collect()
}

/// First executable regular file named `binary` in `dirs`.
pub fn find_in_paths(binary: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(md) => md.is_file() && md.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}
