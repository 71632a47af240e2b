//! ebsctl: provision an attached EBS volume.
//!
//! Resolves the volume's NVMe device, formats it unless it already carries the
//! requested filesystem, mounts it and records it in fstab.

pub mod cli;
pub mod config;
pub mod fstab;
pub mod logging;
pub mod mount;
pub mod preflight;
pub mod probe;
pub mod provision;
pub mod resolve;
pub mod run;
pub mod volume;
