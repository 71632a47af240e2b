//! CLI argument parsing for ebsctl.
//!
//! Values are taken as plain strings; pattern checks happen in
//! [`crate::config::ProvisionConfig`] so a bad value prints a message instead
//! of a clap usage error.

use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_FSTAB: &str = "/etc/fstab";

#[derive(Parser, Debug, Clone)]
#[command(name = "ebsctl")]
#[command(version)]
#[command(about = "Format, mount and persist an attached EBS volume")]
pub struct Cli {
    /// Mountpoint for the volume
    #[arg(long)]
    pub mountpoint: PathBuf,

    /// Filesystem label
    #[arg(long)]
    pub label: String,

    /// Filesystem type to create (ext4 or xfs)
    #[arg(long)]
    pub mkfs: String,

    /// Volume id (vol-...)
    #[arg(long)]
    pub volume_id: String,

    /// Do not run program, but show the list of actions the tool will perform
    #[arg(long)]
    pub dry_run: bool,

    /// Mount table to update
    #[arg(long, default_value = DEFAULT_FSTAB)]
    pub fstab: PathBuf,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
