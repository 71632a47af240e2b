//! Typed volume identifiers and filesystem kinds.

use ebsctl_error::{EbsError, EbsResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

pub const VOLUME_ID_PATTERN: &str = "vol-[a-z0-9]+";

/// Unanchored: an id is accepted when it contains a match. Anything odd
/// around the match is left for device resolution to reject.
static VOLUME_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(VOLUME_ID_PATTERN).expect("volume id pattern is valid"));

/// An EBS volume id such as `vol-0abc123`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeId(String);

impl VolumeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Serial number the volume reports over NVMe: the id with its first
    /// hyphen removed (`vol-0abc123` -> `vol0abc123`).
    pub fn serial(&self) -> String {
        self.0.replacen('-', "", 1)
    }
}

impl FromStr for VolumeId {
    type Err = EbsError;

    fn from_str(s: &str) -> EbsResult<Self> {
        if !VOLUME_ID_RE.is_match(s) {
            return Err(EbsError::ValidationFailed(format!(
                "{s} doesn't match pattern {VOLUME_ID_PATTERN}"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Filesystems ebsctl is willing to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsType {
    Ext4,
    Xfs,
}

impl FsType {
    /// Value passed to `mkfs -t` and reported by `blkid` as `TYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FsType::Ext4 => "ext4",
            FsType::Xfs => "xfs",
        }
    }
}

impl FromStr for FsType {
    type Err = EbsError;

    fn from_str(s: &str) -> EbsResult<Self> {
        match s {
            "ext4" => Ok(FsType::Ext4),
            "xfs" => Ok(FsType::Xfs),
            other => Err(EbsError::ValidationFailed(format!(
                "{other} doesn't match patterns ['ext4', 'xfs']"
            ))),
        }
    }
}

impl fmt::Display for FsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
