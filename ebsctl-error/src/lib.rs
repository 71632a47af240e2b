use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type EbsResult<T> = Result<T, EbsError>;

/// Failures of "world-touching" operations (external commands).
#[derive(Error, Debug)]
pub enum HalError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("UTF-8 decode error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum EbsError {
    #[error(transparent)]
    Hal(#[from] HalError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("device with volumeID {0} is not present")]
    DeviceNotFound(String),

    #[error("Failed to decode nvme device list: {0}")]
    DeviceList(#[source] serde_json::Error),

    #[error("Failed to create mount point {}: {source}", path.display())]
    CreateMountPoint {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open {}: {source}", path.display())]
    FstabOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to stat {}: {source}", path.display())]
    FstabStat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FstabRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    FstabWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EbsError {
    /// True for failures reported by an external utility rather than local I/O.
    pub fn is_external_tool(&self) -> bool {
        matches!(self, EbsError::Hal(_) | EbsError::DeviceList(_))
    }
}
