//! HAL trait definitions and implementations.
//!
//! This module defines the core traits for system operations and provides
//! both real (LinuxHal) and fake (FakeHal) implementations.

pub mod fake_hal;
pub mod format_ops;
pub mod linux_hal;
pub mod mount_ops;
pub mod probe_ops;
pub mod process_ops;

pub use fake_hal::{FakeHal, Operation};
pub use format_ops::{FormatOps, FormatOptions};
pub use linux_hal::LinuxHal;
pub use mount_ops::MountOps;
pub use probe_ops::ProbeOps;
pub use process_ops::ProcessOps;

/// Complete HAL combining all system operation traits.
pub trait SystemHal: ProbeOps + FormatOps + MountOps {}

/// Automatically implement SystemHal for any type implementing all required traits.
impl<T> SystemHal for T where T: ProbeOps + FormatOps + MountOps {}
