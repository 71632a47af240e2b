//! ebsctl Hardware Abstraction Layer (HAL).
//!
//! Everything that touches the host (spawning nvme, blkid, mkfs, mount) goes
//! through the traits defined here so the provisioning workflow can be tested
//! against [`FakeHal`] without root privileges or real NVMe devices.

pub mod command;
pub mod hal;

pub use command::CommandSpec;
pub use ebsctl_error::{HalError, HalResult};
pub use hal::*;
