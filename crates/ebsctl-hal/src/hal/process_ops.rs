//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so we can
//! test workflows without spawning real processes.

use crate::HalResult;
use std::process::Output;

/// Process execution trait (external command runner).
///
/// Commands run to completion; there is no timeout.
pub trait ProcessOps {
    /// Run `program` and capture its output. A non-zero exit is an error.
    fn command_output(&self, program: &str, args: &[&str]) -> HalResult<Output>;

    /// Run `program` for its side effect only.
    fn command_status(&self, program: &str, args: &[&str]) -> HalResult<()> {
        self.command_output(program, args).map(|_| ())
    }
}
