//! Command implementations for fieldcopy.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod copy;
mod fields;
mod render;

use crate::cli::Command;
use fieldcopy::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Fields(args) => fields::cmd_fields(args),
        Command::Render(args) => render::cmd_render(args),
        Command::Copy(args) => copy::cmd_copy(args),
    }
}
