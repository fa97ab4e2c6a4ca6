//! Command implementations for relcut.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod autotag;
mod cut;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Cut(args) => cut::cmd_cut(args),
        Command::Autotag(args) => autotag::cmd_autotag(args),
    }
}
