//! Exit code constants for the relcut CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, missing template)
//! - 2: External command failure (git or build command exited non-zero)
//! - 3: History error (not enough commits to diff)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or missing files.
pub const USER_ERROR: i32 = 1;

/// External command failure: git or the build command exited non-zero.
pub const COMMAND_FAILURE: i32 = 2;

/// History error: fewer than two commits available to diff.
pub const HISTORY_ERROR: i32 = 3;
