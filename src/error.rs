//! Error types for the relcut CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for relcut operations.
///
/// Each variant maps to a specific exit code. Release operations mutate
/// shared history, so no failure is retried: every error is fatal to the
/// current invocation and propagates up to `main`.
#[derive(Error, Debug)]
pub enum RelcutError {
    /// User provided invalid arguments or the repository is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// An external command exited non-zero. Carries the original command text.
    #[error("command failed: {command}")]
    CommandFailure {
        /// The command text as it was invoked.
        command: String,
    },

    /// Not enough commits exist to diff the manifest against.
    #[error("not enough history: {0}")]
    HistoryError(String),
}

impl RelcutError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            RelcutError::UserError(_) => exit_codes::USER_ERROR,
            RelcutError::CommandFailure { .. } => exit_codes::COMMAND_FAILURE,
            RelcutError::HistoryError(_) => exit_codes::HISTORY_ERROR,
        }
    }
}

/// Result type alias for relcut operations.
pub type Result<T> = std::result::Result<T, RelcutError>;
