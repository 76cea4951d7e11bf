//! Configuration and prompt errors
//!
//! Typed errors for argument validation and the confirmation prompt.
//! Errors from `az` itself live in [`crate::az::error`].

use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// subscription argument is empty
    #[error("subscription cannot be empty")]
    EmptySubscription,

    /// pattern argument is empty (would match every group)
    #[error("resource group name pattern cannot be empty")]
    EmptyPattern,

    /// az program path is empty
    #[error("az program path cannot be empty")]
    EmptyAzProgram,

    /// max_concurrent is zero
    #[error("max_concurrent must be at least 1, got {0}")]
    InvalidMaxConcurrent(usize),

    /// command_timeout is zero
    #[error("command_timeout must be greater than 0")]
    InvalidCommandTimeout,
}

/// Confirmation prompt errors
#[derive(Debug, Error)]
pub enum ConfirmError {
    /// stdin closed before an answer was given
    #[error("no confirmation response (end of input)")]
    EndOfInput,

    /// reading the answer failed
    #[error("failed to read confirmation response: {0}")]
    Read(#[source] std::io::Error),

    /// writing the prompt failed
    #[error("failed to write confirmation prompt: {0}")]
    Write(#[source] std::io::Error),
}
