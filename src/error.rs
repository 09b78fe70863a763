use std::io;

/// Errors that can occur while running a command through this crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Validation failed; carries every failure message, joined with newlines.
    #[error("{0}")]
    Validation(String),

    /// A key was requested that the validation pass did not produce.
    #[error("key `{0}` was not found in the validated data")]
    NotFound(String),

    /// Failure propagated unchanged from a command's `process` step.
    #[error(transparent)]
    Process(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for runlog operations
pub type Result<T> = std::result::Result<T, Error>;
