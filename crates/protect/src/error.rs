use std::path::PathBuf;
use thiserror::Error;

/// Result type for file-protection operations
pub type Result<T> = std::result::Result<T, ProtectError>;

/// Errors that can occur while sealing a transmission file
#[derive(Error, Debug)]
pub enum ProtectError {
    /// The target file is already present; it is never overwritten
    #[error("Target file {} already exists!", .0.display())]
    TargetExists(PathBuf),

    /// A caller-supplied record field exceeds its fixed width
    #[error("Maximum characters allowed for '{field}' are {limit}, found {actual}!")]
    FieldTooLong {
        field: String,
        limit: usize,
        actual: usize,
    },

    /// The secret key is not valid even-length hex
    #[error("Invalid secret key: {0}")]
    InvalidKeyFormat(String),

    /// A hex digest handed to the seal primitive is malformed
    #[error("Invalid hex input: {0}")]
    InvalidHexInput(String),

    /// Cooperative cancellation was observed mid-operation
    #[error("Operation cancelled")]
    Cancelled,

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
