//! Error types for the clipboard layer.

use thiserror::Error;

/// Result type for clipboard operations.
pub type ClipboardResult<T> = Result<T, ClipboardError>;

/// Errors that can occur while encoding, decoding or configuring a clipboard.
///
/// Decoding errors never escape [`crate::Clipboard::load_from`]; they are
/// logged and replaced by an empty clipboard there.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible version.
    #[error("unsupported snapshot version: expected {expected}, found {found}")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Session store I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}
