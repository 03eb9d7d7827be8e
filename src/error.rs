//! Error types for the pdfdoc library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdfdoc library
///
/// Only the variants here abort an operation. Missing keys, missing
/// outlines and wrongly-typed Info values degrade to empty results
/// instead of erroring, so metadata extraction never fails a host on a
/// malformed-but-openable file.
#[derive(Error, Debug)]
pub enum Error {
    /// Byte source cannot be opened or read
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// The engine rejected the stream as not an openable PDF
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),

    /// The document opened but its trailer has no usable Root entry
    #[error("document has no trailer Root and cannot be read")]
    MissingRoot,

    /// Wrong or missing password; the document stays locked and the call
    /// may be retried
    #[error("wrong password")]
    WrongPassword,

    /// unlock() called on a document that is not locked
    #[error("document is not locked")]
    NotLocked,

    /// File not found
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}
