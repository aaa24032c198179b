//! Custom error types for the cloudfront-codec crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum CloudfrontError {
    /// An error originating from I/O operations on a plain-text input.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The input was recognized as gzip but could not be decompressed.
    #[error("Cannot uncompress gzip input '{input}': {source}")]
    Decompression {
        input: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured charset is unknown or cannot be split into lines byte-wise.
    #[error("Unsupported charset '{0}'")]
    UnsupportedCharset(String),
}

/// A convenience `Result` type alias using the crate's `CloudfrontError` type.
pub type Result<T> = std::result::Result<T, CloudfrontError>;
