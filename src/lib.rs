//! # cloudfront-codec
//!
//! A decoder for CloudFront web and streaming distribution access logs.
//! Inputs may be gzip-compressed or plain text. The `#Version` / `#Fields`
//! header is stripped and attached to every record; each remaining line
//! becomes one [`Record`] with its text converted to UTF-8.
//!
//! Column-level parsing of the log lines is left to the caller.
pub mod cloudfront;

// Re-export the main types for convenience
pub use cloudfront::{
    CloudfrontCodec,
    CloudfrontError,
    CodecConfig,
    HeaderMetadata,
    Record,
    RecordIterator,
    Result,
};
