//! Core CloudFront log decoder module

pub mod codec;
pub mod format;
pub mod iter;
pub mod reader;
pub mod types;
pub mod utils;

pub use iter::RecordIterator;
pub use reader::CloudfrontCodec;
pub use types::error::{CloudfrontError, Result};
pub use types::models::{CodecConfig, HeaderMetadata, Record, DEFAULT_CHARSET};
