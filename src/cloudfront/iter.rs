//! Pull-style access to decoded records.
//!
//! # Example
//! ```no_run
//! # use cloudfront_codec::CloudfrontCodec;
//! # let codec = CloudfrontCodec::default();
//! let file = std::fs::File::open("E2ABCDEF.2019-01-01-00.gz").unwrap();
//! for result in codec.records(file, "E2ABCDEF.2019-01-01-00.gz").unwrap() {
//!     let record = result.unwrap();
//!     println!("{}", record.message);
//! }
//! ```

use std::io::Read;
use std::iter::FusedIterator;

use super::codec::charset::Charset;
use super::codec::compression::DecodedStream;
use super::format::lines;
use super::types::error::Result;
use super::types::models::{HeaderMetadata, Record};

/// Lazy, single-pass iterator over the records of one input.
///
/// The header has already been consumed when the iterator is created. After
/// the first error it yields `None`.
///
/// Created by [`CloudfrontCodec::records()`](crate::CloudfrontCodec::records).
pub struct RecordIterator<R: Read> {
    stream: DecodedStream<R>,
    metadata: HeaderMetadata,
    charset: Charset,
    buf: Vec<u8>,
    finished: bool,
}

impl<R: Read> RecordIterator<R> {
    pub(super) fn new(stream: DecodedStream<R>, metadata: HeaderMetadata, charset: Charset) -> Self {
        Self {
            stream,
            metadata,
            charset,
            buf: Vec::new(),
            finished: false,
        }
    }

    /// Header metadata shared by every record of this input.
    pub fn metadata(&self) -> &HeaderMetadata {
        &self.metadata
    }

    /// Returns `true` if the input was gzip-compressed.
    pub fn is_compressed(&self) -> bool {
        self.stream.is_compressed()
    }
}

impl<R: Read> Iterator for RecordIterator<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match lines::next_record(&mut self.stream, &self.charset, &self.metadata, &mut self.buf) {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for RecordIterator<R> {}
