use std::any::type_name;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use encoding_rs::Encoding;
use log::{debug, info};

use super::codec::charset::Charset;
use super::codec::compression::{self, DecodedStream, Replay};
use super::format::{header, lines};
use super::iter::RecordIterator;
use super::types::error::Result;
use super::types::models::{CodecConfig, HeaderMetadata, Record};

/// Decoder for CloudFront web and streaming distribution logs.
///
/// Holds only the immutable source charset, so one codec can serve any number
/// of inputs, including from several threads at once. Each decode call owns its
/// own stream and header metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloudfrontCodec {
    charset: Charset,
}

impl CloudfrontCodec {
    /// Builds a codec from `config`.
    ///
    /// # Errors
    /// Returns [`CloudfrontError::UnsupportedCharset`](crate::CloudfrontError::UnsupportedCharset)
    /// if the configured charset is unknown or not ASCII-compatible.
    pub fn new(config: &CodecConfig) -> Result<Self> {
        let charset = Charset::new(&config.charset)?;
        Ok(Self { charset })
    }

    /// The resolved source encoding.
    pub fn charset(&self) -> &'static Encoding {
        self.charset.encoding()
    }

    /// Decodes an in-memory buffer, calling `emit` once per log line.
    ///
    /// Returns the number of records emitted.
    pub fn decode_bytes<F: FnMut(Record)>(&self, data: &[u8], emit: F) -> Result<u64> {
        let identity = format!("in-memory buffer ({} bytes)", data.len());
        self.decode_named(Cursor::new(data), &identity, emit)
    }

    /// Decodes a seekable stream, labelled by its type name in diagnostics.
    pub fn decode<R: Read + Seek, F: FnMut(Record)>(&self, input: R, emit: F) -> Result<u64> {
        self.decode_named(input, type_name::<R>(), emit)
    }

    /// Opens and decodes the log file at `path`.
    pub fn decode_file<F: FnMut(Record)>(&self, path: impl AsRef<Path>, emit: F) -> Result<u64> {
        let path = path.as_ref();
        info!("Opening CloudFront log: {}", path.display());
        let file = File::open(path)?;
        self.decode_named(file, &path.display().to_string(), emit)
    }

    /// Decodes a seekable stream, calling `emit` for each record in input order.
    ///
    /// `identity` names the input in log messages and errors.
    ///
    /// # Errors
    /// - [`CloudfrontError::Decompression`](crate::CloudfrontError::Decompression)
    ///   if the input is gzip but corrupt. Records emitted before the failure
    ///   are not retracted.
    /// - [`CloudfrontError::Io`](crate::CloudfrontError::Io) if a plain-text
    ///   input cannot be read or rewound.
    pub fn decode_named<R: Read + Seek, F: FnMut(Record)>(
        &self,
        input: R,
        identity: &str,
        emit: F,
    ) -> Result<u64> {
        let (mut stream, metadata) = self.open(input, identity)?;
        let count = lines::for_each_line(&mut stream, &metadata, &self.charset, emit)?;
        debug!("Decoded {} records from '{}'", count, identity);
        Ok(count)
    }

    /// Decodes an input that cannot seek, such as stdin, a pipe or a socket.
    ///
    /// Gzip detection reads the two leading bytes and replays them, so plain
    /// text works here too without any rewind.
    pub fn decode_stream<R: Read, F: FnMut(Record)>(
        &self,
        input: R,
        identity: &str,
        emit: F,
    ) -> Result<u64> {
        let mut stream = compression::open_stream(input, identity)?;
        let metadata = self.extract_header(&mut stream)?;
        let count = lines::for_each_line(&mut stream, &metadata, &self.charset, emit)?;
        debug!("Decoded {} records from '{}'", count, identity);
        Ok(count)
    }

    /// Lazy iterator over the records of an input that cannot seek.
    pub fn records_stream<R: Read>(
        &self,
        input: R,
        identity: &str,
    ) -> Result<RecordIterator<Replay<R>>> {
        let mut stream = compression::open_stream(input, identity)?;
        let metadata = self.extract_header(&mut stream)?;
        Ok(RecordIterator::new(stream, metadata, self.charset))
    }

    /// Opens a seekable stream and returns a lazy iterator over its records.
    ///
    /// Compression sniffing and header extraction happen eagerly, so errors in
    /// either are returned here rather than from the iterator.
    pub fn records<R: Read + Seek>(&self, input: R, identity: &str) -> Result<RecordIterator<R>> {
        let (stream, metadata) = self.open(input, identity)?;
        Ok(RecordIterator::new(stream, metadata, self.charset))
    }

    fn open<R: Read + Seek>(
        &self,
        input: R,
        identity: &str,
    ) -> Result<(DecodedStream<R>, HeaderMetadata)> {
        let mut stream = compression::open(input, identity)?;
        let metadata = self.extract_header(&mut stream)?;
        Ok((stream, metadata))
    }

    fn extract_header<R: Read>(&self, stream: &mut DecodedStream<R>) -> Result<HeaderMetadata> {
        let mut buf = Vec::new();
        let metadata = header::extract(stream, &self.charset, &mut buf)?;
        debug!("Cloudfront: extracted metadata from '{}': {:?}", stream.identity(), metadata);
        Ok(metadata)
    }
}
