//! Transparent gzip detection for CloudFront log inputs.
//!
//! CloudFront delivers logs gzip-compressed, but the same content may also
//! arrive as plain text. A seekable input is first opened as gzip; how that
//! attempt fails decides what happens next:
//! - Header parsed: the input is gzip. Any later decompression error is fatal.
//! - Header rejected, no gzip magic: the input is plain text. It is rewound to
//!   position zero and read as-is.
//! - Header rejected, gzip magic present: the framing is corrupt. Fatal.
//!
//! Inputs that cannot seek go through [`open_stream`], which reads the two
//! magic bytes up front and replays them in front of the rest of the input.
//!
//! Members are decoded back to back. Bytes after the last member that do not
//! start another member are ignored.

use std::io::{self, BufRead, BufReader, Chain, Cursor, Read, Seek, SeekFrom};

use flate2::bufread::GzDecoder;
use log::{debug, error, trace};

use crate::cloudfront::types::error::{CloudfrontError, Result};

/// Leading bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A non-seekable input with its sniffed leading bytes put back in front.
pub type Replay<R> = Chain<Cursor<Vec<u8>>, R>;

/// Reads consecutive gzip members from one input.
///
/// After a member ends, the next one is decoded only if the remaining bytes
/// start with the gzip magic. Anything else ends the stream.
pub struct GzipMembers<R: Read> {
    decoder: Option<GzDecoder<BufReader<R>>>,
    identity: String,
}

impl<R: Read> GzipMembers<R> {
    fn new(decoder: GzDecoder<BufReader<R>>, identity: &str) -> Self {
        Self {
            decoder: Some(decoder),
            identity: identity.to_string(),
        }
    }
}

impl<R: Read> Read for GzipMembers<R> {
    fn read(&mut self, into: &mut [u8]) -> io::Result<usize> {
        loop {
            let Some(decoder) = self.decoder.as_mut() else {
                return Ok(0);
            };
            let n = decoder.read(into)?;
            if n > 0 || into.is_empty() {
                return Ok(n);
            }

            // Member finished and its trailer checked out.
            let Some(decoder) = self.decoder.take() else {
                return Ok(0);
            };
            let mut inner = decoder.into_inner();
            let (next_member, trailing) = {
                let rest = inner.fill_buf()?;
                // A single buffered 0x1f may be the first half of the magic.
                let next_member = rest.starts_with(&GZIP_MAGIC) || rest == [GZIP_MAGIC[0]];
                (next_member, rest.len())
            };
            if trailing == 0 {
                return Ok(0);
            }
            if !next_member {
                debug!(
                    "Ignoring trailing bytes after the last gzip member of '{}' ({} buffered)",
                    self.identity, trailing
                );
                return Ok(0);
            }
            trace!("Next gzip member in '{}'", self.identity);
            self.decoder = Some(GzDecoder::new(inner));
        }
    }
}

enum Inner<R: Read> {
    Gzip(BufReader<GzipMembers<R>>),
    Plain(BufReader<R>),
}

/// Line-oriented view of an input after compression handling.
pub struct DecodedStream<R: Read> {
    inner: Inner<R>,
    identity: String,
}

impl<R: Read> DecodedStream<R> {
    fn gzip(decoder: GzDecoder<BufReader<R>>, identity: &str) -> Self {
        if let Some(header) = decoder.header() {
            debug!(
                "Input '{}' is gzip-compressed (member mtime={}, filename={:?})",
                identity,
                header.mtime(),
                header.filename().map(String::from_utf8_lossy)
            );
        }
        Self {
            inner: Inner::Gzip(BufReader::new(GzipMembers::new(decoder, identity))),
            identity: identity.to_string(),
        }
    }

    fn plain(input: R, identity: &str) -> Self {
        Self {
            inner: Inner::Plain(BufReader::new(input)),
            identity: identity.to_string(),
        }
    }

    /// Returns `true` when lines are read through the gzip decoder.
    pub fn is_compressed(&self) -> bool {
        matches!(self.inner, Inner::Gzip(_))
    }

    /// The label of the input this stream reads from.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Reads the next raw line, terminator included, into `buf`.
    ///
    /// `buf` is cleared first. Returns `0` at end of stream.
    ///
    /// # Errors
    /// Decompression failures are reported as
    /// [`CloudfrontError::Decompression`]; plain-text read failures as
    /// [`CloudfrontError::Io`].
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<usize> {
        buf.clear();
        match &mut self.inner {
            Inner::Gzip(reader) => reader
                .read_until(b'\n', buf)
                .map_err(|source| corrupt_gzip(&self.identity, source)),
            Inner::Plain(reader) => Ok(reader.read_until(b'\n', buf)?),
        }
    }
}

/// Opens `input` as gzip, falling back to plain text when it is not gzip.
///
/// `identity` names the input in log messages and errors.
///
/// # Errors
/// - [`CloudfrontError::Decompression`] if the input starts with the gzip
///   magic bytes but its header cannot be parsed.
/// - [`CloudfrontError::Io`] if the input cannot be rewound or read.
pub fn open<R: Read + Seek>(input: R, identity: &str) -> Result<DecodedStream<R>> {
    let mut decoder = GzDecoder::new(BufReader::new(input));
    if decoder.header().is_some() {
        return Ok(DecodedStream::gzip(decoder, identity));
    }

    let cause = header_error(&mut decoder);
    let mut input = decoder.into_inner().into_inner();
    input.seek(SeekFrom::Start(0))?;
    if has_gzip_magic(&mut input)? {
        return Err(corrupt_gzip(identity, cause));
    }
    input.seek(SeekFrom::Start(0))?;

    debug!("Input '{}' is not gzip ({}), reading as plain text", identity, cause);
    Ok(DecodedStream::plain(input, identity))
}

/// Opens an input that cannot seek, such as a pipe or a socket.
///
/// The first two bytes are read to decide between gzip and plain text, then
/// replayed, so nothing is lost on the plain-text path.
///
/// # Errors
/// - [`CloudfrontError::Decompression`] if the input starts with the gzip
///   magic bytes but its header cannot be parsed.
/// - [`CloudfrontError::Io`] if the leading bytes cannot be read.
pub fn open_stream<R: Read>(mut input: R, identity: &str) -> Result<DecodedStream<Replay<R>>> {
    let mut prefix = Vec::with_capacity(GZIP_MAGIC.len());
    input.by_ref().take(GZIP_MAGIC.len() as u64).read_to_end(&mut prefix)?;
    trace!("Leading bytes: {:02x?}", prefix);
    let is_gzip = prefix == GZIP_MAGIC;
    let replay = Cursor::new(prefix).chain(input);

    if !is_gzip {
        debug!("Input '{}' is not gzip, reading as plain text", identity);
        return Ok(DecodedStream::plain(replay, identity));
    }

    let mut decoder = GzDecoder::new(BufReader::new(replay));
    if decoder.header().is_some() {
        return Ok(DecodedStream::gzip(decoder, identity));
    }
    let cause = header_error(&mut decoder);
    Err(corrupt_gzip(identity, cause))
}

/// The decoder keeps a header error and hands it out on the first read.
fn header_error<R: BufRead>(decoder: &mut GzDecoder<R>) -> io::Error {
    match decoder.read(&mut [0u8; 1]) {
        Err(e) => e,
        Ok(_) => io::Error::new(io::ErrorKind::InvalidData, "invalid gzip header"),
    }
}

fn corrupt_gzip(identity: &str, source: io::Error) -> CloudfrontError {
    error!(
        "Cloudfront codec: cannot uncompress the gzip input '{}': {}",
        identity, source
    );
    CloudfrontError::Decompression {
        input: identity.to_string(),
        source,
    }
}

/// Checks whether the next two bytes of `input` are the gzip magic.
fn has_gzip_magic<R: Read>(input: &mut R) -> io::Result<bool> {
    let mut magic = Vec::with_capacity(GZIP_MAGIC.len());
    input.by_ref().take(GZIP_MAGIC.len() as u64).read_to_end(&mut magic)?;
    trace!("Leading bytes: {:02x?}", magic);
    Ok(magic == GZIP_MAGIC)
}
