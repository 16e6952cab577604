//! Streaming reader for one ZIP member.
//!
//! [`ZipEntryReader`] pulls a member's compressed bytes from the archive in
//! bounded chunks, runs them through the member's decoder and serves the
//! result through [`std::io::Read`] and [`std::io::BufRead`]. Memory use is
//! bounded by the chunk size and the output of one decoder call; the member
//! is never decompressed up front.

use crate::zip::method::MethodRegistry;
use oxiarc_core::error::{OxiArcError, Result};
use oxiarc_core::traits::StreamDecoder;
use std::io::{self, BufRead, Read};

/// Options for [`ZipEntryReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReaderOptions {
    chunk_size: Option<usize>,
}

impl ReaderOptions {
    /// Options using the decoder's recommended chunk size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read compressed data in chunks of `size` bytes (at least 1).
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size.max(1));
        self
    }

    /// The configured chunk size, if any.
    pub fn chunk_size(&self) -> Option<usize> {
        self.chunk_size
    }
}

/// Decompressing reader over one member's compressed data.
pub struct ZipEntryReader<R: Read> {
    /// Archive positioned at the member's compressed data.
    source: R,
    decoder: Box<dyn StreamDecoder>,
    /// Compressed bytes not yet pulled from `source`.
    remaining: u64,
    /// Read buffer for compressed chunks.
    chunk: Vec<u8>,
    /// Decoded bytes not yet returned.
    buffer: Vec<u8>,
    pos: usize,
    /// No more output will be produced.
    done: bool,
}

impl<R: Read> ZipEntryReader<R> {
    /// Create a reader with default options.
    pub fn new(source: R, decoder: Box<dyn StreamDecoder>, compressed_size: u64) -> Self {
        Self::with_options(source, decoder, compressed_size, ReaderOptions::default())
    }

    /// Create a reader with explicit options.
    pub fn with_options(
        source: R,
        decoder: Box<dyn StreamDecoder>,
        compressed_size: u64,
        options: ReaderOptions,
    ) -> Self {
        let chunk_size = options
            .chunk_size()
            .unwrap_or_else(|| decoder.min_read_size())
            .max(1);

        Self {
            source,
            decoder,
            remaining: compressed_size,
            chunk: vec![0; chunk_size],
            buffer: Vec::new(),
            pos: 0,
            done: false,
        }
    }

    /// Open a member compressed with `method`, using a decoder from `registry`.
    pub fn open(
        registry: &MethodRegistry,
        method: u16,
        source: R,
        compressed_size: u64,
        options: ReaderOptions,
    ) -> Result<Self> {
        let decoder = registry.decoder(method)?;
        Ok(Self::with_options(source, decoder, compressed_size, options))
    }

    /// Name of the member's codec.
    pub fn codec(&self) -> &'static str {
        self.decoder.name()
    }

    /// Size of the compressed chunks pulled from the source.
    pub fn chunk_size(&self) -> usize {
        self.chunk.len()
    }

    /// Check whether all output has been produced and returned.
    pub fn is_finished(&self) -> bool {
        self.done && self.pos >= self.buffer.len()
    }

    /// Return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Decode until some output is buffered or the member ends.
    fn fill(&mut self) -> Result<()> {
        while self.pos >= self.buffer.len() && !self.done {
            if self.decoder.is_finished() {
                self.done = true;
                break;
            }

            if self.remaining == 0 {
                if self.decoder.is_self_terminating() {
                    return Err(OxiArcError::truncated(self.decoder.name()));
                }
                self.done = true;
                break;
            }

            let want = (self.chunk.len() as u64).min(self.remaining) as usize;
            let read = match self.source.read(&mut self.chunk[..want]) {
                Ok(0) => return Err(OxiArcError::truncated(self.decoder.name())),
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            self.remaining -= read as u64;

            self.buffer = self.decoder.decompress(&self.chunk[..read])?;
            self.pos = 0;
        }
        Ok(())
    }
}

impl<R: Read> Read for ZipEntryReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let available = self.fill_buf()?;
        let count = available.len().min(buf.len());
        buf[..count].copy_from_slice(&available[..count]);
        self.consume(count);
        Ok(count)
    }
}

impl<R: Read> BufRead for ZipEntryReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.fill()?;
        Ok(&self.buffer[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buffer.len());
    }
}

impl<R: Read> std::fmt::Debug for ZipEntryReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipEntryReader")
            .field("codec", &self.decoder.name())
            .field("remaining", &self.remaining)
            .field("chunk_size", &self.chunk.len())
            .field("buffered", &(self.buffer.len() - self.pos))
            .field("done", &self.done)
            .finish()
    }
}
