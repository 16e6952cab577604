//! DEFLATE64 as a pluggable decompression method.
//!
//! [`Deflate64Decoder`] adapts one [`Inflater`] session to the
//! [`StreamDecoder`] interface archive readers program against. Every decoder
//! failure reaches the host as [`OxiArcError::BadData`], displayed as
//! `"Bad Deflate64 data: ..."`.

use crate::error::CODEC_NAME;
use crate::inflate::Inflater;
use oxiarc_core::error::{OxiArcError, Result};
use oxiarc_core::method::CompressionMethod;
use oxiarc_core::traits::StreamDecoder;

/// Compressed bytes per call that keep the decoder busy (64 KB).
///
/// Only a throughput hint: any chunking decodes identically.
pub const MIN_READ_SIZE: usize = 64 * 1024;

/// Streaming DEFLATE64 decoder for one archive member.
#[derive(Debug, Default)]
pub struct Deflate64Decoder {
    inflater: Inflater,
}

impl Deflate64Decoder {
    /// The ZIP method this decoder handles.
    pub const METHOD: CompressionMethod = CompressionMethod::Deflate64;

    /// Create a decoder at the start of a stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boxed decoder, for use as a registry factory.
    pub fn boxed() -> Box<dyn StreamDecoder> {
        Box::new(Self::new())
    }

    /// Input left over after the end of the stream.
    pub fn unused_input(&self) -> &[u8] {
        self.inflater.unused_input()
    }

    /// Compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.inflater.total_in()
    }

    /// Decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.inflater.total_out()
    }
}

impl StreamDecoder for Deflate64Decoder {
    fn name(&self) -> &'static str {
        CODEC_NAME
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.inflater.decompress(input).map_err(OxiArcError::from)
    }

    fn is_finished(&self) -> bool {
        self.inflater.is_finished()
    }

    fn min_read_size(&self) -> usize {
        MIN_READ_SIZE
    }
}

/// Decompress a complete DEFLATE64 stream.
///
/// Fails with [`OxiArcError::TruncatedStream`] if `data` ends before the
/// final block does.
pub fn inflate64(data: &[u8]) -> Result<Vec<u8>> {
    Deflate64Decoder::new().decompress_all(data)
}
