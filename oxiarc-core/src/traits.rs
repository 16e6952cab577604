//! Core traits for pluggable decompression.
//!
//! A host archive reader talks to every codec through [`StreamDecoder`]: it
//! pushes raw compressed bytes in whatever chunks it happens to read and gets
//! back the bytes decoded so far.

use crate::error::{OxiArcError, Result};

/// Read-chunk size suggested by decoders that have no preference.
pub const DEFAULT_MIN_READ_SIZE: usize = 4096;

/// A push-style streaming decompressor for one archive member.
///
/// Implementations must accept arbitrary split points: feeding a stream in
/// one call or in many slices yields the same concatenated output.
pub trait StreamDecoder: Send {
    /// Name of the codec, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Decode as much of `input` (and previously buffered input) as possible.
    ///
    /// Empty input is always accepted and leaves the state unchanged.
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Check if the end of the compressed stream has been reached.
    fn is_finished(&self) -> bool;

    /// Whether the stream carries its own end marker.
    ///
    /// Decoders that return `false` finish when the member's compressed
    /// bytes run out.
    fn is_self_terminating(&self) -> bool {
        true
    }

    /// Recommended minimum number of compressed bytes per call.
    ///
    /// This is a throughput hint only.
    fn min_read_size(&self) -> usize {
        DEFAULT_MIN_READ_SIZE
    }

    /// Decompress a complete stream at once (convenience method).
    fn decompress_all(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let output = self.decompress(input)?;
        if self.is_self_terminating() && !self.is_finished() {
            return Err(OxiArcError::truncated(self.name()));
        }
        Ok(output)
    }
}

impl<D: StreamDecoder + ?Sized> StreamDecoder for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).decompress(input)
    }

    fn is_finished(&self) -> bool {
        (**self).is_finished()
    }

    fn is_self_terminating(&self) -> bool {
        (**self).is_self_terminating()
    }

    fn min_read_size(&self) -> usize {
        (**self).min_read_size()
    }
}
