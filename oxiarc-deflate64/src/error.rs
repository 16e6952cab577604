//! Decoder errors for DEFLATE64 streams.

use oxiarc_core::OxiArcError;
use thiserror::Error;

/// Codec name used in host-facing errors ("Bad Deflate64 data: ...").
pub const CODEC_NAME: &str = "Deflate64";

/// Errors raised while decoding a DEFLATE64 stream.
///
/// Running out of input is not an error: the decoder returns what it has and
/// waits for the next call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Deflate64Error {
    /// Malformed block header, code table or symbol.
    #[error("{0}")]
    Format(String),

    /// A back-reference reaches before the start of the output or beyond the
    /// 64 KB window.
    #[error("invalid distance {distance} too far back ({available} bytes available)")]
    DistanceTooFar {
        /// The decoded distance.
        distance: usize,
        /// How far back a reference could reach at that point.
        available: usize,
    },

    /// Input was supplied after the end of the stream.
    #[error("{len} bytes of input after end of stream")]
    TrailingInput {
        /// Number of bytes supplied.
        len: usize,
    },
}

/// Result type alias for DEFLATE64 decoding.
pub type Result<T> = std::result::Result<T, Deflate64Error>;

impl Deflate64Error {
    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create a format error annotated with the bit position of the fault.
    pub fn format_at(bit_position: u64, message: impl std::fmt::Display) -> Self {
        Self::Format(format!("{} at bit {}", message, bit_position))
    }
}

impl From<Deflate64Error> for OxiArcError {
    fn from(err: Deflate64Error) -> Self {
        OxiArcError::bad_data(CODEC_NAME, err.to_string())
    }
}
