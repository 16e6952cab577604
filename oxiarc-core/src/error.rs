//! Error types for OxiArc operations.
//!
//! `OxiArcError` is the error seen by hosts: codec-specific decoder errors
//! are folded into [`OxiArcError::BadData`], so a caller only ever has to
//! handle one shape of "corrupted stream" error per codec.

use std::io;
use thiserror::Error;

/// The main error type for OxiArc operations.
#[derive(Debug, Error)]
pub enum OxiArcError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported compression method.
    #[error("Unsupported compression method: {method}")]
    UnsupportedMethod {
        /// The compression method identifier.
        method: u16,
    },

    /// A compression method id was registered twice.
    #[error("Compression method {method} is already registered")]
    MethodAlreadyRegistered {
        /// The compression method identifier.
        method: u16,
    },

    /// Malformed compressed data.
    #[error("Bad {codec} data: {detail}")]
    BadData {
        /// Codec name, e.g. `Deflate64`.
        codec: &'static str,
        /// Diagnostic detail from the decoder.
        detail: String,
    },

    /// Compressed data ended before the codec's end-of-stream marker.
    #[error("Unexpected end of {codec} stream")]
    TruncatedStream {
        /// Codec name, e.g. `Deflate64`.
        codec: &'static str,
    },

    /// Invalid distance in LZ77 back-reference.
    #[error("Invalid back-reference distance: {distance} exceeds history size {history_size}")]
    InvalidDistance {
        /// The invalid distance value.
        distance: usize,
        /// Number of bytes the distance may reach back.
        history_size: usize,
    },
}

/// Result type alias for OxiArc operations.
pub type Result<T> = std::result::Result<T, OxiArcError>;

impl OxiArcError {
    /// Create an unsupported method error.
    pub fn unsupported_method(method: u16) -> Self {
        Self::UnsupportedMethod { method }
    }

    /// Create a duplicate registration error.
    pub fn method_already_registered(method: u16) -> Self {
        Self::MethodAlreadyRegistered { method }
    }

    /// Create a bad data error.
    pub fn bad_data(codec: &'static str, detail: impl Into<String>) -> Self {
        Self::BadData {
            codec,
            detail: detail.into(),
        }
    }

    /// Create a truncated stream error.
    pub fn truncated(codec: &'static str) -> Self {
        Self::TruncatedStream { codec }
    }

    /// Create an invalid distance error.
    pub fn invalid_distance(distance: usize, history_size: usize) -> Self {
        Self::InvalidDistance {
            distance,
            history_size,
        }
    }
}

impl From<OxiArcError> for io::Error {
    fn from(err: OxiArcError) -> Self {
        match err {
            OxiArcError::Io(inner) => inner,
            other => {
                let kind = match other {
                    OxiArcError::TruncatedStream { .. } => io::ErrorKind::UnexpectedEof,
                    OxiArcError::UnsupportedMethod { .. }
                    | OxiArcError::MethodAlreadyRegistered { .. } => io::ErrorKind::Unsupported,
                    _ => io::ErrorKind::InvalidData,
                };
                io::Error::new(kind, other)
            }
        }
    }
}
