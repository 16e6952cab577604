//! # OxiArc Core
//!
//! Core components for the OxiArc archive library.
//!
//! This crate provides the building blocks shared by codecs and containers:
//!
//! - [`bitstream`]: Bit-level I/O over incrementally fed input
//! - [`window`]: Sliding window for LZ77 decompression
//! - [`method`]: ZIP compression method ids and extract versions
//! - [`traits`]: The streaming decoder interface hosts program against
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     ZIP method registry, member reader                  │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Deflate64 (LZ77 + Huffman, 64 KB window)            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, SlidingWindow                  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_core::bitstream::BitReader;
//! use oxiarc_core::window::SlidingWindow;
//!
//! let mut reader = BitReader::new();
//! reader.feed(&[0xAB, 0xCD]);
//! assert_eq!(reader.read_bits(12), Some(0xDAB));
//!
//! let mut window = SlidingWindow::deflate64();
//! window.append(b"ab");
//! window.copy_match(2, 4).unwrap();
//! assert_eq!(window.take_output(), b"ababab");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod method;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter, Checkpoint};
pub use error::{OxiArcError, Result};
pub use method::CompressionMethod;
pub use traits::{DEFAULT_MIN_READ_SIZE, StreamDecoder};
pub use window::SlidingWindow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{BitReader, BitWriter};
    pub use crate::error::{OxiArcError, Result};
    pub use crate::method::CompressionMethod;
    pub use crate::traits::StreamDecoder;
    pub use crate::window::SlidingWindow;
}
