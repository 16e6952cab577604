//! # OxiArc Deflate64
//!
//! Pure Rust streaming decoder for DEFLATE64 ("Enhanced Deflate", ZIP
//! compression method 9).
//!
//! DEFLATE64 is DEFLATE (RFC 1951) with a 64 KB window, length code 285
//! extended to 16 extra bits (matches of 3-65538 bytes), and distance codes
//! 30 and 31 (distances up to 65536).
//!
//! ## Features
//!
//! - All block types: stored, fixed Huffman, dynamic Huffman
//! - Incremental feeding: input can be split at any byte boundary
//! - [`Deflate64Decoder`]: the decoder as an `oxiarc_core::StreamDecoder`
//!   for archive readers
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_deflate64::Inflater;
//!
//! // A single final stored block holding "Hello".
//! let compressed = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
//!
//! let mut inflater = Inflater::new();
//! let mut output = Vec::new();
//! for chunk in compressed.chunks(3) {
//!     output.extend(inflater.decompress(chunk).unwrap());
//! }
//! assert_eq!(output, b"Hello");
//! assert!(inflater.is_finished());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod error;
pub mod huffman;
pub mod inflate;
pub mod tables;

// Re-exports
pub use codec::{Deflate64Decoder, MIN_READ_SIZE, inflate64};
pub use error::{Deflate64Error, Result};
pub use huffman::HuffmanTree;
pub use inflate::Inflater;
