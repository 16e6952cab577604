//! # OxiArc Archive
//!
//! Archive container support for OxiArc.
//!
//! This crate plugs codecs into a ZIP reader:
//!
//! - **Method registry**: which compression methods can be read, and the
//!   "version needed to extract" each one requires
//! - **Member reader**: streaming decompression of one member through
//!   `std::io::Read`
//!
//! Supported methods: stored (0) and DEFLATE64 (9).
//!
//! ## Example
//!
//! ```rust
//! use oxiarc_archive::zip::{MethodRegistry, ReaderOptions, ZipEntryReader};
//! use std::io::{Cursor, Read};
//!
//! // A DEFLATE64 stream holding a single stored block with "Hello".
//! let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
//!
//! let registry = MethodRegistry::new();
//! let mut reader = ZipEntryReader::open(
//!     &registry,
//!     9,
//!     Cursor::new(data),
//!     data.len() as u64,
//!     ReaderOptions::default(),
//! )
//! .unwrap();
//!
//! let mut text = String::new();
//! reader.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "Hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod zip;

// Re-exports
pub use zip::{MethodRegistry, MethodSpec, ReaderOptions, StoredDecoder, ZipEntryReader};
