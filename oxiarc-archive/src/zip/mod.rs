//! ZIP member decompression.
//!
//! Header parsing and the directory walk belong to the host; this module
//! provides what the host needs once it has found a member's compressed
//! data:
//!
//! - [`MethodRegistry`]: method id to decoder factory, with the extract
//!   versions each method requires
//! - [`ZipEntryReader`]: a bounded-memory `Read`/`BufRead` over the member

mod method;
mod reader;

pub use method::{DecoderFactory, MethodRegistry, MethodSpec, StoredDecoder};
pub use reader::{ReaderOptions, ZipEntryReader};

use oxiarc_core::error::Result;
use std::io::Read;

/// Open a member for reading with the default method registry.
pub fn open_member<R: Read>(
    method: u16,
    source: R,
    compressed_size: u64,
) -> Result<ZipEntryReader<R>> {
    ZipEntryReader::open(
        &MethodRegistry::new(),
        method,
        source,
        compressed_size,
        ReaderOptions::default(),
    )
}
