//! Canonical Huffman decoding for DEFLATE64.
//!
//! DEFLATE64 uses the same canonical Huffman codes as DEFLATE (RFC 1951):
//! codes of the same length are consecutive integers assigned in ascending
//! symbol order, and codes are transmitted most significant bit first.
//!
//! # Alphabets
//!
//! - **Literal/Length**: 0-285 (0-255 literals, 256 EOB, 257-285 lengths)
//! - **Distance**: 0-31 (codes 30 and 31 are DEFLATE64 only)
//! - **Code Length**: 0-18 (for encoding dynamic Huffman trees)
//!
//! # Incremental decoding
//!
//! [`HuffmanTree::decode`] never consumes a partial code: if the buffered
//! bits end before a leaf is reached it returns `Ok(None)` and the caller
//! retries after feeding more input.

use crate::error::{Deflate64Error, Result};
use oxiarc_core::BitReader;

/// Maximum code length in DEFLATE64 (15 bits).
pub const MAX_CODE_LENGTH: usize = 15;

/// Largest literal/length alphabet a dynamic header may declare (0-285).
pub const LITLEN_ALPHABET_SIZE: usize = 286;

/// Size of the distance alphabet (0-31).
pub const DISTANCE_ALPHABET_SIZE: usize = 32;

/// Size of the code length alphabet (0-18).
pub const CODELEN_ALPHABET_SIZE: usize = 19;

/// End of block symbol.
pub const END_OF_BLOCK: u16 = 256;

/// A Huffman tree for decoding.
///
/// Codes up to `FAST_BITS` long are resolved with one table lookup; longer
/// codes, and lookups near the end of the buffered input, walk the canonical
/// code one bit at a time.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    /// Lookup table indexed by the next `fast_bits` bits: (symbol, code length).
    /// A length of 0 means the code is longer than `fast_bits` or unassigned.
    fast_table: Vec<(u16, u8)>,
    /// Number of bits for fast lookup.
    fast_bits: u8,
    /// Maximum code length in this tree (0 for an empty tree).
    max_code_length: u8,
    /// Number of codes of each length.
    counts: [u16; MAX_CODE_LENGTH + 1],
    /// Symbols ordered by (code length, symbol), i.e. by canonical code.
    symbols: Vec<u16>,
}

impl HuffmanTree {
    /// Number of bits for fast lookup table.
    const FAST_BITS: u8 = 9;

    /// Build a Huffman tree from code lengths.
    ///
    /// `code_lengths[i]` is the bit length for symbol `i`; 0 means the symbol
    /// is not used.
    ///
    /// Over-subscribed tables and lengths above 15 are rejected. Incomplete
    /// tables are rejected too, except for the two shapes real encoders emit:
    /// no codes at all, and a single code of length 1.
    pub fn from_code_lengths(code_lengths: &[u8]) -> Result<Self> {
        let mut counts = [0u16; MAX_CODE_LENGTH + 1];
        let mut max_length = 0u8;

        for &len in code_lengths {
            if len as usize > MAX_CODE_LENGTH {
                return Err(Deflate64Error::format(format!(
                    "code length {} exceeds maximum {}",
                    len, MAX_CODE_LENGTH
                )));
            }
            if len > 0 {
                counts[len as usize] += 1;
                max_length = max_length.max(len);
            }
        }

        // Remaining code space after each length; negative means over-subscribed.
        let mut left: i32 = 1;
        for &count in &counts[1..] {
            left <<= 1;
            left -= count as i32;
            if left < 0 {
                return Err(Deflate64Error::format("over-subscribed Huffman code"));
            }
        }

        let total: usize = counts.iter().map(|&c| c as usize).sum();
        let single_short_code = total == 1 && counts[1] == 1;
        if left > 0 && total > 0 && !single_short_code {
            return Err(Deflate64Error::format("incomplete Huffman code"));
        }

        // Offsets of each length class in the sorted symbol table.
        let mut offsets = [0usize; MAX_CODE_LENGTH + 2];
        for len in 1..=MAX_CODE_LENGTH {
            offsets[len + 1] = offsets[len] + counts[len] as usize;
        }

        let mut symbols = vec![0u16; total];
        for (symbol, &len) in code_lengths.iter().enumerate() {
            if len > 0 {
                symbols[offsets[len as usize]] = symbol as u16;
                offsets[len as usize] += 1;
            }
        }

        let fast_bits = Self::FAST_BITS.min(max_length);
        let mut fast_table = vec![(0u16, 0u8); 1 << fast_bits];

        // Walk the canonical codes in order, filling every table slot whose
        // low bits match a short code.
        let mut code = 0u32;
        let mut index = 0usize;
        for len in 1..=max_length {
            for _ in 0..counts[len as usize] {
                if len <= fast_bits {
                    let reversed = reverse_bits(code, len) as usize;
                    let fill = 1usize << (fast_bits - len);
                    for i in 0..fill {
                        fast_table[reversed | (i << len)] = (symbols[index], len);
                    }
                }
                code += 1;
                index += 1;
            }
            code <<= 1;
        }

        Ok(Self {
            fast_table,
            fast_bits,
            max_code_length: max_length,
            counts,
            symbols,
        })
    }

    /// Whether the tree has no codes at all.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of symbols with a code.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Length of the longest code.
    pub fn max_code_length(&self) -> u8 {
        self.max_code_length
    }

    /// Decode a symbol from the bit stream.
    ///
    /// Returns `Ok(None)`, consuming nothing, when the buffered bits end
    /// before a leaf is reached. Fails if the bits match no code or the tree
    /// is empty.
    #[inline]
    pub fn decode(&self, reader: &mut BitReader) -> Result<Option<u16>> {
        if self.is_empty() {
            return Err(Deflate64Error::format_at(
                reader.bit_position(),
                "symbol decoded from an empty Huffman code",
            ));
        }

        if let Some(bits) = reader.peek_bits(self.fast_bits) {
            let (symbol, len) = self.fast_table[bits as usize];
            if len > 0 {
                reader.skip_bits(len);
                return Ok(Some(symbol));
            }
        }

        self.decode_slow(reader)
    }

    /// Bit-by-bit canonical walk over the buffered bits.
    fn decode_slow(&self, reader: &mut BitReader) -> Result<Option<u16>> {
        let available = reader.available_bits().min(self.max_code_length as u64) as u8;
        let bits = reader.peek_bits(available).unwrap_or(0);

        let mut code = 0i32; // bits read so far, MSB-first
        let mut first = 0i32; // first code of the current length
        let mut index = 0i32; // index of that first code in `symbols`

        for len in 1..=self.max_code_length {
            if len > available {
                return Ok(None);
            }
            code |= ((bits >> (len - 1)) & 1) as i32;
            let count = self.counts[len as usize] as i32;
            if code - first < count {
                reader.skip_bits(len);
                return Ok(Some(self.symbols[(index + code - first) as usize]));
            }
            index += count;
            first += count;
            first <<= 1;
            code <<= 1;
        }

        Err(Deflate64Error::format_at(
            reader.bit_position(),
            "invalid Huffman code",
        ))
    }
}

/// Reverse the low `length` bits of `code`.
fn reverse_bits(code: u32, length: u8) -> u32 {
    let mut reversed = 0u32;
    for i in 0..length {
        reversed |= ((code >> i) & 1) << (length - 1 - i);
    }
    reversed
}
