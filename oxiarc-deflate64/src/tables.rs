//! Code tables for DEFLATE64.
//!
//! DEFLATE64 reuses the DEFLATE (RFC 1951) tables with two changes:
//! - length code 285 carries 16 extra bits on a base of 3 (lengths
//!   3-65538) instead of meaning exactly 258;
//! - distance codes 30 and 31 are valid, with 14 extra bits each, reaching
//!   distances up to 65536.

use crate::huffman::HuffmanTree;
use std::sync::OnceLock;

/// Number of entries in the fixed literal/length table.
pub const FIXED_LITLEN_COUNT: usize = 288;

/// Number of entries in the fixed distance table.
pub const FIXED_DISTANCE_COUNT: usize = 32;

/// Fixed literal/length code lengths (RFC 1951 Section 3.2.6).
///
/// - Symbols 0-143: 8 bits
/// - Symbols 144-255: 9 bits
/// - Symbols 256-279: 7 bits
/// - Symbols 280-287: 8 bits
pub fn fixed_litlen_lengths() -> [u8; FIXED_LITLEN_COUNT] {
    let mut lengths = [0u8; FIXED_LITLEN_COUNT];
    for (symbol, len) in lengths.iter_mut().enumerate() {
        *len = match symbol {
            0..=143 => 8,
            144..=255 => 9,
            256..=279 => 7,
            _ => 8,
        };
    }
    lengths
}

/// Fixed distance code lengths: all 32 codes use 5 bits.
pub fn fixed_distance_lengths() -> [u8; FIXED_DISTANCE_COUNT] {
    [5u8; FIXED_DISTANCE_COUNT]
}

/// Get the fixed literal/length Huffman tree.
///
/// Built once per process and shared by every decoder.
pub fn fixed_litlen_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();

    TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_litlen_lengths())
            .expect("Fixed litlen tree construction should never fail")
    })
}

/// Get the fixed distance Huffman tree.
pub fn fixed_distance_tree() -> &'static HuffmanTree {
    static TREE: OnceLock<HuffmanTree> = OnceLock::new();

    TREE.get_or_init(|| {
        HuffmanTree::from_code_lengths(&fixed_distance_lengths())
            .expect("Fixed distance tree construction should never fail")
    })
}

/// Length code base values for codes 257-285.
pub const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, // 257-264: 0 extra bits
    11, 13, 15, 17, // 265-268: 1 extra bit
    19, 23, 27, 31, // 269-272: 2 extra bits
    35, 43, 51, 59, // 273-276: 3 extra bits
    67, 83, 99, 115, // 277-280: 4 extra bits
    131, 163, 195, 227, // 281-284: 5 extra bits
    3,   // 285: 16 extra bits
];

/// Number of extra bits for length codes 257-285.
pub const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, // 257-264
    1, 1, 1, 1, // 265-268
    2, 2, 2, 2, // 269-272
    3, 3, 3, 3, // 273-276
    4, 4, 4, 4, // 277-280
    5, 5, 5, 5,  // 281-284
    16, // 285
];

/// Distance code base values for codes 0-31.
pub const DISTANCE_BASE: [u16; 32] = [
    1, 2, 3, 4, // 0-3: 0 extra bits
    5, 7, // 4-5: 1 extra bit
    9, 13, // 6-7: 2 extra bits
    17, 25, // 8-9: 3 extra bits
    33, 49, // 10-11: 4 extra bits
    65, 97, // 12-13: 5 extra bits
    129, 193, // 14-15: 6 extra bits
    257, 385, // 16-17: 7 extra bits
    513, 769, // 18-19: 8 extra bits
    1025, 1537, // 20-21: 9 extra bits
    2049, 3073, // 22-23: 10 extra bits
    4097, 6145, // 24-25: 11 extra bits
    8193, 12289, // 26-27: 12 extra bits
    16385, 24577, // 28-29: 13 extra bits
    32769, 49153, // 30-31: 14 extra bits
];

/// Number of extra bits for distance codes 0-31.
pub const DISTANCE_EXTRA_BITS: [u8; 32] = [
    0, 0, 0, 0, // 0-3
    1, 1, // 4-5
    2, 2, // 6-7
    3, 3, // 8-9
    4, 4, // 10-11
    5, 5, // 12-13
    6, 6, // 14-15
    7, 7, // 16-17
    8, 8, // 18-19
    9, 9, // 20-21
    10, 10, // 22-23
    11, 11, // 24-25
    12, 12, // 26-27
    13, 13, // 28-29
    14, 14, // 30-31
];

/// Order of code length codes in dynamic block header (RFC 1951 Section 3.2.7).
pub const CODE_LENGTH_ORDER: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Longest match a DEFLATE64 stream can express.
pub const MAX_MATCH_LENGTH: usize = 65538;

/// Longest distance a DEFLATE64 stream can express.
pub const MAX_DISTANCE: usize = 65536;

/// Decode a length from a length code (257-285) and its extra bits.
pub fn decode_length(code: u16, extra: u32) -> usize {
    debug_assert!((257..=285).contains(&code), "Invalid length code: {}", code);
    LENGTH_BASE[(code - 257) as usize] as usize + extra as usize
}

/// Decode a distance from a distance code (0-31) and its extra bits.
pub fn decode_distance(code: u16, extra: u32) -> usize {
    debug_assert!(code < 32, "Invalid distance code: {}", code);
    DISTANCE_BASE[code as usize] as usize + extra as usize
}

/// Convert a match length (3-65538) to `(code, extra_bits, extra_value)`.
///
/// Lengths up to 258 use the RFC 1951 codes 257-284; longer lengths use
/// code 285.
pub fn length_to_code(length: usize) -> (u16, u8, u32) {
    debug_assert!(
        (3..=MAX_MATCH_LENGTH).contains(&length),
        "Length out of range: {}",
        length
    );

    let index = if length > 258 {
        28
    } else {
        LENGTH_BASE[..28]
            .iter()
            .rposition(|&base| base as usize <= length)
            .unwrap_or(0)
    };

    let extra = (length - LENGTH_BASE[index] as usize) as u32;
    (257 + index as u16, LENGTH_EXTRA_BITS[index], extra)
}

/// Convert a distance (1-65536) to `(code, extra_bits, extra_value)`.
pub fn distance_to_code(distance: usize) -> (u16, u8, u32) {
    debug_assert!(
        (1..=MAX_DISTANCE).contains(&distance),
        "Distance out of range: {}",
        distance
    );

    let index = DISTANCE_BASE
        .iter()
        .rposition(|&base| base as usize <= distance)
        .unwrap_or(0);

    let extra = (distance - DISTANCE_BASE[index] as usize) as u32;
    (index as u16, DISTANCE_EXTRA_BITS[index], extra)
}
