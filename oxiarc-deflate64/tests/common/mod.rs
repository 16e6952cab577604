//! Test-only DEFLATE64 stream builder.
//!
//! Emits stored, fixed-Huffman and dynamic-Huffman blocks from explicit
//! token lists and code lengths, so tests control exactly which codes a
//! stream uses.

#![allow(dead_code)]

use oxiarc_core::BitWriter;
use oxiarc_deflate64::tables::{
    CODE_LENGTH_ORDER, distance_to_code, fixed_distance_lengths, fixed_litlen_lengths,
    length_to_code,
};

const END_OF_BLOCK: usize = 256;

/// One LZ77 instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(u8),
    Match { length: usize, distance: usize },
}

/// Tokens emitting `bytes` verbatim.
pub fn literals(bytes: &[u8]) -> Vec<Token> {
    bytes.iter().map(|&b| Token::Literal(b)).collect()
}

/// Canonical (MSB-first) codes for a code length table.
pub fn canonical_codes(lengths: &[u8]) -> Vec<u32> {
    let mut count = [0u32; 16];
    for &len in lengths {
        if len > 0 {
            count[len as usize] += 1;
        }
    }

    let mut next = [0u32; 16];
    let mut code = 0u32;
    for bits in 1..16 {
        code = (code + count[bits - 1]) << 1;
        next[bits] = code;
    }

    lengths
        .iter()
        .map(|&len| {
            if len == 0 {
                return 0;
            }
            let code = next[len as usize];
            next[len as usize] += 1;
            code
        })
        .collect()
}

/// A complete 286-symbol literal/length table (226 codes of 8 bits, 60 of 9).
pub fn full_litlen_lengths() -> Vec<u8> {
    (0..286).map(|symbol| if symbol < 226 { 8 } else { 9 }).collect()
}

/// All 32 distance codes at 5 bits.
pub fn full_distance_lengths() -> Vec<u8> {
    vec![5; 32]
}

/// Code length code: symbols 0-12 at 4 bits, 13-18 at 5 bits (complete).
fn code_length_code_lengths() -> [u8; 19] {
    let mut lengths = [4u8; 19];
    for len in &mut lengths[13..] {
        *len = 5;
    }
    lengths
}

/// Run-length encode code lengths into (symbol, extra bits, extra value).
fn run_length_encode(lengths: &[u8]) -> Vec<(usize, u8, u32)> {
    let mut symbols = Vec::new();
    let mut i = 0;

    while i < lengths.len() {
        let len = lengths[i];
        let mut run = 1;
        while i + run < lengths.len() && lengths[i + run] == len {
            run += 1;
        }

        if len == 0 && run >= 11 {
            let r = run.min(138);
            symbols.push((18, 7, (r - 11) as u32));
            i += r;
        } else if len == 0 && run >= 3 {
            let r = run.min(10);
            symbols.push((17, 3, (r - 3) as u32));
            i += r;
        } else if len != 0 && run >= 4 {
            let r = (run - 1).min(6);
            symbols.push((len as usize, 0, 0));
            symbols.push((16, 2, (r - 3) as u32));
            i += 1 + r;
        } else {
            symbols.push((len as usize, 0, 0));
            i += 1;
        }
    }

    symbols
}

/// Builds a DEFLATE64 stream block by block.
pub struct StreamBuilder {
    writer: BitWriter<Vec<u8>>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self {
            writer: BitWriter::new(Vec::new()),
        }
    }

    fn header(&mut self, last: bool, btype: u32) {
        self.writer.write_bits(last as u32, 1).unwrap();
        self.writer.write_bits(btype, 2).unwrap();
    }

    /// Append a stored block (at most 65535 bytes).
    pub fn stored(&mut self, data: &[u8], last: bool) -> &mut Self {
        assert!(data.len() <= 0xFFFF);
        let len = data.len() as u16;

        self.header(last, 0);
        self.writer.align_to_byte().unwrap();
        self.writer.write_bytes(&len.to_le_bytes()).unwrap();
        self.writer.write_bytes(&(!len).to_le_bytes()).unwrap();
        self.writer.write_bytes(data).unwrap();
        self
    }

    /// Append a fixed-Huffman block.
    pub fn fixed(&mut self, tokens: &[Token], last: bool) -> &mut Self {
        self.header(last, 1);
        self.tokens(tokens, &fixed_litlen_lengths(), &fixed_distance_lengths());
        self
    }

    /// Append a dynamic-Huffman block with the given code lengths.
    ///
    /// `litlen_lengths` has 257-286 entries and `dist_lengths` 1-32.
    pub fn dynamic(
        &mut self,
        tokens: &[Token],
        litlen_lengths: &[u8],
        dist_lengths: &[u8],
        last: bool,
    ) -> &mut Self {
        self.dynamic_header(litlen_lengths, dist_lengths, last);
        self.tokens(tokens, litlen_lengths, dist_lengths);
        self
    }

    /// Write only the header of a dynamic block (no symbols, no end code).
    pub fn dynamic_header(
        &mut self,
        litlen_lengths: &[u8],
        dist_lengths: &[u8],
        last: bool,
    ) -> &mut Self {
        self.header(last, 2);
        self.writer
            .write_bits((litlen_lengths.len() - 257) as u32, 5)
            .unwrap();
        self.writer
            .write_bits((dist_lengths.len() - 1) as u32, 5)
            .unwrap();
        self.writer.write_bits(19 - 4, 4).unwrap();

        let cl_lengths = code_length_code_lengths();
        for &symbol in &CODE_LENGTH_ORDER {
            self.writer.write_bits(cl_lengths[symbol] as u32, 3).unwrap();
        }

        let cl_codes = canonical_codes(&cl_lengths);
        let all: Vec<u8> = litlen_lengths
            .iter()
            .chain(dist_lengths)
            .copied()
            .collect();
        for (symbol, bits, extra) in run_length_encode(&all) {
            self.writer
                .write_code(cl_codes[symbol], cl_lengths[symbol])
                .unwrap();
            self.writer.write_bits(extra, bits).unwrap();
        }
        self
    }

    /// Append a dynamic block using every literal/length and distance code.
    pub fn dynamic_full(&mut self, tokens: &[Token], last: bool) -> &mut Self {
        self.dynamic(
            tokens,
            &full_litlen_lengths(),
            &full_distance_lengths(),
            last,
        )
    }

    /// Emit a raw literal/length symbol with the fixed code.
    pub fn fixed_symbol(&mut self, symbol: usize) -> &mut Self {
        let lengths = fixed_litlen_lengths();
        let codes = canonical_codes(&lengths);
        self.writer.write_code(codes[symbol], lengths[symbol]).unwrap();
        self
    }

    /// Write raw bits (for hand-made malformed streams).
    pub fn raw_bits(&mut self, value: u32, count: u8) -> &mut Self {
        self.writer.write_bits(value, count).unwrap();
        self
    }

    fn tokens(&mut self, tokens: &[Token], litlen_lengths: &[u8], dist_lengths: &[u8]) {
        let lit_codes = canonical_codes(litlen_lengths);
        let dist_codes = canonical_codes(dist_lengths);

        let symbol = |writer: &mut BitWriter<Vec<u8>>, symbol: usize| {
            assert!(litlen_lengths[symbol] > 0, "symbol {} has no code", symbol);
            writer
                .write_code(lit_codes[symbol], litlen_lengths[symbol])
                .unwrap();
        };

        for token in tokens {
            match *token {
                Token::Literal(byte) => symbol(&mut self.writer, byte as usize),
                Token::Match { length, distance } => {
                    let (code, bits, extra) = length_to_code(length);
                    symbol(&mut self.writer, code as usize);
                    self.writer.write_bits(extra, bits).unwrap();

                    let (code, bits, extra) = distance_to_code(distance);
                    let code = code as usize;
                    assert!(dist_lengths[code] > 0, "distance code {} has no code", code);
                    self.writer
                        .write_code(dist_codes[code], dist_lengths[code])
                        .unwrap();
                    self.writer.write_bits(extra, bits).unwrap();
                }
            }
        }

        symbol(&mut self.writer, END_OF_BLOCK);
    }

    /// Pad the last byte and return the stream.
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner().unwrap()
    }
}

/// The text `"Sample content N.\n"` for N in `0..count`.
pub fn sample_text(count: usize) -> Vec<u8> {
    let mut text = Vec::new();
    for n in 0..count {
        text.extend_from_slice(format!("Sample content {}.\n", n).as_bytes());
    }
    text
}

/// Tokens for one sample line, matching its prefix against earlier lines.
///
/// Every 7th line from 2900 on reaches back 2900 lines (distance codes 31),
/// and lines 7k+3 from 1800 on reach back 1800 lines (distance code 30).
fn sample_line_tokens(n: usize, line_starts: &[usize], start: usize) -> Vec<Token> {
    let line = format!("Sample content {}.\n", n);
    if n == 0 {
        return literals(line.as_bytes());
    }

    let back = if n >= 2900 && n % 7 == 0 {
        2900
    } else if n >= 1800 && n % 7 == 3 {
        1800
    } else {
        1
    };

    let mut tokens = vec![Token::Match {
        length: 15,
        distance: start - line_starts[n - back],
    }];
    tokens.extend(literals(&line.as_bytes()[15..]));
    tokens
}

/// A DEFLATE64 stream decoding to [`sample_text`]`(count)`.
///
/// Lines are encoded in groups of `group` lines, cycling through fixed,
/// dynamic and stored blocks, so the stream mixes every block type and
/// back-references that cross block boundaries.
pub fn sample_stream(count: usize, group: usize) -> Vec<u8> {
    let text = sample_text(count);
    let mut builder = StreamBuilder::new();
    let mut line_starts = Vec::with_capacity(count);
    let mut pos = 0;
    let groups = count.div_ceil(group);

    for g in 0..groups {
        let first_line = g * group;
        let last_line = ((g + 1) * group).min(count);
        let last_group = g + 1 == groups;

        let group_start = pos;
        let mut tokens = Vec::new();
        for n in first_line..last_line {
            line_starts.push(pos);
            tokens.extend(sample_line_tokens(n, &line_starts, pos));
            pos += format!("Sample content {}.\n", n).len();
        }

        match g % 3 {
            0 => {
                builder.fixed(&tokens, last_group);
            }
            1 => {
                builder.dynamic_full(&tokens, last_group);
            }
            _ => {
                let bytes = &text[group_start..pos];
                let chunks: Vec<&[u8]> = bytes.chunks(0xFFFF).collect();
                for (i, chunk) in chunks.iter().enumerate() {
                    builder.stored(chunk, last_group && i + 1 == chunks.len());
                }
            }
        }
    }

    builder.finish()
}
