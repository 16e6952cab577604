//! DEFLATE64 decompression (inflate).
//!
//! [`Inflater`] is a push-style state machine: every call to
//! [`Inflater::decompress`] appends its input to the pending bits, decodes as
//! far as the buffered data allows and returns the bytes produced. Input may
//! be split at any byte boundary; the concatenated output does not depend on
//! where the splits fall.
//!
//! Block types:
//! - Type 0: Stored (uncompressed), `LEN`/`NLEN` 16 bits each
//! - Type 1: Fixed Huffman codes
//! - Type 2: Dynamic Huffman codes
//!
//! Each multi-field unit (a block header, a whole dynamic table header, one
//! literal/length/distance group) is consumed atomically: if the input runs
//! out in the middle of one, the reader is rolled back to its start and the
//! unit is decoded again on the next call. Stored payloads are copied as
//! they arrive.

use crate::error::{Deflate64Error, Result};
use crate::huffman::{CODELEN_ALPHABET_SIZE, END_OF_BLOCK, HuffmanTree, LITLEN_ALPHABET_SIZE};
use crate::tables::{
    CODE_LENGTH_ORDER, DISTANCE_EXTRA_BITS, LENGTH_EXTRA_BITS, decode_distance, decode_length,
    fixed_distance_tree, fixed_litlen_tree,
};
use log::{debug, trace, warn};
use oxiarc_core::{BitReader, SlidingWindow};

/// Return `Ok(None)` from the enclosing function when input runs out.
macro_rules! need {
    ($value:expr) => {
        match $value {
            Some(value) => value,
            None => return Ok(None),
        }
    };
}

/// Huffman codes of the current block.
#[derive(Debug)]
enum Codes {
    /// The process-wide fixed trees.
    Fixed,
    /// Trees read from a dynamic block header.
    Dynamic(Box<DynamicCodes>),
}

#[derive(Debug)]
struct DynamicCodes {
    litlen: HuffmanTree,
    distance: HuffmanTree,
}

impl Codes {
    fn trees(&self) -> (&HuffmanTree, &HuffmanTree) {
        match self {
            Codes::Fixed => (fixed_litlen_tree(), fixed_distance_tree()),
            Codes::Dynamic(codes) => (&codes.litlen, &codes.distance),
        }
    }
}

/// Decoder state between units.
#[derive(Debug)]
enum State {
    /// Expecting BFINAL and BTYPE.
    BlockHeader,
    /// Inside a stored block with this many payload bytes left.
    Stored { remaining: usize },
    /// Inside a Huffman-coded block.
    Huffman(Codes),
    /// The final block has ended.
    Done,
}

/// How a run of Huffman-coded symbols stopped.
enum BodyProgress {
    EndOfBlock,
    NeedInput,
}

/// DEFLATE64 decompression session for one stream.
#[derive(Debug)]
pub struct Inflater {
    /// Compressed bytes fed but not yet decoded.
    input: BitReader,
    /// 64 KB history plus the output of the current call.
    window: SlidingWindow,
    state: State,
    /// Whether the current block has BFINAL set.
    final_block: bool,
    /// First error hit; every later call repeats it.
    failed: Option<Deflate64Error>,
}

impl Inflater {
    /// Create a new DEFLATE64 decompressor.
    pub fn new() -> Self {
        Self {
            input: BitReader::new(),
            window: SlidingWindow::deflate64(),
            state: State::BlockHeader,
            final_block: false,
            failed: None,
        }
    }

    /// Reset the decompressor to its initial state.
    pub fn reset(&mut self) {
        self.input.clear();
        self.window.clear();
        self.state = State::BlockHeader;
        self.final_block = false;
        self.failed = None;
    }

    /// Check whether the final block's end has been decoded.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Compressed bytes consumed so far (a partially used byte counts).
    pub fn total_in(&self) -> u64 {
        self.input.bit_position().div_ceil(8)
    }

    /// Decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.window.total_written()
    }

    /// Bytes fed after the end of the stream.
    ///
    /// Empty until the stream is finished.
    pub fn unused_input(&self) -> &[u8] {
        if self.is_finished() {
            self.input.remaining_bytes()
        } else {
            &[]
        }
    }

    /// Feed `input` and return every byte it allows to be decoded.
    ///
    /// Running out of input is not an error: the state is kept and decoding
    /// resumes on the next call. Empty input is always a no-op. After the end
    /// of the stream, non-empty input is rejected.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if input.is_empty() {
            return Ok(Vec::new());
        }
        if self.is_finished() {
            return Err(self.fail(Deflate64Error::TrailingInput { len: input.len() }));
        }

        self.input.feed(input);
        if let Err(err) = self.run() {
            return Err(self.fail(err));
        }
        self.input.compact();

        Ok(self.window.take_output())
    }

    fn fail(&mut self, err: Deflate64Error) -> Deflate64Error {
        warn!(
            "Deflate64 stream failed after {} bytes in, {} bytes out: {}",
            self.total_in(),
            self.total_out(),
            err
        );
        self.window.take_output();
        self.failed = Some(err.clone());
        err
    }

    /// Drive the state machine until input runs out or the stream ends.
    fn run(&mut self) -> Result<()> {
        loop {
            let progressed = match &self.state {
                State::BlockHeader => self.read_block_header()?,
                State::Stored { remaining } => {
                    let remaining = *remaining;
                    self.copy_stored(remaining)
                }
                State::Huffman(codes) => {
                    let (litlen, distance) = codes.trees();
                    match inflate_codes(&mut self.input, &mut self.window, litlen, distance)? {
                        BodyProgress::EndOfBlock => {
                            self.end_block();
                            true
                        }
                        BodyProgress::NeedInput => false,
                    }
                }
                State::Done => return Ok(()),
            };

            if !progressed {
                return Ok(());
            }
        }
    }

    /// Read BFINAL, BTYPE and the rest of the block header.
    ///
    /// Returns `Ok(false)` with nothing consumed if the header is incomplete.
    fn read_block_header(&mut self) -> Result<bool> {
        let start = self.input.checkpoint();

        let Some(header) = self.input.read_bits(3) else {
            return Ok(false);
        };
        let last = header & 1 != 0;

        let state = match header >> 1 {
            0 => match self.read_stored_header()? {
                Some(len) => {
                    trace!("stored block: final={}, len={}", last, len);
                    State::Stored { remaining: len }
                }
                None => {
                    self.input.restore(start);
                    return Ok(false);
                }
            },
            1 => {
                trace!("fixed Huffman block: final={}", last);
                State::Huffman(Codes::Fixed)
            }
            2 => match self.read_dynamic_header()? {
                Some(codes) => {
                    trace!(
                        "dynamic Huffman block: final={}, {} literal/length codes, {} distance codes",
                        last,
                        codes.litlen.symbol_count(),
                        codes.distance.symbol_count()
                    );
                    State::Huffman(Codes::Dynamic(Box::new(codes)))
                }
                None => {
                    self.input.restore(start);
                    return Ok(false);
                }
            },
            btype => {
                return Err(Deflate64Error::format_at(
                    self.input.bit_position(),
                    format!("invalid block type {}", btype),
                ));
            }
        };

        self.final_block = last;
        self.state = state;
        Ok(true)
    }

    /// Align and read `LEN` and `NLEN`.
    fn read_stored_header(&mut self) -> Result<Option<usize>> {
        self.input.align_to_byte();
        let len = need!(self.input.read_bits(16));
        let nlen = need!(self.input.read_bits(16));

        if len != !nlen & 0xFFFF {
            return Err(Deflate64Error::format_at(
                self.input.bit_position(),
                format!("invalid stored block lengths {:#06x}/{:#06x}", len, nlen),
            ));
        }

        Ok(Some(len as usize))
    }

    /// Read the code length tables of a dynamic block and build its trees.
    fn read_dynamic_header(&mut self) -> Result<Option<DynamicCodes>> {
        let input = &mut self.input;

        let hlit = need!(input.read_bits(5)) as usize + 257;
        let hdist = need!(input.read_bits(5)) as usize + 1;
        let hclen = need!(input.read_bits(4)) as usize + 4;

        if hlit > LITLEN_ALPHABET_SIZE {
            return Err(Deflate64Error::format_at(
                input.bit_position(),
                format!("too many literal/length codes ({})", hlit),
            ));
        }

        let mut code_length_lengths = [0u8; CODELEN_ALPHABET_SIZE];
        for &index in &CODE_LENGTH_ORDER[..hclen] {
            code_length_lengths[index] = need!(input.read_bits(3)) as u8;
        }
        let code_length_tree = HuffmanTree::from_code_lengths(&code_length_lengths)
            .map_err(|err| Deflate64Error::format(format!("code length code: {}", err)))?;

        let total = hlit + hdist;
        let mut lengths = vec![0u8; total];
        let mut i = 0;

        while i < total {
            let symbol = need!(code_length_tree.decode(input)?);

            let (value, repeat) = match symbol {
                0..=15 => (symbol as u8, 1),
                16 => {
                    if i == 0 {
                        return Err(Deflate64Error::format_at(
                            input.bit_position(),
                            "repeated code length with no previous length",
                        ));
                    }
                    (lengths[i - 1], need!(input.read_bits(2)) as usize + 3)
                }
                17 => (0, need!(input.read_bits(3)) as usize + 3),
                _ => (0, need!(input.read_bits(7)) as usize + 11),
            };

            if i + repeat > total {
                return Err(Deflate64Error::format_at(
                    input.bit_position(),
                    "code length repeat overruns the table",
                ));
            }
            lengths[i..i + repeat].fill(value);
            i += repeat;
        }

        if lengths[END_OF_BLOCK as usize] == 0 {
            return Err(Deflate64Error::format("missing end-of-block code"));
        }

        let litlen = HuffmanTree::from_code_lengths(&lengths[..hlit])
            .map_err(|err| Deflate64Error::format(format!("literal/length code: {}", err)))?;
        let distance = HuffmanTree::from_code_lengths(&lengths[hlit..])
            .map_err(|err| Deflate64Error::format(format!("distance code: {}", err)))?;

        Ok(Some(DynamicCodes { litlen, distance }))
    }

    /// Copy as much of a stored block's payload as is buffered.
    fn copy_stored(&mut self, remaining: usize) -> bool {
        if remaining == 0 {
            self.end_block();
            return true;
        }

        let bytes = self.input.read_aligned_bytes(remaining);
        if bytes.is_empty() {
            return false;
        }
        let copied = bytes.len();
        self.window.append(bytes);

        self.state = State::Stored {
            remaining: remaining - copied,
        };
        true
    }

    fn end_block(&mut self) {
        if self.final_block {
            debug!(
                "Deflate64 stream finished: {} bytes in, {} bytes out",
                self.total_in(),
                self.total_out()
            );
            self.state = State::Done;
        } else {
            self.state = State::BlockHeader;
        }
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode symbols of a Huffman-coded block until its end or the input's.
fn inflate_codes(
    input: &mut BitReader,
    window: &mut SlidingWindow,
    litlen_tree: &HuffmanTree,
    dist_tree: &HuffmanTree,
) -> Result<BodyProgress> {
    loop {
        let start = input.checkpoint();

        let Some(symbol) = litlen_tree.decode(input)? else {
            return Ok(BodyProgress::NeedInput);
        };

        match symbol {
            0..=255 => window.push(symbol as u8),
            END_OF_BLOCK => return Ok(BodyProgress::EndOfBlock),
            257..=285 => match read_match(input, dist_tree, symbol)? {
                Some((length, distance)) => {
                    let available = window.max_distance();
                    if distance > available {
                        return Err(Deflate64Error::DistanceTooFar {
                            distance,
                            available,
                        });
                    }
                    window
                        .copy_match(distance, length)
                        .map_err(|_| Deflate64Error::DistanceTooFar {
                            distance,
                            available,
                        })?;
                }
                None => {
                    input.restore(start);
                    return Ok(BodyProgress::NeedInput);
                }
            },
            _ => {
                return Err(Deflate64Error::format_at(
                    input.bit_position(),
                    format!("invalid literal/length symbol {}", symbol),
                ));
            }
        }
    }
}

/// Read the length extra bits, distance symbol and distance extra bits.
fn read_match(
    input: &mut BitReader,
    dist_tree: &HuffmanTree,
    length_symbol: u16,
) -> Result<Option<(usize, usize)>> {
    let length_extra = need!(input.read_bits(LENGTH_EXTRA_BITS[(length_symbol - 257) as usize]));
    let length = decode_length(length_symbol, length_extra);

    let dist_symbol = need!(dist_tree.decode(input)?);
    let dist_extra = need!(input.read_bits(DISTANCE_EXTRA_BITS[dist_symbol as usize]));
    let distance = decode_distance(dist_symbol, dist_extra);

    Ok(Some((length, distance)))
}
