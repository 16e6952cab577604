//! Bit-level I/O for incrementally supplied data.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level, as needed by Huffman-coded formats.
//!
//! # Bit Ordering
//!
//! DEFLATE and DEFLATE64 use LSB-first (Least Significant Bit first) ordering
//! within bytes. Bits are packed starting from the least significant bit of
//! each byte.
//!
//! # Feeding
//!
//! Unlike a reader wrapping `std::io::Read`, [`BitReader`] never blocks and
//! never fails: the caller pushes bytes with [`BitReader::feed`] whenever they
//! arrive, and every read returns `None` (consuming nothing) when not enough
//! bits are buffered yet. Combined with [`BitReader::checkpoint`] and
//! [`BitReader::restore`] this lets a decoder consume a multi-field unit
//! atomically and resume at arbitrary byte boundaries.
//!
//! # Example
//!
//! ```
//! use oxiarc_core::bitstream::{BitReader, BitWriter};
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.flush().unwrap();
//! }
//!
//! let mut reader = BitReader::new();
//! assert_eq!(reader.read_bits(3), None);
//! reader.feed(&output);
//! assert_eq!(reader.read_bits(3), Some(0b101));
//! assert_eq!(reader.read_bits(4), Some(0b1100));
//! ```

use crate::error::Result;
use std::io::Write;

/// A saved read position of a [`BitReader`].
///
/// Only valid until the next [`BitReader::compact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    byte_pos: usize,
    bit_offset: u8,
    total_bits: u64,
}

/// A bit-level reader over bytes supplied with [`feed`](Self::feed).
#[derive(Debug, Clone, Default)]
pub struct BitReader {
    /// Fed bytes not yet dropped by `compact`.
    pending: Vec<u8>,
    /// Index of the current byte in `pending`.
    byte_pos: usize,
    /// Bits already consumed from the current byte, always in `0..8`.
    bit_offset: u8,
    /// Total bits consumed (for error reporting).
    total_bits: u64,
}

impl BitReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the pending buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Number of bits that can be read before more input is needed.
    #[inline]
    pub fn available_bits(&self) -> u64 {
        (self.pending.len() - self.byte_pos) as u64 * 8 - self.bit_offset as u64
    }

    /// Total number of bits consumed since creation or the last reset.
    pub fn bit_position(&self) -> u64 {
        self.total_bits
    }

    /// Check whether the read position sits on a byte boundary.
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset == 0
    }

    /// Peek at up to 32 bits without consuming them.
    ///
    /// Returns `None` if fewer than `count` bits are buffered.
    #[inline]
    pub fn peek_bits(&self, count: u8) -> Option<u32> {
        debug_assert!(count <= 32, "Cannot peek more than 32 bits at once");

        if count == 0 {
            return Some(0);
        }
        if self.available_bits() < count as u64 {
            return None;
        }

        // At most 39 bits are needed (7 bits of offset + 32 bits of value).
        let needed = self.bit_offset as u32 + count as u32;
        let mut acc = 0u64;
        let mut shift = 0u32;
        let mut index = self.byte_pos;
        while shift < needed {
            acc |= (self.pending[index] as u64) << shift;
            shift += 8;
            index += 1;
        }

        let mask = (1u64 << count).wrapping_sub(1);
        Some(((acc >> self.bit_offset) & mask) as u32)
    }

    /// Read up to 32 bits, LSB-first.
    ///
    /// Returns `None` and consumes nothing if fewer than `count` bits are
    /// buffered.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Option<u32> {
        let value = self.peek_bits(count)?;
        self.advance(count as u64);
        Some(value)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Option<bool> {
        self.read_bits(1).map(|bit| bit != 0)
    }

    /// Skip bits that are known to be buffered.
    ///
    /// Returns `false` (and skips nothing) if fewer than `count` bits are
    /// buffered.
    pub fn skip_bits(&mut self, count: u8) -> bool {
        if self.available_bits() < count as u64 {
            return false;
        }
        self.advance(count as u64);
        true
    }

    #[inline]
    fn advance(&mut self, count: u64) {
        let bits = self.bit_offset as u64 + count;
        self.byte_pos += (bits / 8) as usize;
        self.bit_offset = (bits % 8) as u8;
        self.total_bits += count;
    }

    /// Discard the remaining bits of a partially consumed byte.
    ///
    /// The partial byte is always buffered, so this cannot run out of input.
    pub fn align_to_byte(&mut self) {
        if self.bit_offset > 0 {
            self.total_bits += (8 - self.bit_offset) as u64;
            self.bit_offset = 0;
            self.byte_pos += 1;
        }
    }

    /// Borrow up to `max` whole bytes and consume them.
    ///
    /// The reader must be byte-aligned. The returned slice is empty when no
    /// whole byte is buffered.
    pub fn read_aligned_bytes(&mut self, max: usize) -> &[u8] {
        debug_assert!(self.is_byte_aligned(), "Reader must be byte-aligned");

        let start = self.byte_pos;
        let count = max.min(self.pending.len() - start);
        self.byte_pos += count;
        self.total_bits += count as u64 * 8;
        &self.pending[start..start + count]
    }

    /// Whole bytes after the current position (a partial byte is excluded).
    pub fn remaining_bytes(&self) -> &[u8] {
        let start = self.byte_pos + usize::from(self.bit_offset > 0);
        &self.pending[start.min(self.pending.len())..]
    }

    /// Save the current read position.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            byte_pos: self.byte_pos,
            bit_offset: self.bit_offset,
            total_bits: self.total_bits,
        }
    }

    /// Roll back to a position saved with [`checkpoint`](Self::checkpoint).
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.byte_pos = checkpoint.byte_pos;
        self.bit_offset = checkpoint.bit_offset;
        self.total_bits = checkpoint.total_bits;
    }

    /// Drop fully consumed bytes. Invalidates earlier checkpoints.
    pub fn compact(&mut self) {
        if self.byte_pos > 0 {
            self.pending.drain(..self.byte_pos);
            self.byte_pos = 0;
        }
    }

    /// Drop all buffered input and reset the position.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.byte_pos = 0;
        self.bit_offset = 0;
        self.total_bits = 0;
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BitWriter` accumulates bits in an internal buffer and flushes complete
/// bytes to the underlying writer. Call `flush()` (or `into_inner()`) when
/// done to write any remaining partial byte.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit buffer (LSB-first).
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Flush complete bytes from the buffer to the writer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer & 0xFF) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
        Ok(())
    }

    /// Write up to 32 bits to the stream, LSB-first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count).wrapping_sub(1);
        self.buffer |= (value as u64 & mask) << self.bits_in_buffer;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a Huffman code given MSB-first, as DEFLATE transmits them.
    pub fn write_code(&mut self, code: u32, length: u8) -> Result<()> {
        let mut reversed = 0u32;
        for i in 0..length {
            reversed |= ((code >> i) & 1) << (length - 1 - i);
        }
        self.write_bits(reversed, length)
    }

    /// Pad to byte boundary with zeros.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_buffer % 8 != 0 {
            let padding = 8 - (self.bits_in_buffer % 8);
            self.write_bits(0, padding)?;
        }
        Ok(())
    }

    /// Write bytes at the current bit position.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        if self.bits_in_buffer == 0 {
            self.writer.write_all(buf)?;
            self.total_bits_written += buf.len() as u64 * 8;
            return Ok(());
        }
        for &byte in buf {
            self.write_bits(byte as u32, 8)?;
        }
        Ok(())
    }

    /// Pad the final partial byte with zeros and flush the writer.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.flush_bytes()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}
