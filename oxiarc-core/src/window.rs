//! Sliding window for LZ77 decompression.
//!
//! The window keeps the most recent `capacity` bytes of output so that
//! back-references can be resolved, and collects the bytes produced since
//! the last [`SlidingWindow::take_output`] so a streaming decoder can hand
//! them to its caller.
//!
//! # Sizes
//!
//! - DEFLATE: 32 KB (32768 bytes)
//! - DEFLATE64: 64 KB (65536 bytes)

use crate::error::{OxiArcError, Result};

/// Common window sizes.
pub mod sizes {
    /// Window size for DEFLATE (32 KB).
    pub const DEFLATE: usize = 32768;
    /// Window size for DEFLATE64 (64 KB).
    pub const DEFLATE64: usize = 65536;
}

/// A circular history buffer that also accumulates produced output.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// The history buffer.
    buffer: Vec<u8>,
    /// Current write position (next byte will be written here).
    position: usize,
    /// Mask for efficient modulo (capacity - 1).
    mask: usize,
    /// Total bytes written since creation or the last clear. Never wraps.
    total_written: u64,
    /// Bytes produced since the last `take_output`.
    output: Vec<u8>,
}

impl SlidingWindow {
    /// Create a new window with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a power of 2 or is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity.is_power_of_two(),
            "Capacity must be a power of 2, got {}",
            capacity
        );

        Self {
            buffer: vec![0; capacity],
            position: 0,
            mask: capacity - 1,
            total_written: 0,
            output: Vec::new(),
        }
    }

    /// Create a window for DEFLATE64 decompression (64 KB).
    pub fn deflate64() -> Self {
        Self::new(sizes::DEFLATE64)
    }

    /// Get the capacity of the window.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Total bytes written since creation or the last clear.
    pub fn total_written(&self) -> u64 {
        self.total_written
    }

    /// The largest distance a back-reference may currently use.
    pub fn max_distance(&self) -> usize {
        self.total_written.min(self.buffer.len() as u64) as usize
    }

    /// Write a single byte.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
        self.total_written += 1;
        self.output.push(byte);
    }

    /// Write multiple bytes, overwriting the oldest history once full.
    pub fn append(&mut self, bytes: &[u8]) {
        self.output.extend_from_slice(bytes);
        self.total_written += bytes.len() as u64;

        // Only the last `capacity` bytes can survive in the history.
        let capacity = self.buffer.len();
        let tail = &bytes[bytes.len().saturating_sub(capacity)..];
        let skipped = bytes.len() - tail.len();
        self.position = (self.position + skipped) & self.mask;

        let first = tail.len().min(capacity - self.position);
        self.buffer[self.position..self.position + first].copy_from_slice(&tail[..first]);
        self.buffer[..tail.len() - first].copy_from_slice(&tail[first..]);
        self.position = (self.position + tail.len()) & self.mask;
    }

    /// Copy `length` bytes starting `distance` bytes back.
    ///
    /// Copies byte by byte, so `length > distance` repeats the referenced
    /// bytes the way LZ77 requires.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        let history_size = self.max_distance();
        if distance == 0 || distance > history_size {
            return Err(OxiArcError::invalid_distance(distance, history_size));
        }

        self.output.reserve(length);

        let mut src_pos = self.position.wrapping_sub(distance) & self.mask;
        for _ in 0..length {
            let byte = self.buffer[src_pos];
            self.buffer[self.position] = byte;
            self.output.push(byte);
            self.position = (self.position + 1) & self.mask;
            src_pos = (src_pos + 1) & self.mask;
        }
        self.total_written += length as u64;

        Ok(())
    }

    /// Bytes produced since the last call to `take_output`.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Drain the bytes produced since the last call.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    /// Get the last N bytes of history (for debugging/testing).
    pub fn last_bytes(&self, count: usize) -> Vec<u8> {
        let count = count.min(self.max_distance());
        (0..count)
            .map(|i| self.buffer[self.position.wrapping_sub(count - i) & self.mask])
            .collect()
    }

    /// Reset history, counters and pending output.
    pub fn clear(&mut self) {
        self.position = 0;
        self.total_written = 0;
        self.buffer.fill(0);
        self.output.clear();
    }
}
