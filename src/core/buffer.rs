//! # Growable Buffer
//!
//! Owned, contiguous byte region with a single write/read cursor.
//!
//! The buffer is reused for both directions: writing advances the cursor and
//! grows capacity on demand; [`SerdesBuffer::rewind`] resets the cursor so the
//! same committed bytes can be consumed as an input stream.
//!
//! ## Growth Policy
//! When a write does not fit, capacity grows to `capacity * 2 + incoming`.
//! Doubling amortizes reallocation cost to O(1) per byte; the extra headroom
//! guarantees the current write always fits in a single growth step, even when
//! it is larger than the whole existing region. The new region is zero-filled
//! and committed bytes are preserved. Capacity never shrinks.

use crate::config::{SerdesConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_FIELD_LEN};
use crate::error::{constants, Result, SerdesError};
use tracing::debug;

/// Growable byte buffer with a write/read cursor.
///
/// Invariant: `0 <= offset <= capacity` after every operation. The backing
/// region is zero-filled past the cursor, and the buffer does not track how
/// many bytes were validly written; see [`SerdesBuffer::read_raw`].
#[derive(Debug, Clone)]
pub struct SerdesBuffer {
    /// Backing region; `data.len()` is the allocated capacity
    data: Vec<u8>,
    /// Boundary between committed/consumed bytes and free space
    offset: usize,
    /// Ceiling for a single decoded length prefix
    max_field_len: usize,
}

impl SerdesBuffer {
    /// Create a buffer with the default initial capacity (1 KB).
    ///
    /// # Errors
    /// Returns `SerdesError::OutOfMemory` if the allocation is refused.
    pub fn new() -> Result<Self> {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create a buffer with a zero-filled region of `capacity` bytes.
    ///
    /// # Errors
    /// Returns `SerdesError::OutOfMemory` if the allocation is refused.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let data = try_zeroed(capacity)?;
        Ok(Self {
            data,
            offset: 0,
            max_field_len: DEFAULT_MAX_FIELD_LEN,
        })
    }

    /// Create a buffer from a validated configuration.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` if the configuration fails
    /// validation, or `SerdesError::OutOfMemory` if the allocation is refused.
    pub fn from_config(config: &SerdesConfig) -> Result<Self> {
        config.validate_strict()?;
        let mut buffer = Self::with_capacity(config.initial_capacity)?;
        buffer.max_field_len = config.max_field_len;
        Ok(buffer)
    }

    /// Append `bytes` at the cursor, growing the region when needed.
    ///
    /// On a growth failure the buffer and cursor are left in their prior
    /// state; nothing from this call is committed.
    ///
    /// # Errors
    /// Returns `SerdesError::OutOfMemory` if growth is refused or the
    /// required size overflows.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        let required = self
            .offset
            .checked_add(bytes.len())
            .ok_or_else(|| SerdesError::OutOfMemory(constants::ERR_SIZE_OVERFLOW.into()))?;

        if required > self.data.len() {
            self.grow(bytes.len())?;
        }

        self.data[self.offset..required].copy_from_slice(bytes);
        self.offset = required;
        Ok(())
    }

    /// Copy `out.len()` bytes from the cursor into `out` and advance.
    ///
    /// The check is capacity-based, not write-position-based: the buffer does
    /// not track how many bytes were validly written, so reading inside
    /// capacity but past written data yields the zero fill rather than an
    /// error. Callers are responsible for rewinding and for reading only what
    /// they wrote.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` if the read would exceed
    /// capacity; the cursor is left unchanged.
    pub fn read_raw(&mut self, out: &mut [u8]) -> Result<()> {
        let end = self
            .offset
            .checked_add(out.len())
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                SerdesError::InvalidOperation(constants::ERR_READ_PAST_CAPACITY.into())
            })?;

        out.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(())
    }

    /// Read `count` bytes into a freshly allocated vector.
    ///
    /// Bounds are checked before the allocation, so a bad count costs
    /// nothing; a refused allocation leaks nothing.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` if the read would exceed
    /// capacity, or `SerdesError::OutOfMemory` if the allocation is refused.
    pub fn read_vec(&mut self, count: usize) -> Result<Vec<u8>> {
        let end = self
            .offset
            .checked_add(count)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| {
                SerdesError::InvalidOperation(constants::ERR_READ_PAST_CAPACITY.into())
            })?;

        let mut out = Vec::new();
        out.try_reserve_exact(count)?;
        out.extend_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(out)
    }

    /// Reset the cursor to 0, reinterpreting committed bytes as input.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Current cursor position.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// The committed bytes, i.e. everything before the cursor.
    pub fn committed(&self) -> &[u8] {
        &self.data[..self.offset]
    }

    /// Ceiling applied to decoded length prefixes.
    pub fn max_field_len(&self) -> usize {
        self.max_field_len
    }

    /// Grow capacity to exactly `min` bytes if currently smaller, zero-filling
    /// the new region. Capacity is never reduced.
    pub(crate) fn ensure_capacity(&mut self, min: usize) -> Result<()> {
        if self.data.len() >= min {
            return Ok(());
        }
        let additional = min - self.data.len();
        self.data.try_reserve_exact(additional)?;
        self.data.resize(min, 0);
        Ok(())
    }

    /// Doubling-plus-slop growth: `capacity * 2 + incoming`.
    fn grow(&mut self, incoming: usize) -> Result<()> {
        let old_capacity = self.data.len();
        let new_capacity = old_capacity
            .checked_mul(2)
            .and_then(|doubled| doubled.checked_add(incoming))
            .ok_or_else(|| SerdesError::OutOfMemory(constants::ERR_SIZE_OVERFLOW.into()))?;

        let additional = new_capacity - old_capacity;
        self.data.try_reserve_exact(additional)?;
        self.data.resize(new_capacity, 0);

        debug!(old_capacity, new_capacity, "buffer grown");
        Ok(())
    }
}

/// Fallibly allocate a zero-filled vector of `capacity` bytes.
fn try_zeroed(capacity: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(capacity)?;
    data.resize(capacity, 0);
    Ok(data)
}
