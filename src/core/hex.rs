//! # Hex Transcoder
//!
//! Converts the buffer's committed bytes to and from a lowercase hexadecimal
//! string, the transport-friendly textual encoding of the binary payload.
//!
//! Encoding emits exactly two digits per byte, most-significant nibble first,
//! with no separators or prefix. Decoding validates every digit (malformed
//! input is rejected rather than silently parsed to zero) and accepts
//! uppercase digits on input while only ever emitting lowercase.

use crate::core::buffer::SerdesBuffer;
use crate::error::{constants, Result, SerdesError};
use tracing::warn;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

impl SerdesBuffer {
    /// Encode the committed bytes as a lowercase hex string of length
    /// `2 * offset`. Returns `None` when the buffer has zero capacity or
    /// nothing has been committed.
    pub fn to_hex(&self) -> Option<String> {
        if self.capacity() == 0 || self.offset() == 0 {
            return None;
        }

        let mut out = String::with_capacity(self.offset() * 2);
        for &byte in self.committed() {
            out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
            out.push(HEX_DIGITS[(byte & 0x0F) as usize] as char);
        }
        Some(out)
    }

    /// Decode a hex string into the buffer, replacing its committed contents.
    ///
    /// Capacity grows to `hex.len() / 2` when currently smaller and is never
    /// reduced. The cursor is reset first and ends at `hex.len() / 2`, as if
    /// the decoded bytes had just been written; call
    /// [`SerdesBuffer::rewind`] before reading them back.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` for odd-length input or any
    /// non-hex character, or `SerdesError::OutOfMemory` if growth is refused.
    pub fn from_hex(&mut self, hex: &str) -> Result<()> {
        if hex.len() % 2 != 0 {
            warn!(len = hex.len(), "rejected odd-length hex input");
            return Err(SerdesError::InvalidOperation(
                constants::ERR_ODD_HEX_LENGTH.into(),
            ));
        }

        self.ensure_capacity(hex.len() / 2)?;
        self.rewind();

        for pair in hex.as_bytes().chunks_exact(2) {
            let hi = decode_digit(pair[0])?;
            let lo = decode_digit(pair[1])?;
            self.write_raw(&[(hi << 4) | lo])?;
        }
        Ok(())
    }
}

fn decode_digit(digit: u8) -> Result<u8> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(SerdesError::InvalidOperation(
            constants::ERR_INVALID_HEX_DIGIT.into(),
        )),
    }
}
