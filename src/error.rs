//! # Error Types
//!
//! Error handling for the field serialization engine.
//!
//! The engine reports every failure through exactly two error kinds:
//! - **`OutOfMemory`**: an allocation or reservation was refused, or a size
//!   computation overflowed.
//! - **`InvalidOperation`**: a degenerate descriptor, a read past the buffer
//!   capacity, a malformed length prefix, or malformed hex input.
//!
//! All operations return [`Result`] values; no code path in the library
//! unwinds on failure.
//!
//! ## Example Usage
//! ```rust
//! use field_serdes::error::{Result, SerdesError};
//! use field_serdes::SerdesBuffer;
//!
//! fn read_four(buf: &mut SerdesBuffer) -> Result<[u8; 4]> {
//!     let mut out = [0u8; 4];
//!     buf.read_raw(&mut out)?;
//!     Ok(out)
//! }
//!
//! let mut buf = SerdesBuffer::with_capacity(2).unwrap();
//! assert!(matches!(read_four(&mut buf), Err(SerdesError::InvalidOperation(_))));
//! ```

use std::collections::TryReserveError;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
/// Static strings are borrowed, avoiding heap allocations for common error cases.
pub mod constants {
    /// Buffer errors
    pub const ERR_READ_PAST_CAPACITY: &str = "Read exceeds buffer capacity";
    pub const ERR_SIZE_OVERFLOW: &str = "Requested size overflows usize";

    /// Field descriptor errors
    pub const ERR_EMPTY_VALUE: &str = "Value field has zero size";
    pub const ERR_FIELD_TOO_LONG: &str = "Field length exceeds the 32-bit prefix range";
    pub const ERR_ZERO_STRING_PREFIX: &str = "String length prefix of zero";
    pub const ERR_MISSING_TERMINATOR: &str = "Decoded string is missing its zero terminator";
    pub const ERR_INVALID_UTF8: &str = "Decoded string is not valid UTF-8";

    /// Hex transcoding errors
    pub const ERR_ODD_HEX_LENGTH: &str = "Hex input has odd length";
    pub const ERR_INVALID_HEX_DIGIT: &str = "Invalid hexadecimal digit";

    /// Configuration errors
    pub const ERR_CONFIG_INVALID: &str = "Configuration validation failed";
}

/// SerdesError is the primary error type for all engine operations
#[derive(Error, Debug)]
pub enum SerdesError {
    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<TryReserveError> for SerdesError {
    fn from(err: TryReserveError) -> Self {
        SerdesError::OutOfMemory(err.to_string())
    }
}

/// Type alias for Results using SerdesError
pub type Result<T> = std::result::Result<T, SerdesError>;
