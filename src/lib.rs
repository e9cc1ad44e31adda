//! # Field Serdes
//!
//! Binary field-oriented serialization engine.
//!
//! The engine packs typed values, length-prefixed strings, and length-prefixed
//! opaque buffers into a contiguous growable byte buffer, and reverses the
//! process to reconstruct them. Optional per-field transforms (typically the
//! network byte-order adapters) run at the serialize/deserialize boundary, and
//! the committed buffer can be transcoded to and from a lowercase hex string
//! for text-only transports.
//!
//! ## Components
//! - **Buffer** ([`SerdesBuffer`]): owned byte region with a write/read cursor
//!   and an explicit doubling-plus-slop growth policy
//! - **Fields** ([`Field`], [`FieldSpec`], [`DecodedField`]): the
//!   descriptor-driven wire protocol
//! - **Byte order** ([`crate::core::byte_order`]): manual host/network
//!   converters and their transform adapters
//! - **Hex**: committed bytes to/from lowercase hex
//! - **Config** ([`SerdesConfig`]): capacities and decode limits
//!
//! ## Wire Format
//! No magic number and no type tags: the descriptor sequence used for
//! decoding must exactly mirror the sequence used for encoding.
//!
//! ## Example
//! ```rust
//! use field_serdes::core::byte_order;
//! use field_serdes::{DecodedField, Field, FieldSpec, SerdesBuffer};
//!
//! # fn main() -> field_serdes::Result<()> {
//! let id: u32 = 7;
//! let mut buf = SerdesBuffer::new()?;
//! buf.serialize_field(&Field::Value {
//!     bytes: &id.to_le_bytes(),
//!     transform: Some(&byte_order::to_network),
//! })?;
//! buf.serialize_field(&Field::Str("alice"))?;
//!
//! let hex = buf.to_hex().expect("buffer is non-empty");
//!
//! let mut incoming = SerdesBuffer::new()?;
//! incoming.from_hex(&hex)?;
//! incoming.rewind();
//!
//! let id_back = incoming.deserialize_field(&FieldSpec::Value {
//!     len: 4,
//!     transform: Some(&byte_order::to_host),
//! })?;
//! let name = incoming.deserialize_field(&FieldSpec::Str)?;
//! assert_eq!(id_back.as_bytes(), id.to_le_bytes());
//! assert_eq!(name, DecodedField::Str("alice".into()));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//! Strictly single-threaded and synchronous: a buffer is not safe for
//! concurrent access and has no internal locking; callers serialize all use
//! of one buffer.

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

// Re-export the primary types at the crate root
pub use crate::config::SerdesConfig;
pub use crate::core::buffer::SerdesBuffer;
pub use crate::core::field::{DecodedField, Field, FieldSpec, Transform};
pub use crate::error::{Result, SerdesError};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
