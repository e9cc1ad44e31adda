//! # Core Serialization Components
//!
//! Low-level buffer handling, field encoding/decoding, and codecs.
//!
//! This module provides the foundation of the engine: a growable byte buffer
//! with a shared write/read cursor, the descriptor-driven field protocol on
//! top of it, and the two codecs used at the boundary.
//!
//! ## Components
//! - **Buffer**: owned, contiguous byte region that grows on demand
//! - **Field**: value/string/bytes descriptors and their wire protocol
//! - **Byte Order**: host/network converters usable as field transforms
//! - **Hex**: committed bytes to/from a lowercase hex string
//!
//! ## Wire Format
//! ```text
//! Value: [bytes(N)]                      (transform decides the byte order)
//! Str:   [len(4, BE)] [utf8(len-1)] [0]  (len counts the terminator)
//! Bytes: [len(4, BE)] [raw(len)]
//! ```
//!
//! ## Security
//! - Decoded length prefixes are validated against a configurable ceiling
//!   before any allocation happens
//! - All allocations are fallible and surface as `OutOfMemory`

pub mod buffer;
pub mod byte_order;
pub mod field;
pub mod hex;
