//! # Field Engine
//!
//! Descriptor-driven encoding and decoding of individual fields.
//!
//! Each field is described by a variant of [`Field`] (serialize) or
//! [`FieldSpec`] (deserialize). Nothing about the field is written to the
//! wire beyond its payload and, for variable-length variants, a 4-byte
//! big-endian length prefix; there is no type tag. The `FieldSpec` sequence
//! used for decoding must exactly mirror the `Field` sequence used for
//! encoding, in order and in kind.
//!
//! ## Transforms
//! A `Value` field may carry a [`Transform`], applied to a private scratch
//! copy on both paths. The caller's bytes are never mutated during
//! serialization, and decoded bytes are only handed over after the transform
//! has run. The byte-order adapters in [`crate::core::byte_order`] are the
//! typical transforms.

use crate::core::buffer::SerdesBuffer;
use crate::error::{constants, Result, SerdesError};
use tracing::{trace, warn};

/// Size of the length prefix carried by `Str` and `Bytes` fields.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Per-field byte transform applied at the serialize/deserialize boundary.
///
/// Implementations mutate the scratch copy handed to them; they never see
/// caller-owned memory or already-committed buffer bytes.
pub trait Transform {
    fn apply(&self, bytes: &mut [u8]);
}

impl<F> Transform for F
where
    F: Fn(&mut [u8]),
{
    fn apply(&self, bytes: &mut [u8]) {
        self(bytes)
    }
}

/// One serialization operation, borrowing the caller's data.
pub enum Field<'a> {
    /// Fixed-size scalar given as its in-memory bytes, with an optional
    /// transform applied to a scratch copy before writing.
    Value {
        bytes: &'a [u8],
        transform: Option<&'a dyn Transform>,
    },
    /// Length-prefixed string; the prefix counts the UTF-8 bytes plus the
    /// terminating zero byte that follows them on the wire.
    Str(&'a str),
    /// Length-prefixed opaque payload, written verbatim.
    Bytes(&'a [u8]),
}

/// One deserialization operation, mirroring [`Field`].
pub enum FieldSpec<'a> {
    /// Fixed-size scalar of `len` bytes, with an optional transform applied
    /// to the freshly read copy before it is handed to the caller.
    Value {
        len: usize,
        transform: Option<&'a dyn Transform>,
    },
    /// Length-prefixed string with trailing zero terminator.
    Str,
    /// Length-prefixed opaque payload.
    Bytes,
}

/// Owned result of decoding one field. Ownership of the allocation passes to
/// the caller on successful return; the engine retains nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedField {
    /// Scalar bytes after the transform ran.
    Value(Vec<u8>),
    /// Decoded string, terminator stripped.
    Str(String),
    /// Decoded payload; `len()` equals the decoded length prefix.
    Bytes(Vec<u8>),
}

impl DecodedField {
    /// The decoded string, if this is a `Str` field.
    pub fn into_string(self) -> Option<String> {
        match self {
            DecodedField::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The decoded allocation, for `Value` and `Bytes` fields.
    pub fn into_vec(self) -> Option<Vec<u8>> {
        match self {
            DecodedField::Value(bytes) | DecodedField::Bytes(bytes) => Some(bytes),
            DecodedField::Str(_) => None,
        }
    }

    /// A view of the decoded bytes, whatever the variant.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            DecodedField::Value(bytes) | DecodedField::Bytes(bytes) => bytes,
            DecodedField::Str(s) => s.as_bytes(),
        }
    }
}

impl SerdesBuffer {
    /// Encode one field at the cursor.
    ///
    /// On failure no rollback is attempted beyond the buffer's own
    /// no-partial-mutation guarantee for the failing write; fields committed
    /// earlier in a sequence stay committed.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` for degenerate descriptors
    /// (empty `Value` bytes, payloads beyond the 32-bit prefix range) and
    /// `SerdesError::OutOfMemory` if scratch allocation or buffer growth is
    /// refused.
    pub fn serialize_field(&mut self, field: &Field<'_>) -> Result<()> {
        match field {
            Field::Value { bytes, transform } => {
                if bytes.is_empty() {
                    return Err(SerdesError::InvalidOperation(
                        constants::ERR_EMPTY_VALUE.into(),
                    ));
                }
                trace!(kind = "value", len = bytes.len(), "serialize field");

                let mut scratch = try_copy(bytes)?;
                if let Some(transform) = transform {
                    transform.apply(&mut scratch);
                }
                self.write_raw(&scratch)
            }
            Field::Str(s) => {
                // Prefix counts the terminator
                let len = s
                    .len()
                    .checked_add(1)
                    .filter(|len| *len <= u32::MAX as usize)
                    .ok_or_else(|| {
                        SerdesError::InvalidOperation(constants::ERR_FIELD_TOO_LONG.into())
                    })?;
                trace!(kind = "str", len, "serialize field");

                self.write_raw(&(len as u32).to_be_bytes())?;
                self.write_raw(s.as_bytes())?;
                self.write_raw(&[0])
            }
            Field::Bytes(payload) => {
                if payload.len() > u32::MAX as usize {
                    return Err(SerdesError::InvalidOperation(
                        constants::ERR_FIELD_TOO_LONG.into(),
                    ));
                }
                trace!(kind = "bytes", len = payload.len(), "serialize field");

                self.write_raw(&(payload.len() as u32).to_be_bytes())?;
                self.write_raw(payload)
            }
        }
    }

    /// Decode one field at the cursor, mirroring [`SerdesBuffer::serialize_field`].
    ///
    /// The caller's world is only touched on success: the decoded value is
    /// the return value, and a failed payload read frees whatever was
    /// allocated for it.
    ///
    /// # Errors
    /// Returns `SerdesError::InvalidOperation` when the read would exceed
    /// capacity, the length prefix is zero (strings) or above the configured
    /// ceiling, the terminator is missing, or the bytes are not valid UTF-8;
    /// `SerdesError::OutOfMemory` if an allocation is refused.
    pub fn deserialize_field(&mut self, spec: &FieldSpec<'_>) -> Result<DecodedField> {
        match spec {
            FieldSpec::Value { len, transform } => {
                if *len == 0 {
                    return Err(SerdesError::InvalidOperation(
                        constants::ERR_EMPTY_VALUE.into(),
                    ));
                }
                trace!(kind = "value", len = *len, "deserialize field");

                let mut scratch = self.read_vec(*len)?;
                if let Some(transform) = transform {
                    transform.apply(&mut scratch);
                }
                Ok(DecodedField::Value(scratch))
            }
            FieldSpec::Str => {
                let len = self.read_len_prefix()?;
                if len == 0 {
                    return Err(SerdesError::InvalidOperation(
                        constants::ERR_ZERO_STRING_PREFIX.into(),
                    ));
                }
                trace!(kind = "str", len, "deserialize field");

                let mut bytes = self.read_vec(len)?;
                match bytes.pop() {
                    Some(0) => {}
                    _ => {
                        return Err(SerdesError::InvalidOperation(
                            constants::ERR_MISSING_TERMINATOR.into(),
                        ))
                    }
                }
                let s = String::from_utf8(bytes).map_err(|_| {
                    SerdesError::InvalidOperation(constants::ERR_INVALID_UTF8.into())
                })?;
                Ok(DecodedField::Str(s))
            }
            FieldSpec::Bytes => {
                let len = self.read_len_prefix()?;
                trace!(kind = "bytes", len, "deserialize field");

                let bytes = self.read_vec(len)?;
                Ok(DecodedField::Bytes(bytes))
            }
        }
    }

    /// Read and validate a 4-byte big-endian length prefix.
    ///
    /// The claimed length is checked against the configured ceiling before
    /// any allocation happens, so a hostile prefix cannot force a huge
    /// reservation.
    fn read_len_prefix(&mut self) -> Result<usize> {
        let mut prefix = [0u8; LEN_PREFIX_SIZE];
        self.read_raw(&mut prefix)?;

        let len = u32::from_be_bytes(prefix) as usize;
        if len > self.max_field_len() {
            warn!(
                len,
                limit = self.max_field_len(),
                "rejected oversized length prefix"
            );
            return Err(SerdesError::InvalidOperation(format!(
                "Length prefix {len} exceeds limit {}",
                self.max_field_len()
            )));
        }
        Ok(len)
    }
}

/// Fallibly copy `bytes` into a fresh scratch vector.
fn try_copy(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut scratch = Vec::new();
    scratch.try_reserve_exact(bytes.len())?;
    scratch.extend_from_slice(bytes);
    Ok(scratch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SerdesConfig;
    use crate::core::byte_order;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_value_roundtrip_without_transform() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Value {
            bytes: &[0xDE, 0xAD, 0xBE, 0xEF],
            transform: None,
        })
        .unwrap();

        buf.rewind();
        let decoded = buf
            .deserialize_field(&FieldSpec::Value {
                len: 4,
                transform: None,
            })
            .unwrap();
        assert_eq!(decoded, DecodedField::Value(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_value_transform_runs_on_scratch_only() {
        let original = [0x01, 0x02, 0x03, 0x04];
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Value {
            bytes: &original,
            transform: Some(&byte_order::to_network),
        })
        .unwrap();

        // Caller bytes untouched, wire bytes reversed
        assert_eq!(original, [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(buf.committed(), &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_value_u16_roundtrip_with_transforms() {
        let port: u16 = 0x1234;
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Value {
            bytes: &port.to_le_bytes(),
            transform: Some(&byte_order::to_network),
        })
        .unwrap();

        buf.rewind();
        let decoded = buf
            .deserialize_field(&FieldSpec::Value {
                len: 2,
                transform: Some(&byte_order::to_host),
            })
            .unwrap();
        let bytes = decoded.into_vec().unwrap();
        assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), port);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_empty_value_rejected_both_ways() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        assert!(buf
            .serialize_field(&Field::Value {
                bytes: &[],
                transform: None,
            })
            .is_err());
        assert!(buf
            .deserialize_field(&FieldSpec::Value {
                len: 0,
                transform: None,
            })
            .is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_str_wire_layout() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Str("hi")).unwrap();

        // [0, 0, 0, 3] "hi" [0]
        assert_eq!(buf.committed(), &[0, 0, 0, 3, b'h', b'i', 0]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_str_roundtrip() {
        let mut buf = SerdesBuffer::with_capacity(64).unwrap();
        buf.serialize_field(&Field::Str("hello world")).unwrap();

        buf.rewind();
        let decoded = buf.deserialize_field(&FieldSpec::Str).unwrap();
        assert_eq!(decoded.into_string().unwrap(), "hello world");
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_empty_str_roundtrip() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Str("")).unwrap();
        assert_eq!(buf.committed(), &[0, 0, 0, 1, 0]);

        buf.rewind();
        let decoded = buf.deserialize_field(&FieldSpec::Str).unwrap();
        assert_eq!(decoded, DecodedField::Str(String::new()));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_str_missing_terminator_rejected() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        // Prefix claims 2 bytes but the payload does not end in zero
        buf.write_raw(&[0, 0, 0, 2, b'a', b'b']).unwrap();

        buf.rewind();
        let err = buf.deserialize_field(&FieldSpec::Str).unwrap_err();
        assert!(matches!(err, SerdesError::InvalidOperation(_)));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_str_invalid_utf8_rejected() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.write_raw(&[0, 0, 0, 3, 0xFF, 0xFE, 0]).unwrap();

        buf.rewind();
        let err = buf.deserialize_field(&FieldSpec::Str).unwrap_err();
        assert!(matches!(err, SerdesError::InvalidOperation(_)));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_zero_string_prefix_rejected() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.write_raw(&[0, 0, 0, 0]).unwrap();

        buf.rewind();
        assert!(buf.deserialize_field(&FieldSpec::Str).is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_bytes_roundtrip() {
        let payload = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x42];
        let mut buf = SerdesBuffer::with_capacity(64).unwrap();
        buf.serialize_field(&Field::Bytes(&payload)).unwrap();

        buf.rewind();
        let decoded = buf.deserialize_field(&FieldSpec::Bytes).unwrap();
        assert_eq!(decoded.as_bytes(), payload.as_slice());
        assert_eq!(decoded.into_vec().unwrap().len(), payload.len());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_empty_bytes_roundtrip() {
        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Bytes(&[])).unwrap();
        assert_eq!(buf.committed(), &[0, 0, 0, 0]);

        buf.rewind();
        let decoded = buf.deserialize_field(&FieldSpec::Bytes).unwrap();
        assert_eq!(decoded, DecodedField::Bytes(vec![]));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_oversized_prefix_rejected_before_allocation() {
        let config = SerdesConfig {
            initial_capacity: 16,
            max_field_len: 8,
        };
        let mut buf = SerdesBuffer::from_config(&config).unwrap();
        buf.write_raw(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap();

        buf.rewind();
        let err = buf.deserialize_field(&FieldSpec::Bytes).unwrap_err();
        assert!(matches!(err, SerdesError::InvalidOperation(_)));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_truncated_payload_rejected() {
        let mut buf = SerdesBuffer::with_capacity(8).unwrap();
        // Prefix claims more bytes than the buffer can hold
        buf.write_raw(&[0, 0, 0, 200]).unwrap();

        buf.rewind();
        assert!(buf.deserialize_field(&FieldSpec::Bytes).is_err());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_closure_transform() {
        let xor_mask = |bytes: &mut [u8]| {
            for b in bytes.iter_mut() {
                *b ^= 0x55;
            }
        };

        let mut buf = SerdesBuffer::with_capacity(16).unwrap();
        buf.serialize_field(&Field::Value {
            bytes: &[0x00, 0xFF],
            transform: Some(&xor_mask),
        })
        .unwrap();
        assert_eq!(buf.committed(), &[0x55, 0xAA]);

        buf.rewind();
        let decoded = buf
            .deserialize_field(&FieldSpec::Value {
                len: 2,
                transform: Some(&xor_mask),
            })
            .unwrap();
        assert_eq!(decoded, DecodedField::Value(vec![0x00, 0xFF]));
    }
}
