//! Example: Serializing a record field by field
//!
//! This example walks a small record through the whole pipeline: field-wise
//! encoding into the growable buffer, hex transcoding for a text-only
//! transport, and field-wise decoding on the receiving side.
//!
//! Run with: `cargo run --example person_record`

use field_serdes::core::byte_order;
use field_serdes::{DecodedField, Field, FieldSpec, SerdesBuffer};

struct Person {
    id: u32,
    name: String,
    score: f32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    field_serdes::utils::logging::init();

    let person = Person {
        id: 1,
        name: "Alice".to_string(),
        score: 95.5,
    };

    println!("=== Field Serialization Demo ===\n");
    println!(
        "Original: id={}, name={}, score={:.1}\n",
        person.id, person.name, person.score
    );

    // Encode: the id travels in network order, the float in host order
    let mut outgoing = SerdesBuffer::with_capacity(1024)?;
    outgoing.serialize_field(&Field::Value {
        bytes: &person.id.to_ne_bytes(),
        transform: Some(&byte_order::to_network),
    })?;
    outgoing.serialize_field(&Field::Str(&person.name))?;
    outgoing.serialize_field(&Field::Value {
        bytes: &person.score.to_ne_bytes(),
        transform: None,
    })?;

    let hex = outgoing.to_hex().ok_or("nothing was serialized")?;
    println!("Serialized hex ({} bytes on the wire): {hex}\n", outgoing.offset());

    // Decode from the hex string, mirroring the descriptor sequence exactly
    let mut incoming = SerdesBuffer::with_capacity(1024)?;
    incoming.from_hex(&hex)?;
    incoming.rewind();

    let id = match incoming.deserialize_field(&FieldSpec::Value {
        len: 4,
        transform: Some(&byte_order::to_host),
    })? {
        DecodedField::Value(bytes) => u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        other => return Err(format!("unexpected field: {other:?}").into()),
    };

    let name = incoming
        .deserialize_field(&FieldSpec::Str)?
        .into_string()
        .ok_or("expected a string field")?;

    let score = match incoming.deserialize_field(&FieldSpec::Value {
        len: 4,
        transform: None,
    })? {
        DecodedField::Value(bytes) => f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        other => return Err(format!("unexpected field: {other:?}").into()),
    };

    println!("Deserialized: id={id}, name={name}, score={score:.1}");
    assert_eq!(id, person.id);
    assert_eq!(name, person.name);
    assert_eq!(score, person.score);

    Ok(())
}
