#![no_main]

use field_serdes::{FieldSpec, SerdesBuffer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz field decoding against arbitrary wire bytes - test for panics,
    // crashes, and unchecked allocations from hostile length prefixes
    let Ok(mut buf) = SerdesBuffer::with_capacity(data.len()) else {
        return;
    };
    if buf.write_raw(data).is_err() {
        return;
    }
    buf.rewind();

    let _ = buf.deserialize_field(&FieldSpec::Value {
        len: 4,
        transform: None,
    });
    let _ = buf.deserialize_field(&FieldSpec::Str);
    let _ = buf.deserialize_field(&FieldSpec::Bytes);
});
