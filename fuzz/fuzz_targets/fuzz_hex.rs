#![no_main]

use field_serdes::SerdesBuffer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the hex decoder with arbitrary text - malformed input must be
    // rejected, never mis-parsed or panicked on
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(mut buf) = SerdesBuffer::with_capacity(16) else {
        return;
    };
    if buf.from_hex(text).is_ok() {
        // A successful decode must re-encode to the same lowercase image
        if let Some(hex) = buf.to_hex() {
            assert_eq!(hex, text.to_ascii_lowercase());
        }
    }
});
