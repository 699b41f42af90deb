//! Fuzz testing for the schema-free wire decoders.
//!
//! This fuzz target feeds arbitrary byte sequences to the envelope, frame,
//! and primitive decoders to ensure malformed input is always rejected with
//! an error instead of panicking or reading out of bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;

use colstore::encoding::{
    decode_envelope, decode_frame, extract_envelope_crc32, primitive,
};

fuzz_target!(|data: &[u8]| {
    let _ = decode_envelope(data);
    let _ = extract_envelope_crc32(data);
    let _ = decode_frame(data);
    let _ = primitive::decode_string(data);
    let _ = primitive::decode_i64(data);

    if data.len() >= 4 {
        let _ = primitive::verify_crc32(data, data.len() - 4);
    }
});
