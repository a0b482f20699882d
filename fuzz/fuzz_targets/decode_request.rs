#![no_main]

use ipp_codec::MessageDecoder;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

// Arbitrary bytes must never panic the decoder, only return a `DecodeError`.
fuzz_target!(|data: &[u8]| {
    let _ = MessageDecoder::new(Cursor::new(data)).decode_request();
});
