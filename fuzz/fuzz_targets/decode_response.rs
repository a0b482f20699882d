#![no_main]

use ipp_codec::MessageDecoder;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let _ = MessageDecoder::new(Cursor::new(data)).decode_response();
});
