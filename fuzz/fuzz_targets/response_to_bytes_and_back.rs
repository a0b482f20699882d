#![no_main]

use ipp_codec::message::{encode_response, MessageDecoder};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok((parsed1, _rest)) = MessageDecoder::new(Cursor::new(data)).decode_response() {
        let mut buffer = Vec::new();
        encode_response(&mut buffer, &parsed1).expect("re-encoding a decoded response cannot fail");

        let (parsed2, _rest) = MessageDecoder::new(Cursor::new(buffer)).decode_response()
            .expect("re-decoding our own output cannot fail");

        assert_eq!(parsed1, parsed2);
    }
});
