#![no_main]

use btc_primitives::bitcoin::{varint_decode_slice, varint_encode, varint_size};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = varint_decode_slice(data) {
        assert!(consumed <= data.len());
        assert!(consumed as u64 >= varint_size(value));

        let mut encoded = Vec::new();
        varint_encode(&mut encoded, value).unwrap();
        assert_eq!(varint_size(value) as usize, encoded.len());
        assert_eq!(varint_decode_slice(&encoded).unwrap(), (value, encoded.len()));
    }
});
