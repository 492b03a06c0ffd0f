#![no_main]

use btc_primitives::ecc::S256Point;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(point) = S256Point::from_sec(data) {
        // a decoded point encodes back to the input
        let compressed = data.len() == S256Point::COMPRESSED_SIZE;
        assert_eq!(point.to_sec(compressed).unwrap(), data);
    }
});
