#![no_main]

use btc_primitives::bitcoin::{Encodable, Tx};
use bytes::Buf;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut buffer = data;
    if let Ok(tx) = Tx::from_binary(&mut buffer) {
        assert_eq!(buffer.remaining() + tx.size(), data.len());
        assert!(tx.stripped_size() <= tx.size());
        assert!(tx.vsize() <= tx.size());

        // re-encoding the decoded fields reproduces the input, unless it used non-minimal varints
        let rebuilt = Tx::new(
            tx.version(),
            tx.inputs().to_vec(),
            tx.outputs().to_vec(),
            tx.lock_time(),
        );
        if let Ok(rebuilt) = rebuilt {
            if rebuilt.is_segwit() == tx.is_segwit() && rebuilt.size() == tx.size() {
                assert_eq!(rebuilt.raw(), tx.raw());
                assert_eq!(rebuilt.txid(), tx.txid());
            }
        }
        let _ = tx.wtxid();
    }
});
