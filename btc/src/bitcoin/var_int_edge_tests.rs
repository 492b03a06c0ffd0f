//! Edge case tests for VarInt encoding/decoding
//!
//! Boundary values, short buffers and buffers holding several values.

#[cfg(test)]
mod tests {
    use crate::bitcoin::var_int::*;
    use crate::Error;
    use bytes::{Buf, BufMut, BytesMut};
    use std::io::Cursor;

    #[test]
    fn test_boundary_values() {
        let boundaries = vec![
            (0u64, vec![0x00]),
            (252u64, vec![0xFC]),
            (253u64, vec![0xFD, 0xFD, 0x00]),
            (0xFFFFu64, vec![0xFD, 0xFF, 0xFF]),
            (0x10000u64, vec![0xFE, 0x00, 0x00, 0x01, 0x00]),
            (0xFFFFFFFFu64, vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF]),
            (
                0x100000000u64,
                vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
            ),
            (u64::MAX, vec![0xFF; 9]),
        ];

        for (value, expected_bytes) in boundaries {
            assert_eq!(
                varint_size(value) as usize,
                expected_bytes.len(),
                "Size mismatch for value {}",
                value
            );

            let mut buf = BytesMut::new();
            varint_encode(&mut buf, value).unwrap();
            assert_eq!(buf.to_vec(), expected_bytes, "Encoding mismatch for value {}", value);

            let mut cursor = Cursor::new(&expected_bytes);
            let decoded = varint_decode(&mut cursor).unwrap();
            assert_eq!(decoded, value, "Decoding mismatch for value {}", value);
            assert!(!cursor.has_remaining());
        }
    }

    #[test]
    fn test_buffer_underflow() {
        let test_cases = vec![
            vec![],
            vec![0xFD],
            vec![0xFD, 0x00],
            vec![0xFE],
            vec![0xFE, 0x00, 0x00, 0x00],
            vec![0xFF],
            vec![0xFF, 0x00, 0x00, 0x00, 0x00],
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        ];

        for data in test_cases {
            let mut cursor = Cursor::new(&data);
            assert_eq!(
                varint_decode(&mut cursor),
                Err(Error::TruncatedInput),
                "Expected error for insufficient data: {:?}",
                data
            );
        }
    }

    #[test]
    fn test_off_by_one_values() {
        let test_values = vec![
            (251u64, 1usize),
            (252u64, 1usize),
            (253u64, 3usize),
            (254u64, 3usize),
            (0xFFFEu64, 3usize),
            (0xFFFFu64, 3usize),
            (0x10000u64, 5usize),
            (0x10001u64, 5usize),
            (0xFFFFFFFEu64, 5usize),
            (0xFFFFFFFFu64, 5usize),
            (0x100000000u64, 9usize),
            (0x100000001u64, 9usize),
        ];

        for (value, expected_size) in test_values {
            let mut buf = BytesMut::new();
            varint_encode(&mut buf, value).unwrap();
            assert_eq!(buf.len(), expected_size, "Encoded size mismatch for value {}", value);
            let (decoded, consumed) = varint_decode_slice(&buf).unwrap();
            assert_eq!(decoded, value);
            assert_eq!(consumed, expected_size);
        }
    }

    #[test]
    fn test_multiple_varints_in_buffer() {
        let values = vec![0u64, 252, 253, 0xFFFF, 0x10000, 0xFFFFFFFF, 0x100000000, u64::MAX];

        let mut buf = BytesMut::new();
        for value in &values {
            varint_encode(&mut buf, *value).unwrap();
        }

        let mut decoded_values = Vec::new();
        while buf.has_remaining() {
            decoded_values.push(varint_decode(&mut buf).unwrap());
        }
        assert_eq!(values, decoded_values);
    }

    #[test]
    fn test_endianness() {
        let test_cases = vec![
            (0x0102u64, vec![0xFD, 0x02, 0x01]),
            (0x01020304u64, vec![0xFE, 0x04, 0x03, 0x02, 0x01]),
            (
                0x0102030405060708u64,
                vec![0xFF, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01],
            ),
        ];

        for (value, expected_bytes) in test_cases {
            let mut buf = BytesMut::new();
            varint_encode(&mut buf, value).unwrap();
            assert_eq!(buf.to_vec(), expected_bytes, "Endianness test failed for 0x{:X}", value);
        }
    }

    #[test]
    fn test_non_minimal_encodings_decode() {
        // decoding accepts longer forms than necessary
        assert_eq!(varint_decode_slice(&[0xFD, 0x05, 0x00]).unwrap(), (5, 3));
        assert_eq!(varint_decode_slice(&[0xFE, 0x05, 0x00, 0x00, 0x00]).unwrap(), (5, 5));
    }

    #[test]
    fn test_empty_after_read() {
        let data = vec![0x00];
        let mut cursor = Cursor::new(&data);
        assert_eq!(varint_decode(&mut cursor).unwrap(), 0);
        assert!(!cursor.has_remaining());
        assert_eq!(varint_decode(&mut cursor), Err(Error::TruncatedInput));
    }

    #[test]
    fn test_random_round_trips() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let value = rng.gen::<u64>();
            let mut buf = BytesMut::new();
            varint_encode(&mut buf, value).unwrap();
            let mut buf_cursor = buf.clone();
            assert_eq!(varint_decode(&mut buf_cursor).unwrap(), value);
            assert_eq!(buf_cursor.remaining(), 0, "Buffer not fully consumed for {}", value);
        }
    }

    #[test]
    fn test_chained_buffer_operations() {
        let mut buf = BytesMut::new();
        buf.put_u8(0x42);
        varint_encode(&mut buf, 1000).unwrap();
        buf.put_u16_le(0x1234);
        varint_encode(&mut buf, 0xFFFFFFFF).unwrap();
        varint_encode_wide(&mut buf, u64::MAX as u128).unwrap();

        let mut cursor = buf.clone();
        assert_eq!(cursor.get_u8(), 0x42);
        assert_eq!(varint_decode(&mut cursor).unwrap(), 1000);
        assert_eq!(cursor.get_u16_le(), 0x1234);
        assert_eq!(varint_decode(&mut cursor).unwrap(), 0xFFFFFFFF);
        assert_eq!(varint_decode(&mut cursor).unwrap(), u64::MAX);
        assert_eq!(cursor.remaining(), 0);
    }
}
