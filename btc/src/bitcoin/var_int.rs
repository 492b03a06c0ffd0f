use crate::Error;
use bytes::{Buf, BufMut};

/// The size of the value encoded as a varint.
pub fn varint_size(value: u64) -> u64 {
    match value {
        0..=252 => 1,
        253..=0xffff => 3,
        0x10000..=0xffffffff => 5,
        _ => 9,
    }
}

/// Read a varint from the buffer.
///
/// Fails with [Error::TruncatedInput] if the buffer is empty or ends inside the varint.
pub fn varint_decode(buffer: &mut dyn Buf) -> crate::Result<u64> {
    let n0 = buffer.try_get_u8()?;
    let v = match n0 {
        0xff => buffer.try_get_u64_le()?,
        0xfe => buffer.try_get_u32_le()? as u64,
        0xfd => buffer.try_get_u16_le()? as u64,
        _ => n0 as u64,
    };
    Ok(v)
}

/// Decode a varint at the start of a slice, returning the value and the number of bytes consumed.
pub fn varint_decode_slice(data: &[u8]) -> crate::Result<(u64, usize)> {
    let mut buffer = data;
    let value = varint_decode(&mut buffer)?;
    Ok((value, data.len() - buffer.len()))
}

/// Write a varint to the buffer.
pub fn varint_encode(buffer: &mut dyn BufMut, value: u64) -> crate::Result<()> {
    match value {
        0..=252 => buffer.put_u8(value as u8),
        253..=0xffff => {
            buffer.put_u8(0xfd);
            buffer.put_u16_le(value as u16);
        }
        0x10000..=0xffffffff => {
            buffer.put_u8(0xfe);
            buffer.put_u32_le(value as u32);
        }
        _ => {
            buffer.put_u8(0xff);
            buffer.put_u64_le(value);
        }
    };
    Ok(())
}

/// Write a varint from a value that may exceed the 64-bit range, which fails with
/// [Error::IntegerTooLarge].
pub fn varint_encode_wide(buffer: &mut dyn BufMut, value: u128) -> crate::Result<()> {
    let value = u64::try_from(value).map_err(|_| Error::IntegerTooLarge(value))?;
    varint_encode(buffer, value)
}
