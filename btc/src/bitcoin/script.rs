use crate::bitcoin::{varint_decode, varint_encode, varint_size, Encodable};
use crate::Error;
use bytes::{Buf, BufMut, Bytes};
use hex::{FromHex, ToHex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A Script represents a Bitcoin Script.
///
/// Scripts are opaque byte sequences here, they are neither parsed nor executed. On the wire a
/// script is prefixed with its length as a varint.
#[derive(PartialEq, Eq, Hash, Clone, Default)]
pub struct Script {
    pub raw: Bytes,
}

impl Script {
    pub fn new(raw: impl Into<Bytes>) -> Script {
        Script { raw: raw.into() }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl Encodable for Script {
    fn from_binary(buffer: &mut dyn Buf) -> crate::Result<Self>
    where
        Self: Sized,
    {
        let len = varint_decode(buffer)?;
        if (buffer.remaining() as u64) < len {
            return Err(Error::TruncatedInput);
        }
        Ok(Script {
            raw: buffer.copy_to_bytes(len as usize),
        })
    }

    fn to_binary(&self, buffer: &mut dyn BufMut) -> crate::Result<()> {
        varint_encode(buffer, self.raw.len() as u64)?;
        buffer.put_slice(&self.raw);
        Ok(())
    }

    fn encoded_size(&self) -> u64 {
        let len = self.raw.len() as u64;
        varint_size(len) + len
    }
}

impl FromHex for Script {
    type Error = Error;

    /// Decode the script bytes, without the length prefix.
    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let raw = hex::decode(hex)?;
        Ok(Script { raw: Bytes::from(raw) })
    }
}

impl ToHex for Script {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.raw.encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.raw.encode_hex_upper()
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", self.encode_hex::<String>())
    }
}

impl Serialize for Script {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.encode_hex::<String>().as_ref())
    }
}

impl<'de> Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
