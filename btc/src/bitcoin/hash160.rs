use hex::{FromHex, ToHex};
use ring::digest::{digest, SHA256};
use ripemd::{Digest, Ripemd160};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 160-bit hash, specifically the RIPEMD160(SHA256) hash.
///
/// This is the hash of a SEC encoded public key that is used for Bitcoin addresses. Unlike
/// [Hash](crate::bitcoin::Hash), the hex form is in natural byte order, matching how the value
/// appears inside scripts.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash160 {
    pub hash: [u8; Self::SIZE],
}

impl Hash160 {
    pub const SIZE: usize = 20;
    pub const HEX_SIZE: usize = Hash160::SIZE * 2;

    /// Generate the hash from the given data.
    pub fn generate(data: &[u8]) -> Hash160 {
        let sha256 = digest(&SHA256, data);
        let ripemd = Ripemd160::digest(sha256.as_ref());
        let mut hash = [0; Self::SIZE];
        hash.copy_from_slice(ripemd.as_ref());
        Hash160 { hash }
    }
}

impl FromHex for Hash160 {
    type Error = crate::Error;

    fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, Self::Error> {
        let hex = hex.as_ref();
        if hex.len() != Self::HEX_SIZE {
            let msg = format!(
                "Length of hex encoded hash160 must be {}. Len is {:}.",
                Self::HEX_SIZE,
                hex.len()
            );
            return Err(crate::Error::BadArgument(msg));
        }
        let mut hash = [0u8; Self::SIZE];
        hex::decode_to_slice(hex, &mut hash)?;
        Ok(Self { hash })
    }
}

impl ToHex for Hash160 {
    fn encode_hex<T: FromIterator<char>>(&self) -> T {
        self.hash.encode_hex()
    }

    fn encode_hex_upper<T: FromIterator<char>>(&self) -> T {
        self.hash.encode_hex_upper()
    }
}

impl From<Hash160> for [u8; 20] {
    fn from(value: Hash160) -> Self {
        value.hash
    }
}

impl fmt::Display for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode_hex::<String>())
    }
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash160({})", self.encode_hex::<String>())
    }
}

impl Serialize for Hash160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.encode_hex::<String>().as_ref())
    }
}

impl<'de> Deserialize<'de> for Hash160 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
