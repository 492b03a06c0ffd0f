use serde::{Deserialize, Serialize};

/// The network a key or address belongs to.
///
/// Only the version prefixes differ between the networks, these are prepended to the raw payloads
/// before they are Base58Check encoded.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    #[serde(alias = "mainnet")]
    Main = 0,
    #[serde(alias = "testnet")]
    Test = 1,
}

impl Network {
    /// The address prefix is used when encoding an Address.
    ///
    /// The prefix is prepended to the 160-bit hash of a public key before base-58 (with checksum)
    /// encoding the value to produce the Address.
    pub fn address_prefix(&self) -> u8 {
        match self {
            Network::Main => 0x00,
            Network::Test => 0x6f,
        }
    }

    /// The prefix prepended to a private key when it is exported in WIF.
    pub fn private_key_prefix(&self) -> u8 {
        match self {
            Network::Main => 0x80,
            Network::Test => 0xef,
        }
    }
}
