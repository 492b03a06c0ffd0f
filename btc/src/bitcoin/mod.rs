//! The Bitcoin data structures: varints, hashes, scripts and transactions, plus the network
//! parameters used when exporting keys and addresses.

mod encoding;
mod hash;
mod hash160;
mod params;
mod script;
mod tx;
mod var_int;

#[cfg(test)]
mod var_int_edge_tests;

pub use self::encoding::Encodable;
pub use self::hash::Hash;
pub use self::hash160::Hash160;
pub use self::params::Network;
pub use self::script::Script;
pub use self::tx::{Outpoint, Tx, TxHash, TxInput, TxOutput};
pub use self::var_int::{
    varint_decode, varint_decode_slice, varint_encode, varint_encode_wide, varint_size,
};
pub use hex::{FromHex, ToHex};
