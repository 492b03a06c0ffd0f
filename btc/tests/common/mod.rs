//! Fixtures and helpers shared by the integration tests.
#![allow(dead_code)]

use base58::{FromBase58, ToBase58};
use btc_primitives::bitcoin::Hash;
use num::{BigUint, Num};

/// A segwit transaction with 5 P2WPKH inputs and 2 outputs.
pub const SEGWIT_TX_HEX: &str = "0200000000010567c888456b61170d52a77f74974c92a6075aba4a151b892f119c9916ba9f33c80100000000feffffff48153e6dc07cc74f4bffcadb422c782ff73f9d9e55291c4ae7e5f720889af87a0000000000feffffff8d1c2a870b54bf561853a16e6531c4b71e2b9f47d9733ab02db06ad62b5f23eb0000000000feffffff9d45e542db7debc57e05861dfe1a166f78c6c8530d81aaaf3dbca66764d4f0a50000000000feffffff87cd1224509703c8bbdd0a533b6bde75253d820b32d7ca3d27707100c47f9c470100000000feffffff02bc3610000000000016001461940c8869fb34571086a8988c1a972daed1af83c82c0100000000001600145d576a81f460e7a1ed254fe9bfff075ab3bc45650247304402207fcd9d1e7e4faea1a617e07247365da6578cbb2ef620b230c0342569aaa26b330220133e24aa39bd73803a2255b211c33f08540dae76e04b3cec2a2672602b3fc509012102549fa9f712caffdf63da7d077e6a26dc3d01ca275312e9f64d1d9accf949d2bc02473044022065e723455564308b50ea91d0d6fe0593fbc5f755f97c42ecedb7981b8a50709802200c7b814941d576abfc71d674f6e53b3fa58006d9dcbfeaf49c510a7d55e912ee012102549fa9f712caffdf63da7d077e6a26dc3d01ca275312e9f64d1d9accf949d2bc0247304402205f6ad17b42bf6ca4f8a3dd08160d8290f422c8f1b40f2983af612c1a2cad344e0220301439ee0df745b4ad1d752ca58dac561ab1248fb7805d66d0f736e6ef663e67012102549fa9f712caffdf63da7d077e6a26dc3d01ca275312e9f64d1d9accf949d2bc02473044022021ec3be2240ba288981cd3eba70d4ef1dd0d93071d20b067924427b58875be0d022034726ac77af04b07dda662d10c27b6478e704741dc5d09718573d76c64c6ef95012102549fa9f712caffdf63da7d077e6a26dc3d01ca275312e9f64d1d9accf949d2bc02473044022053ef8fa434c9c5ced7cf4c230ce07d3b1c4c0fbf6f61810c9c903eccdf8358e902200d9f6126ed6d4b2073ede8d8623007da7862bd1afc069043938cb422e2a34b68012102549fa9f712caffdf63da7d077e6a26dc3d01ca275312e9f64d1d9accf949d2bc791b2500";

/// A legacy transaction with one input and two outputs, one of them OP_RETURN.
pub const LEGACY_TX_HEX: &str = "01000000018a052edc7ae2136bfc0a860cdc91185ab0d7329107802f0a9c1cd0026c815f75010000006b483045022100e587ef1b4497a6694cad646cab468b6ece2fa98c7f49f9488611ca34eecebd1002205c4ea9066484bd1bffb7fdd7d84b5ae0ee6b7cdc20a8a513e41e420e0633b98841210262142850483b6728b8ecd299e4d0c8cf30ea0636f66205166814e52d73b64b4bffffffff0200000000000000000a006a075354554b2e434fb8ce3f01000000001976a91454cba8da8701174e34aac2bb31d42a88e2c302d088ac00000000";

pub fn big(hex: &str) -> BigUint {
    BigUint::from_str_radix(hex, 16).unwrap()
}

/// Base58Check encode a payload: append the first four bytes of its SHA256d.
pub fn base58check_encode(payload: &[u8]) -> String {
    let checksum = Hash::sha256d(payload);
    let mut v = payload.to_vec();
    v.extend_from_slice(&checksum.raw[..4]);
    v.to_base58()
}

/// Decode a Base58Check string, verifying and removing the checksum.
pub fn base58check_decode(s: &str) -> Vec<u8> {
    let decoded = s.from_base58().unwrap();
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);
    assert_eq!(checksum, &Hash::sha256d(payload).raw[..4], "bad checksum in {}", s);
    payload.to_vec()
}
