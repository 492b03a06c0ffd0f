//! WIF and P2PKH address payloads checked against known Base58Check strings.

mod common;

use btc_primitives::bitcoin::Network;
use btc_primitives::ecc::{PrivateKey, S256Point};
use common::{base58check_decode, base58check_encode, big};
use num::{BigUint, One};

fn pow2(e: u32) -> BigUint {
    BigUint::one() << e
}

#[test]
fn wif_known_values() {
    let cases = [
        (
            pow2(256) - pow2(199),
            true,
            Network::Main,
            "L5oLkpV3aqBJ4BgssVAsax1iRa77G5CVYnv9adQ6Z87te7TyUdSC",
        ),
        (
            pow2(256) - pow2(201),
            false,
            Network::Test,
            "93XfLeifX7Jx7n7ELGMAf1SUR6f9kgQs8Xke8WStMwUtrDucMzn",
        ),
        (
            big("0dba685b4511dbd3d368e5c4358a1277de9486447af7b3604a69b8d9d8b7889d"),
            false,
            Network::Main,
            "5HvLFPDVgFZRK9cd4C5jcWki5Skz6fmKqi1GQJf5ZoMofid2Dty",
        ),
        (
            big("1cca23de92fd1862fb5b76e5f4f50eb082165e5191e116c18ed1a6b24be6a53f"),
            true,
            Network::Test,
            "cNYfWuhDpbNM1JWc3c6JTrtrFVxU4AGhUKgw5f93NP2QaBqmxKkg",
        ),
    ];
    for (secret, compressed, network, wif) in cases {
        let key = PrivateKey::new(secret).unwrap();
        let payload = key.wif_payload(compressed, network);
        assert_eq!(payload, base58check_decode(wif));
        assert_eq!(base58check_encode(&payload), wif);
    }
}

#[test]
fn wif_key_round_trips_through_compressed_point() {
    let key = PrivateKey::new(pow2(256) - pow2(199)).unwrap();
    let sec = key.public_key().sec_compressed().unwrap();
    assert_eq!(
        hex::encode(sec),
        "02dea4ffc00dc71a42744f556bfcaf53c52969a03db7adf33f02caf5b51bc216bc"
    );
    assert_eq!(&S256Point::from_sec(&sec).unwrap(), key.public_key());

    // the secret can be recovered from the payload
    let payload = base58check_decode("L5oLkpV3aqBJ4BgssVAsax1iRa77G5CVYnv9adQ6Z87te7TyUdSC");
    let restored = PrivateKey::from_bytes(&payload[1..33]).unwrap();
    assert_eq!(restored.secret(), key.secret());
}

#[test]
fn p2pkh_addresses() {
    let cases = [
        (
            BigUint::from(5002u32),
            false,
            Network::Test,
            "mmTPbXQFxboEtNRkwfh6K51jvdtHLxGeMA",
        ),
        (
            BigUint::from(2020u32).pow(5),
            true,
            Network::Test,
            "mopVkxp8UhXqRYbCYJsbeE1h1fiF64jcoH",
        ),
        (
            big("12345deadbeef"),
            true,
            Network::Main,
            "1F1Pn2y6pDb68E5nYJJeba4TLg2U7B6KF1",
        ),
    ];
    for (secret, compressed, network, address) in cases {
        let key = PrivateKey::new(secret).unwrap();
        let payload = key.public_key().address_payload(compressed, network).unwrap();
        assert_eq!(base58check_encode(&payload), address);
    }
}
