//! Elliptic curve cryptography implemented from first principles.
//!
//! [FieldElement] provides arithmetic modulo a prime, [Point] the group law of a short
//! Weierstrass curve over such a field. The [secp256k1] module fixes the Bitcoin curve
//! parameters and adds the SEC point encodings, and [PrivateKey]/[Signature] implement ECDSA
//! with RFC6979 deterministic nonces.

mod curve;
mod ecdsa;
mod field;
pub mod secp256k1;

pub use self::curve::{Coordinates, Point};
pub use self::ecdsa::{message_hash, NonceGenerator, PrivateKey, Signature};
pub use self::field::FieldElement;
pub use self::secp256k1::S256Point;
