//! Bitcoin primitives for Rust.
//!
//! A from-scratch implementation of secp256k1 elliptic curve arithmetic and ECDSA signing with
//! deterministic nonces, together with the binary codec for Bitcoin transactions (legacy and
//! segwit). Scripts are treated as opaque byte sequences, there is no script execution,
//! consensus checking, networking or persistence.

/// Contains the Bitcoin data structures: varints, hashes, scripts and transactions.
pub mod bitcoin;

/// Contains finite field and elliptic curve arithmetic, and ECDSA over secp256k1.
pub mod ecc;

mod result;
pub use result::{Error, Result};
