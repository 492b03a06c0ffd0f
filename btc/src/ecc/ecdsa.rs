use crate::bitcoin::{Hash, Network};
use crate::ecc::secp256k1::{scalar, to_32_bytes, N};
use crate::ecc::S256Point;
use crate::{Error, Result};
use log::warn;
use num::{BigUint, Zero};
use rand::RngCore;
use ring::hmac;
use std::fmt;

/// Signing gives up after this many consecutive nonces produce a zero r or s.
const MAX_SIGNING_ATTEMPTS: usize = 16;

/// Interpret the double SHA256 of a message as a big-endian integer, the `z` that is signed.
pub fn message_hash(message: &[u8]) -> BigUint {
    BigUint::from_bytes_be(&Hash::sha256d(message).raw)
}

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    let mut ctx = hmac::Context::with_key(&key);
    for part in parts {
        ctx.update(part);
    }
    let mut result = [0u8; 32];
    result.copy_from_slice(ctx.sign().as_ref());
    result
}

/// Deterministic nonces following RFC6979 with HMAC-SHA256.
///
/// The generator yields an endless sequence of candidates in `1..n`. The first one is the
/// nonce for signing, the following ones are only needed if a candidate produces an unusable
/// signature.
pub struct NonceGenerator {
    k: [u8; 32],
    v: [u8; 32],
    started: bool,
}

impl NonceGenerator {
    pub fn new(secret: &BigUint, z: &BigUint) -> NonceGenerator {
        let z_bytes = to_32_bytes(&(z % &*N));
        let secret_bytes = to_32_bytes(secret);
        let k = [0u8; 32];
        let v = [1u8; 32];
        let k = hmac_sha256(&k, &[&v[..], &[0x00][..], &secret_bytes[..], &z_bytes[..]]);
        let v = hmac_sha256(&k, &[&v[..]]);
        let k = hmac_sha256(&k, &[&v[..], &[0x01][..], &secret_bytes[..], &z_bytes[..]]);
        let v = hmac_sha256(&k, &[&v[..]]);
        NonceGenerator {
            k,
            v,
            started: false,
        }
    }

    /// The next candidate nonce.
    pub fn next_nonce(&mut self) -> BigUint {
        loop {
            if self.started {
                self.k = hmac_sha256(&self.k, &[&self.v[..], &[0x00][..]]);
                self.v = hmac_sha256(&self.k, &[&self.v[..]]);
            }
            self.started = true;
            self.v = hmac_sha256(&self.k, &[&self.v[..]]);
            let candidate = BigUint::from_bytes_be(&self.v);
            if !candidate.is_zero() && candidate < *N {
                return candidate;
            }
        }
    }
}

impl Iterator for NonceGenerator {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        Some(self.next_nonce())
    }
}

/// An ECDSA signature, both r and s are in the range `1..n`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Result<Signature> {
        if r.is_zero() || s.is_zero() || r >= *N || s >= *N {
            return Err(Error::InvalidScalar);
        }
        Ok(Signature { r, s })
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Whether s is in the lower half of the range, as produced by [PrivateKey::sign].
    pub fn is_low_s(&self) -> bool {
        self.s <= (&*N >> 1)
    }

    /// The 64 byte encoding, r followed by s as 32 byte big-endian integers.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut result = [0u8; 64];
        result[..32].copy_from_slice(&to_32_bytes(&self.r));
        result[32..].copy_from_slice(&to_32_bytes(&self.s));
        result
    }

    pub fn from_compact(data: &[u8]) -> Result<Signature> {
        if data.len() != 64 {
            let msg = format!("compact signature must be 64 bytes, got {}", data.len());
            return Err(Error::BadData(msg));
        }
        Signature::new(
            BigUint::from_bytes_be(&data[..32]),
            BigUint::from_bytes_be(&data[32..]),
        )
    }

    /// The DER encoding, `0x30 len 0x02 len(r) r 0x02 len(s) s`.
    pub fn to_der(&self) -> Vec<u8> {
        let r = der_integer(&self.r);
        let s = der_integer(&self.s);
        let mut result = Vec::with_capacity(6 + r.len() + s.len());
        result.push(0x30);
        result.push((4 + r.len() + s.len()) as u8);
        result.push(0x02);
        result.push(r.len() as u8);
        result.extend_from_slice(&r);
        result.push(0x02);
        result.push(s.len() as u8);
        result.extend_from_slice(&s);
        result
    }

    /// Decode a strict DER signature.
    pub fn from_der(data: &[u8]) -> Result<Signature> {
        if data.len() < 8 || data[0] != 0x30 {
            return Err(Error::BadData("not a DER sequence".to_string()));
        }
        if data[1] as usize != data.len() - 2 {
            return Err(Error::BadData("DER length mismatch".to_string()));
        }
        let (r, rest) = read_der_integer(&data[2..])?;
        let (s, rest) = read_der_integer(rest)?;
        if !rest.is_empty() {
            return Err(Error::BadData("trailing bytes in DER signature".to_string()));
        }
        Signature::new(r, s)
    }
}

// minimal big-endian bytes with a leading zero if the high bit is set
fn der_integer(value: &BigUint) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    if bytes[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(bytes.len() + 1);
        padded.push(0);
        padded.extend_from_slice(&bytes);
        padded
    } else {
        bytes
    }
}

fn read_der_integer(data: &[u8]) -> Result<(BigUint, &[u8])> {
    if data.len() < 2 || data[0] != 0x02 {
        return Err(Error::BadData("expected DER integer".to_string()));
    }
    let len = data[1] as usize;
    if len == 0 || len > 33 || data.len() < 2 + len {
        return Err(Error::BadData("bad DER integer length".to_string()));
    }
    let bytes = &data[2..2 + len];
    if bytes[0] & 0x80 != 0 {
        return Err(Error::BadData("negative DER integer".to_string()));
    }
    if len > 1 && bytes[0] == 0 && bytes[1] & 0x80 == 0 {
        return Err(Error::BadData("non-minimal DER integer".to_string()));
    }
    Ok((BigUint::from_bytes_be(bytes), &data[2 + len..]))
}

/// A secp256k1 private key together with its public point.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: BigUint,
    point: S256Point,
}

impl PrivateKey {
    pub const SIZE: usize = 32;

    /// Create a private key, the secret must be in the range `1..n`.
    pub fn new(secret: BigUint) -> Result<PrivateKey> {
        if secret.is_zero() || secret >= *N {
            return Err(Error::InvalidScalar);
        }
        let point = S256Point::generator().multiply(&secret)?;
        Ok(PrivateKey { secret, point })
    }

    /// Generate a new private key from the thread-local random number generator.
    pub fn generate() -> Result<PrivateKey> {
        let mut rng = rand::thread_rng();
        loop {
            let mut bytes = [0u8; Self::SIZE];
            rng.fill_bytes(&mut bytes);
            let secret = BigUint::from_bytes_be(&bytes);
            // values outside 1..n are vanishingly rare
            if !secret.is_zero() && secret < *N {
                return PrivateKey::new(secret);
            }
        }
    }

    /// Read a private key from its 32 byte big-endian encoding.
    pub fn from_bytes(data: &[u8]) -> Result<PrivateKey> {
        if data.len() != Self::SIZE {
            let msg = format!("private key must be 32 bytes, got {}", data.len());
            return Err(Error::BadArgument(msg));
        }
        PrivateKey::new(BigUint::from_bytes_be(data))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        to_32_bytes(&self.secret)
    }

    pub fn secret(&self) -> &BigUint {
        &self.secret
    }

    pub fn public_key(&self) -> &S256Point {
        &self.point
    }

    /// The nonces used to sign `z`.
    pub fn nonces(&self, z: &BigUint) -> NonceGenerator {
        NonceGenerator::new(&self.secret, z)
    }

    /// The RFC6979 nonce used to sign `z`.
    pub fn deterministic_k(&self, z: &BigUint) -> BigUint {
        self.nonces(z).next_nonce()
    }

    /// Sign the message hash `z`, producing a low-s signature.
    pub fn sign(&self, z: &BigUint) -> Result<Signature> {
        let half_n = &*N >> 1;
        let mut nonces = self.nonces(z);
        for _ in 0..MAX_SIGNING_ATTEMPTS {
            let k = nonces.next_nonce();
            let r = match S256Point::generator().multiply(&k)?.x() {
                Some(x) => x % &*N,
                None => BigUint::zero(),
            };
            if r.is_zero() {
                warn!("nonce produced r = 0, deriving the next nonce");
                continue;
            }
            // s = (z + r * secret) / k
            let k_inv = scalar(&k).inverse()?;
            let s = scalar(z)
                .add(&scalar(&r).mul(&scalar(&self.secret))?)?
                .mul(&k_inv)?;
            if s.is_zero() {
                warn!("nonce produced s = 0, deriving the next nonce");
                continue;
            }
            let s = if *s.num() > half_n {
                &*N - s.num()
            } else {
                s.num().clone()
            };
            return Signature::new(r, s);
        }
        Err(Error::InvalidScalar)
    }

    /// Sign the double SHA256 of the message.
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature> {
        self.sign(&message_hash(message))
    }

    /// The payload of the WIF encoding: the network prefix, the secret and a trailing `0x01`
    /// if the key is used with compressed public keys. The Base58Check encoding of this
    /// payload is the WIF string.
    pub fn wif_payload(&self, compressed: bool, network: Network) -> Vec<u8> {
        let mut payload = Vec::with_capacity(34);
        payload.push(network.private_key_prefix());
        payload.extend_from_slice(&self.to_bytes());
        if compressed {
            payload.push(0x01);
        }
        payload
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey({:?})", self.point)
    }
}

impl S256Point {
    /// Verify a signature of the message hash `z` against this public key.
    pub fn verify(&self, z: &BigUint, sig: &Signature) -> Result<bool> {
        if self.is_infinity() {
            return Ok(false);
        }
        let s_inv = scalar(&sig.s).inverse()?;
        let u = scalar(z).mul(&s_inv)?;
        let v = scalar(&sig.r).mul(&s_inv)?;
        let total = S256Point::generator()
            .multiply(u.num())?
            .add(&self.multiply(v.num())?)?;
        match total.x() {
            Some(x) => Ok((x % &*N) == sig.r),
            None => Ok(false),
        }
    }

    /// Verify a signature of the double SHA256 of the message.
    pub fn verify_message(&self, message: &[u8], sig: &Signature) -> Result<bool> {
        self.verify(&message_hash(message), sig)
    }
}
