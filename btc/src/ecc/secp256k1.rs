//! The secp256k1 curve as used by Bitcoin: `y^2 = x^3 + 7` over the field of integers modulo
//! `p = 2^256 - 2^32 - 977`, with generator `G` and group order `n`.

use crate::bitcoin::{Hash160, Network};
use crate::ecc::{Coordinates, FieldElement, Point};
use crate::{Error, Result};
use log::trace;
use num::{BigUint, Integer};
use std::fmt;
use std::sync::LazyLock;

#[rustfmt::skip]
const P_BYTES: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

#[rustfmt::skip]
const N_BYTES: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

#[rustfmt::skip]
const GX_BYTES: [u8; 32] = [
    0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac,
    0x55, 0xa0, 0x62, 0x95, 0xce, 0x87, 0x0b, 0x07,
    0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9,
    0x59, 0xf2, 0x81, 0x5b, 0x16, 0xf8, 0x17, 0x98,
];

#[rustfmt::skip]
const GY_BYTES: [u8; 32] = [
    0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65,
    0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11, 0x08, 0xa8,
    0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19,
    0x9c, 0x47, 0xd0, 0x8f, 0xfb, 0x10, 0xd4, 0xb8,
];

/// Bit width of scalars, multiplication always runs this many iterations.
const SCALAR_BITS: u64 = 256;

/// The field modulus `p`.
pub static P: LazyLock<BigUint> = LazyLock::new(|| BigUint::from_bytes_be(&P_BYTES));

/// The order `n` of the group generated by `G`.
pub static N: LazyLock<BigUint> = LazyLock::new(|| BigUint::from_bytes_be(&N_BYTES));

static CURVE_A: LazyLock<FieldElement> = LazyLock::new(|| FieldElement::zero(&P));

static CURVE_B: LazyLock<FieldElement> =
    LazyLock::new(|| FieldElement::reduce(&BigUint::from(7u32), &P));

static G: LazyLock<S256Point> = LazyLock::new(|| S256Point {
    inner: Point::affine_unchecked(
        FieldElement::reduce(&BigUint::from_bytes_be(&GX_BYTES), &P),
        FieldElement::reduce(&BigUint::from_bytes_be(&GY_BYTES), &P),
        CURVE_A.clone(),
        CURVE_B.clone(),
    ),
});

/// Reduce an integer modulo `n`, giving an element of the scalar field.
pub fn scalar(value: &BigUint) -> FieldElement {
    FieldElement::reduce(value, &N)
}

/// Encode an integer smaller than 2^256 as 32 big-endian bytes.
pub(crate) fn to_32_bytes(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let start = bytes.len().saturating_sub(32);
    let bytes = &bytes[start..];
    let mut result = [0u8; 32];
    result[32 - bytes.len()..].copy_from_slice(bytes);
    result
}

/// A point on the secp256k1 curve.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct S256Point {
    inner: Point,
}

impl S256Point {
    pub const COMPRESSED_SIZE: usize = 33;
    pub const UNCOMPRESSED_SIZE: usize = 65;

    /// Create a point from its affine coordinates.
    pub fn new(x: BigUint, y: BigUint) -> Result<S256Point> {
        let x = FieldElement::new(x, P.clone())?;
        let y = FieldElement::new(y, P.clone())?;
        Ok(S256Point {
            inner: Point::new(x, y, CURVE_A.clone(), CURVE_B.clone())?,
        })
    }

    pub fn infinity() -> S256Point {
        S256Point {
            inner: Point::infinity(CURVE_A.clone(), CURVE_B.clone()),
        }
    }

    /// The generator point `G`.
    pub fn generator() -> &'static S256Point {
        &G
    }

    pub fn x(&self) -> Option<&BigUint> {
        self.inner.x().map(|x| x.num())
    }

    pub fn y(&self) -> Option<&BigUint> {
        self.inner.y().map(|y| y.num())
    }

    pub fn is_infinity(&self) -> bool {
        self.inner.is_infinity()
    }

    /// The underlying curve point.
    pub fn as_point(&self) -> &Point {
        &self.inner
    }

    pub fn add(&self, other: &S256Point) -> Result<S256Point> {
        Ok(S256Point {
            inner: self.inner.add(&other.inner)?,
        })
    }

    /// Multiply the point by a scalar.
    ///
    /// The scalar is reduced modulo `n` and the multiplication always runs 256 iterations.
    pub fn multiply(&self, k: &BigUint) -> Result<S256Point> {
        let k = k % &*N;
        Ok(S256Point {
            inner: self.inner.scalar_multiply_fixed(&k, SCALAR_BITS)?,
        })
    }

    fn affine(&self) -> Result<(&BigUint, &BigUint)> {
        match self.inner.coordinates() {
            Coordinates::Infinity => Err(Error::InvalidEncoding(
                "the point at infinity has no SEC encoding".to_string(),
            )),
            Coordinates::Affine { x, y } => Ok((x.num(), y.num())),
        }
    }

    /// The 33 byte compressed SEC encoding, `0x02` or `0x03` (parity of y) followed by x.
    pub fn sec_compressed(&self) -> Result<[u8; 33]> {
        let (x, y) = self.affine()?;
        let mut result = [0u8; 33];
        result[0] = if y.is_even() { 0x02 } else { 0x03 };
        result[1..].copy_from_slice(&to_32_bytes(x));
        Ok(result)
    }

    /// The 65 byte uncompressed SEC encoding, `0x04` followed by x and y.
    pub fn sec_uncompressed(&self) -> Result<[u8; 65]> {
        let (x, y) = self.affine()?;
        let mut result = [0u8; 65];
        result[0] = 0x04;
        result[1..33].copy_from_slice(&to_32_bytes(x));
        result[33..].copy_from_slice(&to_32_bytes(y));
        Ok(result)
    }

    pub fn to_sec(&self, compressed: bool) -> Result<Vec<u8>> {
        if compressed {
            Ok(self.sec_compressed()?.to_vec())
        } else {
            Ok(self.sec_uncompressed()?.to_vec())
        }
    }

    /// Decode a point from either SEC encoding.
    ///
    /// For the compressed form the y coordinate is recovered as the square root of `x^3 + 7`
    /// with the parity given by the prefix.
    pub fn from_sec(sec: &[u8]) -> Result<S256Point> {
        let prefix = match sec.first() {
            Some(b) => *b,
            None => return Err(Error::InvalidEncoding("empty encoding".to_string())),
        };
        trace!("decoding SEC point, prefix: 0x{:02x}, length: {}", prefix, sec.len());
        match prefix {
            0x04 => {
                check_length(sec, Self::UNCOMPRESSED_SIZE)?;
                let x = BigUint::from_bytes_be(&sec[1..33]);
                let y = BigUint::from_bytes_be(&sec[33..65]);
                if x >= *P || y >= *P {
                    return Err(Error::InvalidEncoding("coordinate exceeds field".to_string()));
                }
                S256Point::new(x, y)
            }
            0x02 | 0x03 => {
                check_length(sec, Self::COMPRESSED_SIZE)?;
                let x = BigUint::from_bytes_be(&sec[1..]);
                if x >= *P {
                    return Err(Error::InvalidEncoding("coordinate exceeds field".to_string()));
                }
                let x = FieldElement::reduce(&x, &P);
                // y^2 = x^3 + 7
                let alpha = x.square().mul(&x)?.add(&CURVE_B)?;
                let beta = alpha.sqrt().ok_or_else(|| {
                    Error::InvalidEncoding("x coordinate is not on the curve".to_string())
                })?;
                let want_even = prefix == 0x02;
                let y = if beta.is_even() == want_even {
                    beta
                } else {
                    beta.negate()
                };
                Ok(S256Point {
                    inner: Point::affine_unchecked(x, y, CURVE_A.clone(), CURVE_B.clone()),
                })
            }
            other => Err(Error::InvalidEncoding(format!("unknown prefix 0x{:02x}", other))),
        }
    }

    /// RIPEMD160(SHA256()) of the SEC encoding.
    pub fn hash160(&self, compressed: bool) -> Result<Hash160> {
        Ok(Hash160::generate(&self.to_sec(compressed)?))
    }

    /// The network prefix followed by the hash160, ready for Base58Check encoding as a P2PKH
    /// address.
    pub fn address_payload(&self, compressed: bool, network: Network) -> Result<Vec<u8>> {
        let mut payload = Vec::with_capacity(1 + Hash160::SIZE);
        payload.push(network.address_prefix());
        payload.extend_from_slice(&self.hash160(compressed)?.hash);
        Ok(payload)
    }
}

fn check_length(sec: &[u8], expected: usize) -> Result<()> {
    if sec.len() != expected {
        let msg = format!("expected {} bytes, got {}", expected, sec.len());
        Err(Error::InvalidEncoding(msg))
    } else {
        Ok(())
    }
}

impl fmt::Debug for S256Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.x(), self.y()) {
            (Some(x), Some(y)) => write!(f, "S256Point({:064x}, {:064x})", x, y),
            _ => write!(f, "S256Point(infinity)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use num::{One, Zero};

    #[test]
    fn generator_is_on_curve() {
        let g = S256Point::generator();
        let rebuilt = S256Point::new(g.x().unwrap().clone(), g.y().unwrap().clone()).unwrap();
        assert_eq!(&rebuilt, g);
    }

    #[test]
    fn order_of_generator() {
        let g = S256Point::generator();
        // multiply reduces mod n, so use the generic multiplication to check n * G
        let n_g = g.as_point().scalar_multiply(&N).unwrap();
        assert!(n_g.is_infinity());
        assert!(g.multiply(&N).unwrap().is_infinity());
        assert_eq!(&g.multiply(&BigUint::one()).unwrap(), g);
    }

    #[test]
    fn known_public_keys() {
        let g = S256Point::generator();
        let cases = [
            (
                BigUint::from(5000u32),
                hex!("02ffe558e388852f0120e46af2d1b370f85854a8eb0841811ece0e3e03d282d57c").to_vec(),
            ),
            (
                BigUint::from(0xdeadbeef12345u64),
                hex!("03d90cd625ee87dd38656dd95cf79f65f60f7273b67d3096e68bd81e4f5342691f").to_vec(),
            ),
        ];
        for (secret, sec) in cases {
            let point = g.multiply(&secret).unwrap();
            assert_eq!(point.sec_compressed().unwrap().to_vec(), sec);
        }
    }

    #[test]
    fn uncompressed_encoding() {
        let point = S256Point::generator().multiply(&BigUint::from(5000u32)).unwrap();
        let expected = hex!("04ffe558e388852f0120e46af2d1b370f85854a8eb0841811ece0e3e03d282d57c315dc72890a4f10a1481c031b03b351b0dc79901ca18a00cf009dbdb157a1d10");
        assert_eq!(point.sec_uncompressed().unwrap(), expected);
        assert_eq!(S256Point::from_sec(&expected).unwrap(), point);
    }

    #[test]
    fn compressed_round_trip() {
        let g = S256Point::generator();
        let negated = S256Point {
            inner: g.as_point().negate(),
        };
        for point in [g.clone(), negated] {
            let sec = point.sec_compressed().unwrap();
            assert_eq!(S256Point::from_sec(&sec).unwrap(), point);
        }
    }

    #[test]
    fn invalid_encodings() {
        assert!(matches!(S256Point::from_sec(&[]), Err(Error::InvalidEncoding(_))));
        let mut sec = S256Point::generator().sec_compressed().unwrap();
        sec[0] = 0x05;
        assert!(matches!(S256Point::from_sec(&sec), Err(Error::InvalidEncoding(_))));
        sec[0] = 0x02;
        assert!(matches!(S256Point::from_sec(&sec[..32]), Err(Error::InvalidEncoding(_))));
        // x = 5 gives 5^3 + 7 = 132, which is not a square mod p
        let mut sec = [0u8; 33];
        sec[0] = 0x02;
        sec[32] = 5;
        assert!(matches!(S256Point::from_sec(&sec), Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn uncompressed_not_on_curve() {
        let mut sec = S256Point::generator().sec_uncompressed().unwrap();
        sec[64] ^= 1;
        assert_eq!(S256Point::from_sec(&sec), Err(Error::PointNotOnCurve));
    }

    #[test]
    fn infinity_has_no_encoding() {
        let inf = S256Point::infinity();
        assert!(matches!(inf.sec_compressed(), Err(Error::InvalidEncoding(_))));
        assert!(matches!(inf.sec_uncompressed(), Err(Error::InvalidEncoding(_))));
        assert!(S256Point::generator().multiply(&BigUint::zero()).unwrap().is_infinity());
    }

    #[test]
    fn hash160_of_generator() {
        let h = S256Point::generator().hash160(true).unwrap();
        assert_eq!(h.hash, hex!("751e76e8199196d454941c45d1b3a323f1433bd6"));
        let payload = S256Point::generator().address_payload(true, Network::Test).unwrap();
        assert_eq!(payload[0], 0x6f);
        assert_eq!(&payload[1..], &h.hash);
    }

    #[test]
    fn padding_of_small_values() {
        assert_eq!(to_32_bytes(&BigUint::zero()), [0u8; 32]);
        let mut expected = [0u8; 32];
        expected[31] = 1;
        assert_eq!(to_32_bytes(&BigUint::one()), expected);
    }
}
