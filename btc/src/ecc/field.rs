use crate::{Error, Result};
use num::{BigInt, BigUint, Integer, One, Zero};
use std::fmt;

/// An element of the finite field of integers modulo a prime.
///
/// Elements are immutable, every operation returns a new element. Two elements can only be
/// combined if they belong to the same field, otherwise the operation fails with
/// [Error::DomainMismatch].
///
/// The modulus is assumed to be prime. This is not checked, but division, inversion and
/// exponent reduction all rely on it (Fermat's little theorem).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    num: BigUint,
    prime: BigUint,
}

impl FieldElement {
    /// Create a new field element, `num` must be in the range `0..prime`.
    pub fn new(num: BigUint, prime: BigUint) -> Result<FieldElement> {
        if prime < BigUint::from(2u32) {
            return Err(Error::BadArgument(format!("{} is not a valid field modulus", prime)));
        }
        if num >= prime {
            let msg = format!("{} is not in field range 0 to {}", num, &prime - 1u32);
            return Err(Error::BadArgument(msg));
        }
        Ok(FieldElement { num, prime })
    }

    /// Convenience constructor for small fields.
    pub fn from_u64(num: u64, prime: u64) -> Result<FieldElement> {
        FieldElement::new(BigUint::from(num), BigUint::from(prime))
    }

    /// Create an element from any integer, reducing it into the field.
    pub fn reduce(num: &BigUint, prime: &BigUint) -> FieldElement {
        FieldElement {
            num: num % prime,
            prime: prime.clone(),
        }
    }

    pub fn zero(prime: &BigUint) -> FieldElement {
        FieldElement {
            num: BigUint::zero(),
            prime: prime.clone(),
        }
    }

    pub fn one(prime: &BigUint) -> FieldElement {
        FieldElement {
            num: BigUint::one(),
            prime: prime.clone(),
        }
    }

    /// The value of the element, in the range `0..prime`.
    pub fn num(&self) -> &BigUint {
        &self.num
    }

    /// The modulus of the field.
    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_even(&self) -> bool {
        self.num.is_even()
    }

    fn same_field(&self, other: &FieldElement) -> Result<()> {
        if self.prime != other.prime {
            Err(Error::DomainMismatch)
        } else {
            Ok(())
        }
    }

    fn with_num(&self, num: BigUint) -> FieldElement {
        FieldElement {
            num,
            prime: self.prime.clone(),
        }
    }

    pub fn add(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.with_num((&self.num + &other.num) % &self.prime))
    }

    pub fn sub(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.with_num((&self.num + &self.prime - &other.num) % &self.prime))
    }

    pub fn mul(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        Ok(self.with_num((&self.num * &other.num) % &self.prime))
    }

    pub fn square(&self) -> FieldElement {
        self.with_num((&self.num * &self.num) % &self.prime)
    }

    /// Divide by another element, `a / b = a * b^(prime - 2)`.
    pub fn div(&self, other: &FieldElement) -> Result<FieldElement> {
        self.same_field(other)?;
        self.mul(&other.inverse()?)
    }

    /// The additive inverse.
    pub fn negate(&self) -> FieldElement {
        self.with_num((&self.prime - &self.num) % &self.prime)
    }

    /// Multiply by an integer coefficient, i.e. add the element to itself `coefficient` times.
    pub fn scale(&self, coefficient: impl Into<BigUint>) -> FieldElement {
        self.with_num((&self.num * coefficient.into()) % &self.prime)
    }

    /// The multiplicative inverse, `self^(prime - 2)`.
    ///
    /// The exponent here is public, so the library exponentiation is used.
    pub fn inverse(&self) -> Result<FieldElement> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let exponent = &self.prime - 2u32;
        Ok(self.with_num(self.num.modpow(&exponent, &self.prime)))
    }

    /// Raise the element to an integer power.
    ///
    /// The exponent is reduced modulo `prime - 1` first, so negative exponents are allowed and an
    /// exponent of zero yields one.
    pub fn pow(&self, exponent: impl Into<BigInt>) -> FieldElement {
        let order = BigInt::from(&self.prime - 1u32);
        let reduced = exponent.into().mod_floor(&order);
        // mod_floor with a positive modulus is never negative
        let e = reduced.to_biguint().unwrap_or_default();
        self.with_num(ladder_pow(&self.num, &e, &self.prime))
    }

    /// The square root for fields where `prime % 4 == 3`, computed as `self^((prime + 1) / 4)`.
    ///
    /// Returns `None` if the element has no square root or the field is not of that form. The
    /// other root is the negation of the returned one.
    pub fn sqrt(&self) -> Option<FieldElement> {
        if (&self.prime % 4u32) != BigUint::from(3u32) {
            return None;
        }
        let exponent = (&self.prime + 1u32) >> 2;
        let root = self.with_num(ladder_pow(&self.num, &exponent, &self.prime));
        let check = (&root.num * &root.num) % &self.prime;
        if check == self.num {
            Some(root)
        } else {
            None
        }
    }
}

/// Square-and-multiply with a fixed structure.
///
/// Iterates over the bit length of the modulus, squaring and multiplying on every step and
/// selecting the product only when the exponent bit is set.
fn ladder_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let bits = modulus.bits().max(exponent.bits());
    let mut result = BigUint::one() % modulus;
    for i in (0..bits).rev() {
        result = (&result * &result) % modulus;
        let product = (&result * base) % modulus;
        if exponent.bit(i) {
            result = product;
        }
    }
    result
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FieldElement_{:x}({:x})", self.prime, self.num)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.num)
    }
}
