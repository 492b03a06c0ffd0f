use crate::ecc::FieldElement;
use crate::{Error, Result};
use num::BigUint;
use std::fmt;

/// The coordinates of a point, either an affine pair or the point at infinity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Coordinates {
    /// The additive identity of the group.
    Infinity,
    Affine { x: FieldElement, y: FieldElement },
}

/// A point on a short Weierstrass curve `y^2 = x^3 + a*x + b` over a prime field.
///
/// Construction validates that the point is on the curve. Points can only be combined with
/// points on the same curve (same `a` and `b`), otherwise [Error::CurveMismatch] is returned.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Point {
    coords: Coordinates,
    a: FieldElement,
    b: FieldElement,
}

impl Point {
    /// Create a point from affine coordinates, checking it is on the curve.
    pub fn new(
        x: FieldElement,
        y: FieldElement,
        a: FieldElement,
        b: FieldElement,
    ) -> Result<Point> {
        if x.prime() != y.prime() {
            return Err(Error::DomainMismatch);
        }
        // y^2 == x^3 + a*x + b
        let lhs = y.square();
        let rhs = x.square().mul(&x)?.add(&a.mul(&x)?)?.add(&b)?;
        if lhs != rhs {
            return Err(Error::PointNotOnCurve);
        }
        Ok(Point {
            coords: Coordinates::Affine { x, y },
            a,
            b,
        })
    }

    /// The point at infinity on the curve defined by `a` and `b`.
    pub fn infinity(a: FieldElement, b: FieldElement) -> Point {
        Point {
            coords: Coordinates::Infinity,
            a,
            b,
        }
    }

    /// Build a point without checking the curve equation. Only for results of group operations
    /// and known constants.
    pub(crate) fn affine_unchecked(
        x: FieldElement,
        y: FieldElement,
        a: FieldElement,
        b: FieldElement,
    ) -> Point {
        Point {
            coords: Coordinates::Affine { x, y },
            a,
            b,
        }
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coords
    }

    pub fn x(&self) -> Option<&FieldElement> {
        match &self.coords {
            Coordinates::Infinity => None,
            Coordinates::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&FieldElement> {
        match &self.coords {
            Coordinates::Infinity => None,
            Coordinates::Affine { y, .. } => Some(y),
        }
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self.coords, Coordinates::Infinity)
    }

    fn same_curve(&self, other: &Point) -> Result<()> {
        if self.a != other.a || self.b != other.b {
            Err(Error::CurveMismatch)
        } else {
            Ok(())
        }
    }

    fn with_coords(&self, coords: Coordinates) -> Point {
        Point {
            coords,
            a: self.a.clone(),
            b: self.b.clone(),
        }
    }

    /// The additive inverse, `(x, -y)`.
    pub fn negate(&self) -> Point {
        match &self.coords {
            Coordinates::Infinity => self.clone(),
            Coordinates::Affine { x, y } => self.with_coords(Coordinates::Affine {
                x: x.clone(),
                y: y.negate(),
            }),
        }
    }

    /// Add two points.
    pub fn add(&self, other: &Point) -> Result<Point> {
        self.same_curve(other)?;
        let (x1, y1, x2, y2) = match (&self.coords, &other.coords) {
            (Coordinates::Infinity, _) => return Ok(other.clone()),
            (_, Coordinates::Infinity) => return Ok(self.clone()),
            (Coordinates::Affine { x: x1, y: y1 }, Coordinates::Affine { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        if x1 == x2 && y1 != y2 {
            // vertical line through inverse points
            return Ok(self.with_coords(Coordinates::Infinity));
        }

        let slope = if x1 != x2 {
            // s = (y2 - y1) / (x2 - x1)
            y2.sub(y1)?.div(&x2.sub(x1)?)?
        } else {
            // tangent is vertical
            if y1.is_zero() {
                return Ok(self.with_coords(Coordinates::Infinity));
            }
            // s = (3 * x1^2 + a) / (2 * y1)
            x1.square().scale(3u32).add(&self.a)?.div(&y1.scale(2u32))?
        };

        // x3 = s^2 - x1 - x2, y3 = s * (x1 - x3) - y1
        let x3 = slope.square().sub(x1)?.sub(x2)?;
        let y3 = slope.mul(&x1.sub(&x3)?)?.sub(y1)?;
        Ok(self.with_coords(Coordinates::Affine { x: x3, y: y3 }))
    }

    /// Multiply the point by a scalar using double-and-add.
    ///
    /// The bits of `k` are processed from least to most significant, the number of iterations
    /// is the bit length of `k`.
    pub fn scalar_multiply(&self, k: &BigUint) -> Result<Point> {
        let mut current = self.clone();
        let mut result = self.with_coords(Coordinates::Infinity);
        for i in 0..k.bits() {
            if k.bit(i) {
                result = result.add(&current)?;
            }
            current = current.add(&current)?;
        }
        Ok(result)
    }

    /// Multiply the point by a scalar using exactly `width` iterations of double-and-add.
    ///
    /// Every iteration computes both the accumulated sum and the doubling, the sum is kept only
    /// when the bit is set. Bits of `k` above `width` are ignored.
    pub fn scalar_multiply_fixed(&self, k: &BigUint, width: u64) -> Result<Point> {
        let mut current = self.clone();
        let mut result = self.with_coords(Coordinates::Infinity);
        for i in 0..width {
            let sum = result.add(&current)?;
            if k.bit(i) {
                result = sum;
            }
            current = current.add(&current)?;
        }
        Ok(result)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            Coordinates::Infinity => write!(f, "Point(infinity)"),
            Coordinates::Affine { x, y } => write!(
                f,
                "Point({},{}) -> y^2 = x^3 + {}x + {}",
                x, y, self.a, self.b
            ),
        }
    }
}
