//! Affine points on a short Weierstrass curve `y^2 = x^3 + b`
//!
//! The point at infinity is an explicit variant. There is no coordinate
//! sentinel for it, so `(0, 0)` is never confused with the group identity.

use crate::ecc::field::FieldElement;
use crate::error::{EccError, EccResult};
use std::fmt;

/// A curve point in affine coordinates
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Point {
    /// The group identity
    Infinity,
    /// A point with both coordinates reduced modulo the curve prime
    Finite {
        /// Affine x coordinate
        x: FieldElement,
        /// Affine y coordinate
        y: FieldElement,
    },
}

impl Point {
    /// Create a finite point. No curve-membership check is performed here,
    /// see [`crate::ecc::Curve::contains`].
    pub fn new(x: FieldElement, y: FieldElement) -> EccResult<Self> {
        if x.modulus() != y.modulus() {
            return Err(EccError::DomainMismatch {
                reason: "point coordinates belong to different fields".to_string(),
            });
        }
        Ok(Point::Finite { x, y })
    }

    /// Whether this is the point at infinity
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    /// The x coordinate, `None` for infinity
    pub fn x(&self) -> Option<&FieldElement> {
        match self {
            Point::Infinity => None,
            Point::Finite { x, .. } => Some(x),
        }
    }

    /// The y coordinate, `None` for infinity
    pub fn y(&self) -> Option<&FieldElement> {
        match self {
            Point::Infinity => None,
            Point::Finite { y, .. } => Some(y),
        }
    }

    /// The inverse point `(x, -y)`
    pub fn negate(&self) -> Self {
        match self {
            Point::Infinity => Point::Infinity,
            Point::Finite { x, y } => Point::Finite {
                x: x.clone(),
                y: y.neg(),
            },
        }
    }

    /// Group addition, covering identity, inverse, doubling and chord cases
    pub fn add(&self, other: &Point) -> EccResult<Point> {
        let (px, py, qx, qy) = match (self, other) {
            (Point::Infinity, _) => return Ok(other.clone()),
            (_, Point::Infinity) => return Ok(self.clone()),
            (Point::Finite { x: px, y: py }, Point::Finite { x: qx, y: qy }) => (px, py, qx, qy),
        };

        if px == qx && *py == qy.neg() {
            return Ok(Point::Infinity);
        }

        let lambda = if px == qx && py == qy {
            if py.is_zero() {
                return Err(EccError::InvalidPoint {
                    reason: "tangent is vertical at y = 0".to_string(),
                });
            }
            let numerator = px.mul(px)?.scale(3);
            numerator.div(&py.scale(2))?
        } else {
            if px == qx {
                return Err(EccError::InvalidPoint {
                    reason: "chord through points with equal x is vertical".to_string(),
                });
            }
            qy.sub(py)?.div(&qx.sub(px)?)?
        };

        let x3 = lambda.mul(&lambda)?.sub(px)?.sub(qx)?;
        let y3 = lambda.mul(&px.sub(&x3)?)?.sub(py)?;
        Point::new(x3, y3)
    }

    /// Point doubling, `2P`
    pub fn double(&self) -> EccResult<Point> {
        self.add(self)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "Point::Infinity"),
            Point::Finite { x, y } => write!(f, "Point({}, {})", x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn point(x: u64, y: u64, p: u64) -> Point {
        let modulus = BigUint::from(p);
        Point::new(
            FieldElement::from_u64(x, &modulus).unwrap(),
            FieldElement::from_u64(y, &modulus).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_identity_law() {
        let a = point(1, 28, 97);
        assert_eq!(a.add(&Point::Infinity).unwrap(), a);
        assert_eq!(Point::Infinity.add(&a).unwrap(), a);
        assert_eq!(Point::Infinity.add(&Point::Infinity).unwrap(), Point::Infinity);
    }

    #[test]
    fn test_chord_and_tangent() {
        let a = point(1, 28, 97);
        let b = point(5, 36, 97);
        assert_eq!(a.add(&b).unwrap(), point(95, 75, 97));
        assert_eq!(a.double().unwrap(), point(68, 81, 97));
    }

    #[test]
    fn test_commutative_and_associative() {
        let a = point(1, 28, 97);
        let b = point(5, 36, 97);
        let c = point(12, 38, 97);
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());

        let left = a.add(&b).unwrap().add(&c).unwrap();
        let right = a.add(&b.add(&c).unwrap()).unwrap();
        assert_eq!(left, right);
        assert_eq!(left, point(44, 5, 97));
    }

    #[test]
    fn test_inverse_gives_infinity() {
        let a = point(1, 28, 97);
        assert_eq!(a.add(&a.negate()).unwrap(), Point::Infinity);
        assert_eq!(point(1, 69, 97), a.negate());
    }

    #[test]
    fn test_doubling_two_torsion_point() {
        // (93, 0) lies on y^2 = x^3 + 7 over F_101
        let t = point(93, 0, 101);
        assert_eq!(t.double().unwrap(), Point::Infinity);
        assert_eq!(t.negate(), t);
    }

    #[test]
    fn test_zero_coordinates_are_not_infinity() {
        let origin = point(0, 0, 97);
        assert!(!origin.is_infinity());
        assert_ne!(origin, Point::Infinity);
    }

    #[test]
    fn test_mixed_moduli_rejected() {
        let x = FieldElement::from_u64(1, &BigUint::from(97u32)).unwrap();
        let y = FieldElement::from_u64(1, &BigUint::from(101u32)).unwrap();
        assert!(matches!(Point::new(x, y), Err(EccError::DomainMismatch { .. })));

        let a = point(1, 28, 97);
        let b = point(93, 0, 101);
        assert!(matches!(a.add(&b), Err(EccError::DomainMismatch { .. })));
    }
}
