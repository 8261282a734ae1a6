//! secp256k1 domain parameters

use crate::ecc::field::FieldElement;
use crate::ecc::point::Point;
use crate::ecc::scalar::ScalarMultiplier;
use crate::error::EccResult;
use num_bigint::BigUint;
use std::sync::OnceLock;
use tracing::debug;

/// Field prime `p = 2^256 - 2^32 - 977`
#[rustfmt::skip]
const P_BYTES: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xfc, 0x2f,
];

/// Group order `n`
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

/// Curve coefficient `b` in `y^2 = x^3 + b`
const B: u64 = 7;

static SECP256K1: OnceLock<Curve> = OnceLock::new();

/// Immutable curve parameters together with the generator's doubling table
#[derive(Debug)]
pub struct Curve {
    p: BigUint,
    n: BigUint,
    g: Point,
    generator: ScalarMultiplier,
}

impl Curve {
    /// The process-wide secp256k1 instance, built on first use
    pub fn secp256k1() -> EccResult<&'static Curve> {
        if let Some(curve) = SECP256K1.get() {
            return Ok(curve);
        }

        let curve = Self::build_secp256k1()?;
        Ok(SECP256K1.get_or_init(|| curve))
    }

    /// Build a fresh secp256k1 instance, including its generator table
    pub fn build_secp256k1() -> EccResult<Self> {
        let p = BigUint::from_bytes_be(&P_BYTES);
        let n = BigUint::from_bytes_be(&N_BYTES);
        let g = Point::new(
            FieldElement::from_bytes_be(&GX_BYTES, &p)?,
            FieldElement::from_bytes_be(&GY_BYTES, &p)?,
        )?;

        debug!("building secp256k1 generator doubling table");
        let generator = ScalarMultiplier::new(g.clone(), n.clone())?;

        Ok(Self { p, n, g, generator })
    }

    /// Field prime
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Group order
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Generator point
    pub fn g(&self) -> &Point {
        &self.g
    }

    /// Precomputed multiplier for the generator
    pub fn generator(&self) -> &ScalarMultiplier {
        &self.generator
    }

    /// Field element in this curve's base field
    pub fn field_element(&self, value: BigUint) -> EccResult<FieldElement> {
        FieldElement::new(value, &self.p)
    }

    /// `k * G` using the shared generator table
    pub fn multiply_generator(&self, k: &BigUint) -> EccResult<Point> {
        self.generator.multiply(k)
    }

    /// `k * base` for an arbitrary base; builds a one-off table
    pub fn multiply(&self, base: &Point, k: &BigUint) -> EccResult<Point> {
        if *base == self.g {
            return self.multiply_generator(k);
        }
        ScalarMultiplier::new(base.clone(), self.n.clone())?.multiply(k)
    }

    /// Check `1 <= k < n`
    pub fn validate_scalar(&self, k: &BigUint) -> EccResult<()> {
        self.generator.validate_scalar(k)
    }

    /// Whether `point` satisfies `y^2 = x^3 + 7` in this field
    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Finite { x, y } => {
                if x.modulus() != &self.p || y.modulus() != &self.p {
                    return false;
                }
                let lhs = y.pow(&BigUint::from(2u32));
                let rhs = x.pow(&BigUint::from(3u32)).value() + B;
                *lhs.value() == rhs % &self.p
            }
        }
    }
}
