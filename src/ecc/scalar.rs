//! Double-and-add scalar multiplication over a precomputed doubling table

use crate::ecc::point::Point;
use crate::error::{EccError, EccResult};
use num_bigint::BigUint;
use num_traits::Zero;

/// Number of scalar bits covered by a doubling table
pub const SCALAR_BITS: usize = 256;

/// Multiplies one fixed base point by arbitrary scalars.
///
/// The table `B, 2B, 4B, ..., 2^255 B` is built once in [`ScalarMultiplier::new`]
/// and never mutated afterwards, so a multiplier can be shared freely between
/// threads.
#[derive(Clone, Debug)]
pub struct ScalarMultiplier {
    order: BigUint,
    powers: Vec<Point>,
}

impl ScalarMultiplier {
    /// Build the doubling table for `base`; scalars must lie in `[1, order)`
    pub fn new(base: Point, order: BigUint) -> EccResult<Self> {
        let mut powers = Vec::with_capacity(SCALAR_BITS);
        let mut current = base;
        for _ in 1..SCALAR_BITS {
            let next = current.double()?;
            powers.push(current);
            current = next;
        }
        powers.push(current);

        Ok(Self { order, powers })
    }

    /// The base point this table was built for
    pub fn base(&self) -> &Point {
        &self.powers[0]
    }

    /// The group order scalars are checked against
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// `2^i * base`
    pub fn power_of_two(&self, i: usize) -> Option<&Point> {
        self.powers.get(i)
    }

    /// Check `1 <= k < order`
    pub fn validate_scalar(&self, k: &BigUint) -> EccResult<()> {
        if k.is_zero() {
            return Err(EccError::InvalidScalar {
                reason: "scalar is zero".to_string(),
            });
        }
        if *k >= self.order || k.bits() > SCALAR_BITS as u64 {
            return Err(EccError::InvalidScalar {
                reason: "scalar is not below the group order".to_string(),
            });
        }
        Ok(())
    }

    /// Compute `k * base`, scanning `k` from the least significant bit
    pub fn multiply(&self, k: &BigUint) -> EccResult<Point> {
        self.validate_scalar(k)?;

        let mut accumulator = Point::Infinity;
        for (i, power) in self.powers.iter().enumerate() {
            if k.bit(i as u64) {
                accumulator = accumulator.add(power)?;
            }
        }
        Ok(accumulator)
    }
}
