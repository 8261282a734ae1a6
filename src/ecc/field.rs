//! Prime field arithmetic
//!
//! A [`FieldElement`] is an integer reduced modulo a prime, carried together
//! with its modulus so that mixing elements of different fields is caught at
//! runtime instead of silently producing garbage.

use crate::error::{EccError, EccResult};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;

/// An element of the prime field `Z/pZ`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

#[allow(clippy::should_implement_trait)]
impl FieldElement {
    /// Create a field element, reducing `value` modulo `modulus`
    pub fn new(value: BigUint, modulus: &BigUint) -> EccResult<Self> {
        if modulus.is_zero() {
            return Err(EccError::DomainMismatch {
                reason: "modulus must be non-zero".to_string(),
            });
        }

        Ok(Self {
            value: value % modulus,
            modulus: modulus.clone(),
        })
    }

    /// Create a field element from a small integer
    pub fn from_u64(value: u64, modulus: &BigUint) -> EccResult<Self> {
        Self::new(BigUint::from(value), modulus)
    }

    /// Create a field element from big-endian bytes
    pub fn from_bytes_be(bytes: &[u8], modulus: &BigUint) -> EccResult<Self> {
        Self::new(BigUint::from_bytes_be(bytes), modulus)
    }

    /// The reduced value, always in `[0, modulus)`
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The field modulus
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Whether this is the additive identity
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Whether the value is even
    pub fn is_even(&self) -> bool {
        !self.value.bit(0)
    }

    /// Field addition
    pub fn add(&self, other: &Self) -> EccResult<Self> {
        self.check_domain(other)?;
        Ok(self.with_value((&self.value + &other.value) % &self.modulus))
    }

    /// Field subtraction
    pub fn sub(&self, other: &Self) -> EccResult<Self> {
        self.check_domain(other)?;
        let value = (&self.value + &self.modulus - &other.value) % &self.modulus;
        Ok(self.with_value(value))
    }

    /// Field multiplication
    pub fn mul(&self, other: &Self) -> EccResult<Self> {
        self.check_domain(other)?;
        Ok(self.with_value((&self.value * &other.value) % &self.modulus))
    }

    /// Multiply by a small integer constant
    pub fn scale(&self, factor: u32) -> Self {
        self.with_value((&self.value * factor) % &self.modulus)
    }

    /// Exponentiation by an arbitrary non-negative integer
    pub fn pow(&self, exponent: &BigUint) -> Self {
        self.with_value(self.value.modpow(exponent, &self.modulus))
    }

    /// Additive inverse
    pub fn neg(&self) -> Self {
        if self.value.is_zero() {
            return self.clone();
        }
        self.with_value(&self.modulus - &self.value)
    }

    /// Multiplicative inverse via Fermat's little theorem: `a^(p-2) mod p`.
    ///
    /// Only meaningful for a prime modulus.
    pub fn inverse(&self) -> EccResult<Self> {
        if self.value.is_zero() {
            return Err(EccError::InvalidPoint {
                reason: "zero has no multiplicative inverse".to_string(),
            });
        }
        if self.modulus <= BigUint::from(2u32) {
            // p - 2 would underflow; the only such prime is 2, where a^-1 = a
            return Ok(self.clone());
        }

        let exponent = &self.modulus - 2u32;
        Ok(self.pow(&exponent))
    }

    /// Field division, `self * other^-1`
    pub fn div(&self, other: &Self) -> EccResult<Self> {
        self.check_domain(other)?;
        self.mul(&other.inverse()?)
    }

    fn with_value(&self, value: BigUint) -> Self {
        Self {
            value,
            modulus: self.modulus.clone(),
        }
    }

    fn check_domain(&self, other: &Self) -> EccResult<()> {
        if self.modulus != other.modulus {
            return Err(EccError::DomainMismatch {
                reason: format!(
                    "modulus {:x} does not match modulus {:x}",
                    self.modulus, other.modulus
                ),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:#x})", self.value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064x}", self.value)
    }
}
