//! Base58 and Base58Check encoding
//!
//! Encoding only. The payload is treated as one big-endian integer and
//! converted by repeated division, so the result is exact for any length.

use crate::ecc::hash::sha256d;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::Zero;

/// Bitcoin base58 alphabet (no `0`, `O`, `I`, `l`)
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of the Base58Check checksum in bytes
pub const CHECKSUM_SIZE: usize = 4;

/// Plain base58 encoding; each leading `0x00` byte becomes one leading `'1'`
pub fn encode(bytes: &[u8]) -> String {
    let radix = BigUint::from(58u32);
    let mut value = BigUint::from_bytes_be(bytes);
    let mut digits = Vec::new();

    while !value.is_zero() {
        let (quotient, remainder) = value.div_rem(&radix);
        let index = remainder.iter_u32_digits().next().unwrap_or(0) as usize;
        digits.push(ALPHABET[index]);
        value = quotient;
    }

    let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count();
    let mut encoded = String::with_capacity(leading_zeros + digits.len());
    encoded.extend(std::iter::repeat('1').take(leading_zeros));
    encoded.extend(digits.iter().rev().map(|&d| d as char));
    encoded
}

/// First four bytes of `sha256(sha256(payload))`
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let digest = sha256d(payload);
    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&digest[..CHECKSUM_SIZE]);
    out
}

/// Base58Check: `encode(payload || checksum(payload))`
pub fn encode_check(payload: &[u8]) -> String {
    let mut framed = Vec::with_capacity(payload.len() + CHECKSUM_SIZE);
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&checksum(payload));
    encode(&framed)
}

/// Extension trait mirroring the `base58` crate's `ToBase58`
pub trait ToBase58Check {
    /// Base58Check-encode `self`
    fn to_base58check(&self) -> String;
}

impl ToBase58Check for [u8] {
    fn to_base58check(&self) -> String {
        encode_check(self)
    }
}
