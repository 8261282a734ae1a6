//! Utility functions for the chain-wallet library

use num_bigint::BigUint;

/// Left-pad the big-endian encoding of `value` to 32 bytes.
///
/// Values wider than 256 bits keep their low 32 bytes.
pub fn to_be_bytes_32(value: &BigUint) -> [u8; 32] {
    let bytes = value.to_bytes_be();
    let mut out = [0u8; 32];
    let take = bytes.len().min(32);
    out[32 - take..].copy_from_slice(&bytes[bytes.len() - take..]);
    out
}
