//! Passphrase-keyed XOR obfuscation for exported reports
//!
//! The keystream is the SHA-512 digest of the passphrase, truncated to a
//! passphrase-dependent period between 32 and 63 bytes and repeated over the
//! input. Applying it twice restores the input.
//!
//! This is obfuscation, not encryption: there is no nonce, no integrity tag,
//! and a repeating key falls to known-plaintext analysis.

use crate::ecc::hash;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum keystream period in bytes
pub const MIN_PERIOD: usize = 32;

/// Repeating-key XOR stream derived from a passphrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretObfuscator {
    keystream: [u8; 64],
    period: usize,
}

impl SecretObfuscator {
    /// Derive the keystream and period from `passphrase`
    pub fn new(passphrase: &[u8]) -> Self {
        Self {
            keystream: hash::sha512(passphrase),
            period: Self::period_for(passphrase),
        }
    }

    /// `32 + (sum of passphrase bytes mod 32)`, always in `[32, 64)`
    pub fn period_for(passphrase: &[u8]) -> usize {
        let sum = passphrase.iter().fold(0usize, |acc, &b| (acc + b as usize) % MIN_PERIOD);
        MIN_PERIOD + sum
    }

    /// The effective keystream length
    pub fn period(&self) -> usize {
        self.period
    }

    /// XOR `data` with the keystream in place
    pub fn apply_in_place(&self, data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate() {
            *byte ^= self.keystream[i % self.period];
        }
    }

    /// XOR `data` with the keystream into a new buffer
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        self.apply_in_place(&mut out);
        out
    }

    /// Obfuscate `plaintext`
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        self.apply(plaintext)
    }

    /// Recover plaintext; identical to [`SecretObfuscator::encrypt`]
    pub fn decrypt(&self, ciphertext: &[u8]) -> Vec<u8> {
        self.apply(ciphertext)
    }
}

impl std::fmt::Debug for SecretObfuscator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretObfuscator")
            .field("keystream", &"[REDACTED]")
            .field("period", &self.period)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_periods() {
        assert_eq!(SecretObfuscator::period_for(b"correct horse battery staple"), 55);
        assert_eq!(SecretObfuscator::period_for(b"abc"), 38);
        assert_eq!(SecretObfuscator::period_for(b""), 32);
    }

    #[test]
    fn test_keystream_repeats_with_period() {
        let obfuscator = SecretObfuscator::new(b"abc");
        let zeros = vec![0u8; 100];
        let stream = obfuscator.encrypt(&zeros);
        assert_eq!(&stream[..38], &hash::sha512(b"abc")[..38]);
        assert_eq!(&stream[38..76], &stream[..38]);
    }

    #[test]
    fn test_in_place_matches_copy() {
        let obfuscator = SecretObfuscator::new(b"pass");
        let mut data = b"some report".to_vec();
        let copy = obfuscator.apply(&data);
        obfuscator.apply_in_place(&mut data);
        assert_eq!(data, copy);
    }

    #[test]
    fn test_empty_input() {
        let obfuscator = SecretObfuscator::new(b"pass");
        assert!(obfuscator.encrypt(b"").is_empty());
    }

    proptest! {
        #[test]
        fn prop_self_inverse(plaintext in proptest::collection::vec(any::<u8>(), 0..512),
                             passphrase in proptest::collection::vec(any::<u8>(), 0..64)) {
            let obfuscator = SecretObfuscator::new(&passphrase);
            let ciphertext = obfuscator.encrypt(&plaintext);
            prop_assert_eq!(obfuscator.decrypt(&ciphertext), plaintext);
        }

        #[test]
        fn prop_period_in_range(passphrase in proptest::collection::vec(any::<u8>(), 0..256)) {
            let period = SecretObfuscator::period_for(&passphrase);
            prop_assert!((32..64).contains(&period));
        }
    }
}
