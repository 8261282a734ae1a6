//! Elliptic Curve Cryptography (ECC) module
//!
//! Self-contained secp256k1 arithmetic for deterministic key derivation:
//! prime field elements, tagged affine points, double-and-add scalar
//! multiplication over a precomputed table, plus the Base58Check encodings
//! (WIF, P2PKH, P2SH-P2WPKH) built on top of them and the report obfuscator.
//!
//! None of this is constant time. It derives keys from a known passphrase; it
//! is not meant to handle secrets on a machine an attacker can observe.

pub mod field;
pub mod point;
pub mod scalar;
pub mod curve;
pub mod base58;
pub mod hash;
pub mod private_key;
pub mod public_key;
pub mod address;
pub mod obfuscator;

// Re-export main types for convenience
pub use field::FieldElement;
pub use point::Point;
pub use scalar::ScalarMultiplier;
pub use curve::Curve;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use address::{Address, AddressFormat};
pub use obfuscator::SecretObfuscator;
pub use base58::ToBase58Check;

// Re-export commonly used functions
pub use hash::{sha256, sha256d, sha512, hash160, ripemd160};

/// Common cryptographic constants
pub mod constants {
    //! Constants shared by the key and address encoders

    /// Size of a private key in bytes
    pub const PRIVATE_KEY_SIZE: usize = 32;

    /// Size of a compressed public key in bytes
    pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

    /// Size of an uncompressed public key in bytes
    pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

    /// Size of a hash in bytes (SHA-256)
    pub const HASH_SIZE: usize = 32;

    /// WIF version byte for mainnet private keys
    pub const WIF_VERSION: u8 = 0x80;

    /// Trailing WIF byte marking a compressed public key
    pub const WIF_COMPRESSED_FLAG: u8 = 0x01;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_brainwallet() {
        let digest = sha256(b"correct horse battery staple");
        let private_key = PrivateKey::from_digest(&digest).unwrap();
        let public_key = private_key.public_key().unwrap();

        assert_eq!(private_key.to_hex(), "c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a");
        assert_eq!(private_key.to_wif(true), "L3p8oAcQTtuokSCRHQ7i4MhjWc9zornvpJLfmg62sYpLRJF9woSu");
        assert_eq!(public_key.to_hex(), "0378d430274f8c5ec1321338151e9f27f4c676a008bdf8638d07c0b6be9ab35c71");
        assert_eq!(public_key.to_address().to_string(), "1C7zdTfnkzmr13HfA2vNm5SJYRK6nEKyq8");
    }

    #[test]
    fn test_empty_passphrase_vector() {
        let digest = sha256(b"");
        let public_key = PrivateKey::from_digest(&digest).unwrap().public_key().unwrap();
        assert_eq!(public_key.to_hex(), "03a34b99f22c790c4e36b2b3c2c35a36db06226e41c692fc82b8b56ac1c540c5bd");
        assert_eq!(public_key.to_address().to_string(), "1F3sAm6ZtwLAUnj7d38pGFxtP3RVEvtsbV");
        assert_eq!(public_key.to_segwit_address().to_string(), "3DnW8JGpPViEZdpqat8qky1zc26EKbXnmM");
    }
}
