//! Private key implementation for ECC operations

use crate::error::{EccError, EccResult};
use crate::ecc::{base58, Curve, PublicKey, constants::{PRIVATE_KEY_SIZE, WIF_VERSION, WIF_COMPRESSED_FLAG}};
use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secp256k1 private key, a scalar `k` with `1 <= k < n`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    key: [u8; PRIVATE_KEY_SIZE],
}

impl PrivateKey {
    /// Create a private key from 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8]) -> EccResult<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(EccError::InvalidPrivateKey {
                reason: format!("Invalid key length: expected {}, got {}", PRIVATE_KEY_SIZE, bytes.len()),
            });
        }

        let scalar = BigUint::from_bytes_be(bytes);
        Curve::secp256k1()?.validate_scalar(&scalar)?;

        let mut key = [0u8; PRIVATE_KEY_SIZE];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Create a private key from a stretched digest
    pub fn from_digest(digest: &[u8; 32]) -> EccResult<Self> {
        Self::from_bytes(digest)
    }

    /// Create private key from hex string
    pub fn from_hex(hex_str: &str) -> EccResult<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| EccError::InvalidPrivateKey {
                reason: format!("Invalid hex string: {}", e),
            })?;
        Self::from_bytes(&bytes)
    }

    /// Convert to WIF (Wallet Import Format)
    pub fn to_wif(&self, compressed: bool) -> String {
        let mut payload = Vec::with_capacity(PRIVATE_KEY_SIZE + 2);
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&self.key);

        if compressed {
            payload.push(WIF_COMPRESSED_FLAG);
        }

        let wif = base58::encode_check(&payload);
        payload.zeroize();
        wif
    }

    /// Convert private key to a 64-digit hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.key)
    }

    /// Convert to bytes
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        self.key
    }

    /// The key as an integer scalar
    pub fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.key)
    }

    /// Get the corresponding public key, `k * G`
    pub fn public_key(&self) -> EccResult<PublicKey> {
        self.public_key_on(Curve::secp256k1()?)
    }

    /// Get the public key using an explicit curve instance
    pub fn public_key_on(&self, curve: &Curve) -> EccResult<PublicKey> {
        let point = curve.multiply_generator(&self.scalar())?;
        PublicKey::from_point(point)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
