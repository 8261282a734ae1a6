//! Hash functions for cryptographic operations

use sha2::{Sha256, Sha512, Digest};
use ripemd::Ripemd160;

/// SHA-256 hash function
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-512 hash function
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// RIPEMD-160 hash function
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Double SHA-256 hash function (Bitcoin-style)
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Hash160: RIPEMD-160 of SHA-256 (Bitcoin-style address hash)
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Hash chain: `iterations` applications of SHA-256, the first one over `data`.
///
/// `iterations == 0` is treated as a single application.
pub fn hash_chain(data: &[u8], iterations: u64) -> [u8; 32] {
    let mut result = sha256(data);
    for _ in 1..iterations {
        result = sha256(&result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256() {
        let hash = sha256(b"hello world");
        let expected = hex::decode("b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9").unwrap();
        assert_eq!(hash.to_vec(), expected);
    }

    #[test]
    fn test_sha256d() {
        let data = b"hello";
        let hash = sha256d(data);
        assert_ne!(hash, sha256(data));
        assert_eq!(hash, sha256(&sha256(data)));
    }

    #[test]
    fn test_ripemd160_empty() {
        assert_eq!(hex::encode(ripemd160(b"")), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
    }

    #[test]
    fn test_hash160() {
        let hash = hash160(b"test data");
        assert_eq!(hash, ripemd160(&sha256(b"test data")));
    }

    #[test]
    fn test_sha512_length_and_vector() {
        let digest = sha512(b"correct horse battery staple");
        assert_eq!(
            hex::encode(digest),
            "be5ef7679d88ab9a9045f6267e55f5e5784b4b8cd764b5cd855a5244f91c626953cd46c43d7668873fd6efbd3b221249315580031963472a078781fe046e62ae"
        );
    }

    #[test]
    fn test_hash_chain() {
        assert_eq!(hash_chain(b"data", 1), sha256(b"data"));
        assert_eq!(hash_chain(b"data", 0), sha256(b"data"));
        assert_eq!(hash_chain(b"data", 3), sha256(&sha256(&sha256(b"data"))));
    }
}
