//! Public key implementation for ECC operations

use crate::error::{EccError, EccResult};
use crate::ecc::{Address, Curve, Point, hash, constants::{COMPRESSED_PUBLIC_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE}};
use crate::utils::to_be_bytes_32;

/// A secp256k1 public key, always a finite curve point
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: Point,
}

impl PublicKey {
    /// Wrap a finite point on secp256k1
    pub fn from_point(point: Point) -> EccResult<Self> {
        if point.is_infinity() {
            return Err(EccError::InvalidPoint {
                reason: "the point at infinity is not a public key".to_string(),
            });
        }
        if !Curve::secp256k1()?.contains(&point) {
            return Err(EccError::InvalidPoint {
                reason: "point is not on secp256k1".to_string(),
            });
        }
        Ok(Self { point })
    }

    /// The underlying curve point
    pub fn point(&self) -> &Point {
        &self.point
    }

    fn coordinates(&self) -> ([u8; 32], [u8; 32], bool) {
        match &self.point {
            Point::Finite { x, y } => (to_be_bytes_32(x.value()), to_be_bytes_32(y.value()), y.is_even()),
            // from_point never stores infinity
            Point::Infinity => ([0u8; 32], [0u8; 32], true),
        }
    }

    /// Compressed SEC encoding: `0x02`/`0x03` by y parity, then x
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        let (x, _, y_even) = self.coordinates();
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        out[0] = if y_even { 0x02 } else { 0x03 };
        out[1..].copy_from_slice(&x);
        out
    }

    /// Uncompressed SEC encoding: `0x04 || x || y`
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let (x, y, _) = self.coordinates();
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&x);
        out[33..].copy_from_slice(&y);
        out
    }

    /// Convert to hex string (compressed)
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Convert to hex string (uncompressed)
    pub fn to_hex_uncompressed(&self) -> String {
        hex::encode(self.to_uncompressed_bytes())
    }

    /// RIPEMD160(SHA256(compressed key))
    pub fn hash160(&self) -> [u8; 20] {
        hash::hash160(&self.to_bytes())
    }

    /// P2PKH address of the compressed key
    pub fn to_address(&self) -> Address {
        Address::p2pkh(self)
    }

    /// P2SH-wrapped P2WPKH address of the compressed key
    pub fn to_segwit_address(&self) -> Address {
        Address::p2sh_p2wpkh(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::PrivateKey;

    #[test]
    fn test_compressed_encoding() {
        let key = PrivateKey::from_hex("c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a").unwrap();
        let public_key = key.public_key().unwrap();
        assert_eq!(public_key.to_hex(), "0378d430274f8c5ec1321338151e9f27f4c676a008bdf8638d07c0b6be9ab35c71");
        assert_eq!(
            public_key.to_hex_uncompressed(),
            "0478d430274f8c5ec1321338151e9f27f4c676a008bdf8638d07c0b6be9ab35c71a1518063243acd4dfe96b66e3f2ec8013c8e072cd09b3834a19f81f659cc3455"
        );
    }

    #[test]
    fn test_even_y_prefix() {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        let public_key = PrivateKey::from_bytes(&bytes).unwrap().public_key().unwrap();
        assert_eq!(public_key.to_bytes()[0], 0x02);
        assert_eq!(public_key.to_hex(), "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    }

    #[test]
    fn test_infinity_rejected() {
        assert!(matches!(
            PublicKey::from_point(Point::Infinity),
            Err(EccError::InvalidPoint { .. })
        ));
    }

    #[test]
    fn test_off_curve_point_rejected() {
        let curve = Curve::secp256k1().unwrap();
        let one = curve.field_element(1u32.into()).unwrap();
        let bogus = Point::new(one.clone(), one).unwrap();
        assert!(matches!(
            PublicKey::from_point(bogus),
            Err(EccError::InvalidPoint { .. })
        ));
    }
}
