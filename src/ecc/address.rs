//! Base58Check address derivation
//!
//! Only the two formats a chain wallet reports are supported: legacy
//! pay-to-pubkey-hash and pay-to-script-hash wrapping a version 0 witness
//! program (P2SH-P2WPKH).

use crate::ecc::{base58, hash, PublicKey};
use std::fmt;

/// Version byte of a mainnet P2PKH address
pub const P2PKH_VERSION: u8 = 0x00;

/// Version byte of a mainnet P2SH address
pub const P2SH_VERSION: u8 = 0x05;

/// A Base58Check address built from a 20-byte hash
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// RIPEMD160(SHA256(..)) of the key or script
    hash: [u8; 20],
    /// The address format type
    format: AddressFormat,
}

/// Supported address formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// Pay to public key hash
    P2pkh,
    /// P2WPKH nested inside P2SH
    P2shP2wpkh,
}

impl AddressFormat {
    /// The leading version byte of the encoded payload
    pub fn version(&self) -> u8 {
        match self {
            AddressFormat::P2pkh => P2PKH_VERSION,
            AddressFormat::P2shP2wpkh => P2SH_VERSION,
        }
    }
}

impl Address {
    /// P2PKH address: hash160 of the compressed public key
    pub fn p2pkh(public_key: &PublicKey) -> Self {
        Self {
            hash: public_key.hash160(),
            format: AddressFormat::P2pkh,
        }
    }

    /// P2SH-P2WPKH address: hash160 of the witness redeem script
    pub fn p2sh_p2wpkh(public_key: &PublicKey) -> Self {
        Self {
            hash: hash::hash160(&Self::redeem_script(public_key)),
            format: AddressFormat::P2shP2wpkh,
        }
    }

    /// `OP_0 PUSH20 <hash160(compressed key)>`
    pub fn redeem_script(public_key: &PublicKey) -> [u8; 22] {
        let mut script = [0u8; 22];
        script[0] = 0x00;
        script[1] = 0x14;
        script[2..].copy_from_slice(&public_key.hash160());
        script
    }

    /// Get the address hash
    pub fn hash(&self) -> &[u8; 20] {
        &self.hash
    }

    /// Get the address format
    pub fn format(&self) -> AddressFormat {
        self.format
    }

    /// `version || hash`, the Base58Check payload
    pub fn payload(&self) -> [u8; 21] {
        let mut payload = [0u8; 21];
        payload[0] = self.format.version();
        payload[1..].copy_from_slice(&self.hash);
        payload
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58::encode_check(&self.payload()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecc::PrivateKey;

    fn staple_public_key() -> PublicKey {
        PrivateKey::from_hex("c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a")
            .unwrap()
            .public_key()
            .unwrap()
    }

    #[test]
    fn test_p2pkh_vector() {
        let address = Address::p2pkh(&staple_public_key());
        assert_eq!(address.format(), AddressFormat::P2pkh);
        assert_eq!(address.to_string(), "1C7zdTfnkzmr13HfA2vNm5SJYRK6nEKyq8");
    }

    #[test]
    fn test_segwit_vector() {
        let address = Address::p2sh_p2wpkh(&staple_public_key());
        assert_eq!(address.format(), AddressFormat::P2shP2wpkh);
        assert_eq!(address.to_string(), "3KToBU4ykTWfjnu4kAUV1q8QosnxT61sbf");
    }

    #[test]
    fn test_redeem_script_layout() {
        let public_key = staple_public_key();
        let script = Address::redeem_script(&public_key);
        assert_eq!(&script[..2], &[0x00, 0x14]);
        assert_eq!(&script[2..], &public_key.hash160());
    }

    #[test]
    fn test_prefix_characters() {
        let public_key = staple_public_key();
        assert!(public_key.to_address().to_string().starts_with('1'));
        assert!(public_key.to_segwit_address().to_string().starts_with('3'));
    }
}
