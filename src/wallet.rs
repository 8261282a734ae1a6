//! Passphrase to wallet: stretching, key derivation, report and export

use crate::ecc::{Address, Curve, PrivateKey, PublicKey, SecretObfuscator};
use crate::error::{Error, Result};
use crate::storage::StorageAdapter;
use crate::stretch::{KeyDerivationChain, StretchConfig, StretchEvent, TimeBreakdown};
use tracing::{info, instrument};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// File extension of a persisted report
pub const REPORT_EXTENSION: &str = "krypt";

/// Width of the label column in a rendered report
const LABEL_WIDTH: usize = 29;

/// Wallet generation settings
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde_support", serde(default))]
pub struct WalletConfig {
    /// Chain base `B`, at least 2
    pub base: u64,
    /// Chain exponent `N`
    pub exponent: u32,
    /// Surface every digest of the chain to the observer
    pub show_intermediate: bool,
    /// Include the P2SH-P2WPKH address in the report
    pub include_segwit: bool,
    /// Obfuscate the exported report with the passphrase
    pub encrypt_report: bool,
    /// Progress checkpoint schedule
    pub stretch: StretchConfig,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            base: 2,
            exponent: 0,
            show_intermediate: false,
            include_segwit: true,
            encrypt_report: true,
            stretch: StretchConfig::default(),
        }
    }
}

impl WalletConfig {
    /// Check the settings describe a runnable chain
    pub fn validate(&self) -> Result<()> {
        if self.base < 2 {
            return Err(Error::Configuration {
                message: format!("base must be at least 2, got {}", self.base),
            });
        }
        crate::stretch::iteration_count(self.base, self.exponent).map_err(|e| Error::Configuration {
            message: e.to_string(),
        })?;
        self.stretch.validate()
    }

    /// Parse settings from JSON; missing fields take their defaults
    #[cfg(feature = "serde_support")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Configuration {
            message: format!("invalid wallet config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Human-readable summary of a derived wallet
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletReport {
    passphrase: Vec<u8>,
    base: u64,
    exponent: u32,
    private_key_hex: String,
    wif_compressed: String,
    public_key_hex: String,
    address: String,
    segwit_address: Option<String>,
    time_to_complete: String,
}

impl WalletReport {
    /// The P2PKH address of the compressed public key
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The P2SH-P2WPKH address, when requested
    pub fn segwit_address(&self) -> Option<&str> {
        self.segwit_address.as_deref()
    }

    /// Compressed public key, hex
    pub fn public_key_hex(&self) -> &str {
        &self.public_key_hex
    }

    /// Private key, 64 hex digits
    pub fn private_key_hex(&self) -> &str {
        &self.private_key_hex
    }

    /// Private key, compressed WIF
    pub fn wif_compressed(&self) -> &str {
        &self.wif_compressed
    }

    /// Estimated (or measured) duration of the whole chain
    pub fn time_to_complete(&self) -> &str {
        &self.time_to_complete
    }

    /// Lines shown on screen; never contains key material
    pub fn public_summary(&self) -> String {
        let mut out = Vec::new();
        self.push_addresses(&mut out);
        // Addresses are base58, always ASCII
        String::from_utf8_lossy(&out).into_owned()
    }

    /// The full plaintext report. The passphrase line carries the raw
    /// passphrase bytes, which need not be UTF-8.
    pub fn render(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(Vec::new());
        push_line(&mut out, "Brain Password", &[self.passphrase.as_slice()]);
        push_line(&mut out, "Base", &[self.base.to_string().as_bytes()]);
        push_line(&mut out, "Exponent", &[self.exponent.to_string().as_bytes()]);
        push_line(&mut out, "Private Key (hex)", &[self.private_key_hex.as_bytes(), DELETE_NOTICE]);
        push_line(&mut out, "Private Key (WIF compressed)", &[self.wif_compressed.as_bytes(), DELETE_NOTICE]);
        self.push_addresses(&mut out);
        push_line(&mut out, "Time to complete", &[self.time_to_complete.as_bytes()]);
        out
    }

    /// Bytes to persist, obfuscated with the passphrase when `encrypt` is set
    pub fn export(&self, encrypt: bool) -> Vec<u8> {
        let rendered = self.render();
        if encrypt {
            SecretObfuscator::new(&self.passphrase).encrypt(&rendered)
        } else {
            rendered.to_vec()
        }
    }

    fn push_addresses(&self, out: &mut Vec<u8>) {
        push_line(out, "Public Key compressed", &[self.address.as_bytes()]);
        if let Some(segwit) = &self.segwit_address {
            push_line(out, "Public Segwit P2SH(P2WPKH)", &[segwit.as_bytes()]);
        }
    }

    /// Storage key for this report, `<address>.krypt`
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.address, REPORT_EXTENSION)
    }
}

impl std::fmt::Debug for WalletReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletReport")
            .field("base", &self.base)
            .field("exponent", &self.exponent)
            .field("address", &self.address)
            .field("segwit_address", &self.segwit_address)
            .field("time_to_complete", &self.time_to_complete)
            .finish_non_exhaustive()
    }
}

const DELETE_NOTICE: &[u8] = b" - It should be deleted";

/// Append `label` padded to the label column, `"- "`, then `parts` and a newline
fn push_line(out: &mut Vec<u8>, label: &str, parts: &[&[u8]]) {
    out.extend_from_slice(label.as_bytes());
    out.resize(out.len() + LABEL_WIDTH.saturating_sub(label.len()), b' ');
    out.extend_from_slice(b"- ");
    for part in parts {
        out.extend_from_slice(part);
    }
    out.push(b'\n');
}

/// Everything derived from one passphrase
#[derive(Debug)]
pub struct DerivedWallet {
    /// The stretched private key
    pub private_key: PrivateKey,
    /// `k * G`
    pub public_key: PublicKey,
    /// P2PKH address of the compressed key
    pub address: Address,
    /// P2SH-P2WPKH address, when enabled
    pub segwit_address: Option<Address>,
    /// Printable summary
    pub report: WalletReport,
}

/// Derives wallets from passphrases under a fixed configuration
#[derive(Debug)]
pub struct ChainWallet {
    config: WalletConfig,
    curve: &'static Curve,
}

impl ChainWallet {
    /// Validate `config` and prepare the shared curve tables
    pub fn new(config: WalletConfig) -> Result<Self> {
        config.validate()?;
        let curve = Curve::secp256k1()?;
        Ok(Self { config, curve })
    }

    /// The active configuration
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Derive without observing progress. The passphrase is an arbitrary
    /// byte string; `&str`, `&[u8]` and byte arrays all work.
    pub fn derive<P: AsRef<[u8]>>(&self, passphrase: P) -> Result<DerivedWallet> {
        self.derive_with(passphrase, |_| {})
    }

    /// Derive, handing every stretching event to `observer`
    #[instrument(skip_all, fields(base = self.config.base, exponent = self.config.exponent))]
    pub fn derive_with<P, F>(&self, passphrase: P, mut observer: F) -> Result<DerivedWallet>
    where
        P: AsRef<[u8]>,
        F: FnMut(&StretchEvent),
    {
        let passphrase = passphrase.as_ref();
        let chain = KeyDerivationChain::new(passphrase, self.config.base, self.config.exponent)?
            .with_config(self.config.stretch.clone())?
            .show_intermediate(self.config.show_intermediate);

        let mut stretcher = chain.start();
        for event in stretcher.by_ref() {
            observer(&event);
        }
        let outcome = stretcher.finish();

        let private_key = PrivateKey::from_digest(outcome.digest())?;
        let public_key = private_key.public_key_on(self.curve)?;
        let address = public_key.to_address();
        let segwit_address = self.config.include_segwit.then(|| public_key.to_segwit_address());

        let time_to_complete = match outcome.last_progress() {
            Some(progress) => progress.total(),
            None => TimeBreakdown::from_duration(outcome.elapsed()),
        };

        info!(address = %address, "wallet derived");

        let report = WalletReport {
            passphrase: passphrase.to_vec(),
            base: self.config.base,
            exponent: self.config.exponent,
            private_key_hex: private_key.to_hex(),
            wif_compressed: private_key.to_wif(true),
            public_key_hex: public_key.to_hex(),
            address: address.to_string(),
            segwit_address: segwit_address.as_ref().map(ToString::to_string),
            time_to_complete: time_to_complete.to_string(),
        };

        Ok(DerivedWallet {
            private_key,
            public_key,
            address,
            segwit_address,
            report,
        })
    }

    /// Export the report per configuration and store it; returns the key used
    pub fn save<S: StorageAdapter + ?Sized>(&self, wallet: &DerivedWallet, storage: &S) -> Result<String> {
        let key = wallet.report.storage_key();
        let data = Zeroizing::new(wallet.report.export(self.config.encrypt_report));
        storage.store(&key, &data)?;
        info!(key = %key, encrypted = self.config.encrypt_report, "report saved");
        Ok(key)
    }
}
