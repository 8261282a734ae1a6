//! # Chain Wallet
//!
//! A deterministic secp256k1 brainwallet. A passphrase is stretched by a
//! long sequential SHA-256 chain into a private key, from which the public
//! key and its Bitcoin addresses are derived with self-contained curve
//! arithmetic.
//!
//! ## Features
//!
//! - **ECC Module**: Prime field and point arithmetic, scalar multiplication,
//!   Base58Check, WIF and address encodings, and the report obfuscator
//! - **Stretch Module**: The `B^N` hash chain with progress and ETA reporting
//! - **Wallet Module**: Passphrase to report, the end-to-end flow
//! - **Storage Module**: Memory and local filesystem backends for reports
//!
//! ## Optional Features
//!
//! - `serde_support`: Serde serialization for configuration and progress types
//!
//! ## Example
//!
//! ```rust
//! use chain_wallet::prelude::*;
//!
//! let wallet = ChainWallet::new(WalletConfig::default())?;
//! let derived = wallet.derive("correct horse battery staple")?;
//! assert_eq!(derived.address.to_string(), "1C7zdTfnkzmr13HfA2vNm5SJYRK6nEKyq8");
//!
//! let storage = MemoryAdapter::new();
//! let key = wallet.save(&derived, &storage)?;
//! assert!(storage.exists(&key)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod error;
pub mod ecc;
pub mod stretch;
pub mod wallet;
pub mod storage;

// Utility modules
mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::error::{Error, Result};
    pub use crate::ecc::{Address, Curve, FieldElement, Point, PrivateKey, PublicKey, SecretObfuscator};
    pub use crate::stretch::{KeyDerivationChain, StretchEvent};
    pub use crate::wallet::{ChainWallet, WalletConfig};
    pub use crate::storage::{MemoryAdapter, StorageAdapter};
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
