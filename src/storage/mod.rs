//! Storage module for wallet reports
//!
//! Backends implement [`StorageAdapter`], a small key/value interface:
//! - **Memory storage** - For tests and short-lived processes
//! - **Local filesystem storage** - One file per key under a base directory
//!
//! # Examples
//!
//! ```rust
//! use chain_wallet::storage::{MemoryAdapter, StorageAdapter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = MemoryAdapter::new();
//! storage.store("wallet.krypt", b"report bytes")?;
//! assert!(storage.exists("wallet.krypt")?);
//! assert_eq!(storage.retrieve("wallet.krypt")?, b"report bytes");
//! storage.delete("wallet.krypt")?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod memory_adapter;
pub mod storage_local;

pub use adapter::StorageAdapter;
pub use memory_adapter::MemoryAdapter;
pub use storage_local::{LocalConfig, LocalStorage};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn round_trip(storage: &dyn StorageAdapter) {
        storage.store("k.krypt", b"v").unwrap();
        assert_eq!(storage.retrieve("k.krypt").unwrap(), b"v");
        storage.delete("k.krypt").unwrap();
        assert!(!storage.exists("k.krypt").unwrap());
    }

    #[test]
    fn test_backends_behave_alike() {
        let temp_dir = TempDir::new().unwrap();
        let local = LocalStorage::new(LocalConfig {
            base_path: temp_dir.path().to_path_buf(),
            ..Default::default()
        })
        .unwrap();

        round_trip(&MemoryAdapter::new());
        round_trip(&local);
    }
}
