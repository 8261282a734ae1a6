//! Local filesystem storage backend
//!
//! Each key is one file directly under the base directory. Keys are plain
//! file names; anything that could escape the base directory is rejected.
//! Writes go through a uniquely named temporary file in the same directory
//! and a rename, so a crash or a failed write never leaves a half-written or
//! orphaned report behind.

use crate::error::{StorageError, StorageResult};
use crate::storage::adapter::StorageAdapter;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Local storage configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalConfig {
    /// Base directory for storage
    pub base_path: PathBuf,
    /// Create the base directory if it doesn't exist
    pub create_dirs: bool,
    /// Use atomic writes (write to temp file, then rename)
    pub atomic_writes: bool,
    /// File permissions (Unix only)
    pub file_permissions: Option<u32>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            create_dirs: true,
            atomic_writes: true,
            file_permissions: Some(0o600),
        }
    }
}

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    config: LocalConfig,
}

impl LocalStorage {
    /// Create a new local storage backend
    pub fn new(config: LocalConfig) -> StorageResult<Self> {
        if config.create_dirs && !config.base_path.exists() {
            fs::create_dir_all(&config.base_path)
                .map_err(|e| StorageError::OperationFailed {
                    operation: "create_base_directory".to_string(),
                    reason: format!("Failed to create base directory: {}", e),
                })?;
        }

        if !config.base_path.is_dir() {
            return Err(StorageError::OperationFailed {
                operation: "verify_base_directory".to_string(),
                reason: format!("{} is not a directory", config.base_path.display()),
            });
        }

        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &LocalConfig {
        &self.config
    }

    /// Resolve a key to its file path
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.config.base_path.join(key))
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        if !self.config.atomic_writes {
            let mut file = File::create(path)
                .map_err(|e| StorageError::OperationFailed {
                    operation: "create_file".to_string(),
                    reason: format!("Failed to create {}: {}", path.display(), e),
                })?;
            write_all(&mut file, data)?;
            return self.apply_permissions(path);
        }

        // Removed on drop unless persisted
        let mut temp = NamedTempFile::new_in(&self.config.base_path)
            .map_err(|e| StorageError::OperationFailed {
                operation: "create_temp_file".to_string(),
                reason: format!("Failed to create temporary file: {}", e),
            })?;
        write_all(temp.as_file_mut(), data)?;
        self.apply_permissions(temp.path())?;

        temp.persist(path)
            .map_err(|e| StorageError::OperationFailed {
                operation: "atomic_rename".to_string(),
                reason: format!("Failed to rename temporary file: {}", e.error),
            })?;
        Ok(())
    }

    #[cfg(unix)]
    fn apply_permissions(&self, path: &Path) -> StorageResult<()> {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = self.config.file_permissions {
            fs::set_permissions(path, fs::Permissions::from_mode(mode))
                .map_err(|e| StorageError::OperationFailed {
                    operation: "set_file_permissions".to_string(),
                    reason: format!("Failed to set file permissions: {}", e),
                })?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply_permissions(&self, _path: &Path) -> StorageResult<()> {
        Ok(())
    }
}

fn write_all(file: &mut File, data: &[u8]) -> StorageResult<()> {
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| StorageError::OperationFailed {
            operation: "write_file".to_string(),
            reason: format!("Failed to write file: {}", e),
        })
}

/// Keys must be non-empty single path components
fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

impl StorageAdapter for LocalStorage {
    fn store(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.path_for(key)?;
        self.write_file(&path, data)?;
        debug!(path = %path.display(), bytes = data.len(), "stored file");
        Ok(())
    }

    fn retrieve(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.path_for(key)?;
        let mut file = File::open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StorageError::ResourceNotFound {
                    resource: key.to_string(),
                },
                _ => StorageError::OperationFailed {
                    operation: "open_file".to_string(),
                    reason: format!("Failed to open file: {}", e),
                },
            })?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .map_err(|e| StorageError::OperationFailed {
                operation: "read_file".to_string(),
                reason: format!("Failed to read file: {}", e),
            })?;
        Ok(buffer)
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::remove_file(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StorageError::ResourceNotFound {
                    resource: key.to_string(),
                },
                _ => StorageError::OperationFailed {
                    operation: "delete_file".to_string(),
                    reason: format!("Failed to delete file: {}", e),
                },
            })
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (LocalStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config = LocalConfig {
            base_path: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        (LocalStorage::new(config).unwrap(), temp_dir)
    }

    #[test]
    fn test_local_config_default() {
        let config = LocalConfig::default();
        assert_eq!(config.base_path, PathBuf::from("."));
        assert!(config.create_dirs);
        assert!(config.atomic_writes);
    }

    #[test]
    fn test_store_and_retrieve() {
        let (storage, temp_dir) = create_test_storage();
        storage.store("wallet.krypt", b"secret bytes").unwrap();

        assert_eq!(storage.retrieve("wallet.krypt").unwrap(), b"secret bytes");
        assert!(temp_dir.path().join("wallet.krypt").is_file());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_rename_leaves_no_temp_file() {
        let (storage, temp_dir) = create_test_storage();
        fs::create_dir(temp_dir.path().join("x.krypt")).unwrap();

        let result = storage.store("x.krypt", b"SECRET REPORT");
        assert!(matches!(result, Err(StorageError::OperationFailed { .. })));

        let entries: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("x.krypt")]);
        assert!(temp_dir.path().join("x.krypt").is_dir());
    }

    #[test]
    fn test_keys_sharing_a_stem_do_not_collide() {
        let (storage, _temp_dir) = create_test_storage();
        storage.store("w.krypt", b"first").unwrap();
        storage.store("w", b"second").unwrap();
        storage.store("w.tmp", b"third").unwrap();

        assert_eq!(storage.retrieve("w.krypt").unwrap(), b"first");
        assert_eq!(storage.retrieve("w").unwrap(), b"second");
        assert_eq!(storage.retrieve("w.tmp").unwrap(), b"third");
    }

    #[test]
    fn test_concurrent_stores() {
        let (storage, _temp_dir) = create_test_storage();
        std::thread::scope(|scope| {
            for i in 0..8u8 {
                let storage = &storage;
                scope.spawn(move || {
                    storage.store("shared.krypt", &[i; 64]).unwrap();
                    storage.store(&format!("own{}.krypt", i), &[i; 64]).unwrap();
                });
            }
        });

        let shared = storage.retrieve("shared.krypt").unwrap();
        assert_eq!(shared.len(), 64);
        assert!(shared.iter().all(|&b| b == shared[0]));
        for i in 0..8u8 {
            assert_eq!(storage.retrieve(&format!("own{}.krypt", i)).unwrap(), vec![i; 64]);
        }
    }

    #[test]
    fn test_overwrite() {
        let (storage, _temp_dir) = create_test_storage();
        storage.store("a.krypt", b"one").unwrap();
        storage.store("a.krypt", b"two").unwrap();
        assert_eq!(storage.retrieve("a.krypt").unwrap(), b"two");
    }

    #[test]
    fn test_exists_and_delete() {
        let (storage, _temp_dir) = create_test_storage();
        assert!(!storage.exists("a.krypt").unwrap());
        storage.store("a.krypt", b"x").unwrap();
        assert!(storage.exists("a.krypt").unwrap());
        storage.delete("a.krypt").unwrap();
        assert!(!storage.exists("a.krypt").unwrap());
        assert!(matches!(storage.delete("a.krypt"), Err(StorageError::ResourceNotFound { .. })));
        assert!(matches!(storage.retrieve("a.krypt"), Err(StorageError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_invalid_keys() {
        let (storage, _temp_dir) = create_test_storage();
        for key in ["", ".", "..", "../escape", "dir/file", "dir\\file"] {
            assert!(
                matches!(storage.store(key, b"x"), Err(StorageError::InvalidKey { .. })),
                "key {:?} accepted",
                key
            );
        }
    }

    #[test]
    fn test_missing_base_directory_without_create() {
        let temp_dir = TempDir::new().unwrap();
        let config = LocalConfig {
            base_path: temp_dir.path().join("missing"),
            create_dirs: false,
            ..Default::default()
        };
        assert!(LocalStorage::new(config).is_err());
    }

    #[test]
    fn test_direct_write() {
        let temp_dir = TempDir::new().unwrap();
        let config = LocalConfig {
            base_path: temp_dir.path().join("nested"),
            atomic_writes: false,
            file_permissions: None,
            ..Default::default()
        };
        let storage = LocalStorage::new(config).unwrap();
        storage.store("plain.krypt", b"data").unwrap();
        assert_eq!(storage.retrieve("plain.krypt").unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let (storage, temp_dir) = create_test_storage();
        storage.store("perm.krypt", b"x").unwrap();
        let mode = fs::metadata(temp_dir.path().join("perm.krypt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
