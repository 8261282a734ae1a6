//! Error types for the chain-wallet library
//!
//! This module provides a unified error handling system using `thiserror` for
//! all components of the library. Every error here is fatal to the current
//! derivation: the computation is deterministic, so retrying with the same
//! inputs reproduces the same failure.

use thiserror::Error;

/// The main error type for the chain-wallet library
#[derive(Error, Debug)]
pub enum Error {
    /// ECC (Elliptic Curve Cryptography) related errors
    #[error("ECC error: {0}")]
    Ecc(#[from] EccError),

    /// Storage operation errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Invalid input data
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        /// Which setting was rejected and why
        message: String,
    },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// ECC-specific error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    /// Arithmetic between field elements of different moduli
    #[error("Domain mismatch: {reason}")]
    DomainMismatch {
        /// Details
        reason: String,
    },

    /// Point operation without a defined result (non-invertible element)
    #[error("Invalid point: {reason}")]
    InvalidPoint {
        /// Details
        reason: String,
    },

    /// Scalar outside `[1, N-1]`
    #[error("Invalid scalar: {reason}")]
    InvalidScalar {
        /// Details
        reason: String,
    },

    /// Malformed private key encoding
    #[error("Invalid private key: {reason}")]
    InvalidPrivateKey {
        /// Details
        reason: String,
    },
}

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage operation failed
    #[error("Storage operation failed: {operation}: {reason}")]
    OperationFailed {
        /// Name of the failed step
        operation: String,
        /// Underlying cause
        reason: String,
    },

    /// Resource not found
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// The missing key
        resource: String,
    },

    /// Key cannot be mapped onto the backend
    #[error("Invalid storage key: {key}")]
    InvalidKey {
        /// The rejected key
        key: String,
    },
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for ECC Results
pub type EccResult<T> = std::result::Result<T, EccError>;

/// Convenience type alias for Storage Results
pub type StorageResult<T> = std::result::Result<T, StorageError>;
