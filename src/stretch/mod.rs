//! Key stretching by iterated SHA-256
//!
//! A passphrase is hashed once and the digest is then re-hashed until
//! `base^exponent` hashes have been computed in total. The final digest is
//! the candidate private key. The run is strictly sequential and can take
//! anywhere from microseconds to years, so it is exposed as a lazy iterator of
//! [`StretchEvent`]s that carries periodic rate/ETA measurements.

pub mod chain;
pub mod progress;

pub use chain::{KeyDerivationChain, StretchClock, StretchEvent, StretchOutcome, Stretcher};
pub use progress::{ProgressEvent, TimeBreakdown};

use crate::error::{Error, Result};

/// Iterations after which the first progress checkpoint fires
pub const DEFAULT_FIRST_CHECKPOINT: u128 = 1_000_000;

/// After the first checkpoint, one checkpoint per `total / this` iterations
pub const DEFAULT_CHECKPOINTS_PER_RUN: u128 = 1_000;

/// Checkpoint schedule of a stretching run
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde_support", serde(default))]
pub struct StretchConfig {
    /// Iterations before the first progress measurement
    pub first_checkpoint: u128,
    /// Divisor of the total iteration count giving the checkpoint interval
    pub checkpoints_per_run: u128,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            first_checkpoint: DEFAULT_FIRST_CHECKPOINT,
            checkpoints_per_run: DEFAULT_CHECKPOINTS_PER_RUN,
        }
    }
}

impl StretchConfig {
    /// Distance between checkpoints for a run of `total` iterations, at least 1
    pub fn interval(&self, total: u128) -> u128 {
        (total / self.checkpoints_per_run.max(1)).max(1)
    }

    /// Check the schedule is usable
    pub fn validate(&self) -> Result<()> {
        if self.first_checkpoint == 0 {
            return Err(Error::Configuration {
                message: "first_checkpoint must be at least 1".to_string(),
            });
        }
        if self.checkpoints_per_run == 0 {
            return Err(Error::Configuration {
                message: "checkpoints_per_run must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `base^exponent`, the total number of hashes in a run
pub fn iteration_count(base: u64, exponent: u32) -> Result<u128> {
    if base < 2 {
        return Err(Error::InvalidInput {
            message: format!("chain base must be at least 2, got {}", base),
        });
    }

    (base as u128).checked_pow(exponent).ok_or_else(|| Error::InvalidInput {
        message: format!("{}^{} iterations overflows 128 bits", base, exponent),
    })
}
