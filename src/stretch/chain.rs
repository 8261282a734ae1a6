//! The sequential SHA-256 chain and its event iterator

use crate::ecc::{constants::HASH_SIZE, hash::sha256};
use crate::error::Result;
use crate::stretch::{iteration_count, ProgressEvent, StretchConfig};
use std::iter::FusedIterator;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

/// Something observable that happened during a stretching run
#[derive(Clone, Debug, PartialEq)]
pub enum StretchEvent {
    /// A digest of the chain, only emitted when intermediate output is on
    Intermediate {
        /// 1-based position in the chain; 1 is `sha256(passphrase)`
        iteration: u128,
        /// The digest at that position
        digest: [u8; HASH_SIZE],
    },
    /// A rate/ETA checkpoint
    Progress(ProgressEvent),
}

/// Parameters of one stretching run
#[derive(Clone)]
pub struct KeyDerivationChain {
    passphrase: Zeroizing<Vec<u8>>,
    base: u64,
    exponent: u32,
    total: u128,
    config: StretchConfig,
    show_intermediate: bool,
}

impl KeyDerivationChain {
    /// Describe a run of `base^exponent` hashes over `passphrase`
    pub fn new(passphrase: &[u8], base: u64, exponent: u32) -> Result<Self> {
        let total = iteration_count(base, exponent)?;
        Ok(Self {
            passphrase: Zeroizing::new(passphrase.to_vec()),
            base,
            exponent,
            total,
            config: StretchConfig::default(),
            show_intermediate: false,
        })
    }

    /// Override the checkpoint schedule
    pub fn with_config(mut self, config: StretchConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Emit every digest of the chain as a [`StretchEvent::Intermediate`]
    pub fn show_intermediate(mut self, show: bool) -> Self {
        self.show_intermediate = show;
        self
    }

    /// Chain base `B`
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Chain exponent `N`
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    /// `B^N`
    pub fn total_iterations(&self) -> u128 {
        self.total
    }

    /// Hash the passphrase and start the clock. The returned iterator does
    /// the remaining work lazily.
    pub fn start(self) -> Stretcher {
        self.start_with_clock(Instant::now())
    }

    /// Like [`start`](Self::start), but checkpoints read elapsed time from
    /// `clock`, which should read zero when the run begins
    pub fn start_with_clock<C: StretchClock>(self, clock: C) -> Stretcher<C> {
        debug!(
            base = self.base,
            exponent = self.exponent,
            total = %self.total,
            "starting key stretching"
        );

        let digest = sha256(&self.passphrase);
        let pending = self.show_intermediate.then_some(StretchEvent::Intermediate {
            iteration: 1,
            digest,
        });

        Stretcher {
            digest,
            done: 1,
            total: self.total,
            next_checkpoint: self.config.first_checkpoint,
            interval: self.config.interval(self.total),
            clock,
            show_intermediate: self.show_intermediate,
            pending,
            last_progress: None,
        }
    }

    /// Run to completion without observing events
    pub fn run(self) -> StretchOutcome {
        self.start().finish()
    }
}

impl std::fmt::Debug for KeyDerivationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDerivationChain")
            .field("passphrase", &"[REDACTED]")
            .field("base", &self.base)
            .field("exponent", &self.exponent)
            .field("total", &self.total)
            .field("config", &self.config)
            .field("show_intermediate", &self.show_intermediate)
            .finish()
    }
}

/// Source of elapsed time for progress checkpoints
pub trait StretchClock {
    /// Time since the run started
    fn elapsed(&self) -> Duration;
}

impl StretchClock for Instant {
    fn elapsed(&self) -> Duration {
        Instant::elapsed(self)
    }
}

/// A running chain. Single pass: once exhausted it yields nothing more, and
/// it cannot be rewound.
pub struct Stretcher<C = Instant> {
    digest: [u8; HASH_SIZE],
    done: u128,
    total: u128,
    next_checkpoint: u128,
    interval: u128,
    clock: C,
    show_intermediate: bool,
    pending: Option<StretchEvent>,
    last_progress: Option<ProgressEvent>,
}

impl<C: StretchClock> Stretcher<C> {
    /// Hashes computed so far
    pub fn iterations_done(&self) -> u128 {
        self.done
    }

    /// Hashes the run will compute in total
    pub fn total_iterations(&self) -> u128 {
        self.total
    }

    /// Whether every hash has been computed
    pub fn is_complete(&self) -> bool {
        self.done >= self.total && self.pending.is_none()
    }

    /// Drain the remaining work and return the final digest
    pub fn finish(mut self) -> StretchOutcome {
        for _ in self.by_ref() {}

        let elapsed = self.clock.elapsed();
        info!(
            iterations = %self.done,
            elapsed_ms = %elapsed.as_millis(),
            "key stretching complete"
        );

        StretchOutcome {
            digest: self.digest,
            iterations: self.done,
            elapsed,
            last_progress: self.last_progress.take(),
        }
    }

    fn checkpoint(&mut self) -> Option<ProgressEvent> {
        if self.done != self.next_checkpoint {
            return None;
        }
        self.next_checkpoint = self.done.saturating_add(self.interval);

        let elapsed_ms = self.clock.elapsed().as_millis();
        let Some(event) = ProgressEvent::measure(self.done, self.total, elapsed_ms) else {
            debug!(iterations = %self.done, "checkpoint skipped, no measurable time elapsed");
            return None;
        };

        info!(
            iterations = %event.iterations_done,
            hashes_per_second = event.hashes_per_second(),
            remaining = %event.remaining(),
            "stretching progress"
        );
        self.last_progress = Some(event.clone());
        Some(event)
    }
}

impl<C: StretchClock> Iterator for Stretcher<C> {
    type Item = StretchEvent;

    fn next(&mut self) -> Option<StretchEvent> {
        if let Some(event) = self.pending.take() {
            return Some(event);
        }

        while self.done < self.total {
            self.digest = sha256(&self.digest);
            self.done += 1;

            let progress = self.checkpoint();
            if self.show_intermediate {
                self.pending = progress.map(StretchEvent::Progress);
                return Some(StretchEvent::Intermediate {
                    iteration: self.done,
                    digest: self.digest,
                });
            }
            if let Some(event) = progress {
                return Some(StretchEvent::Progress(event));
            }
        }

        None
    }
}

impl<C: StretchClock> FusedIterator for Stretcher<C> {}

impl<C> Drop for Stretcher<C> {
    fn drop(&mut self) {
        self.digest.zeroize();
        if let Some(StretchEvent::Intermediate { digest, .. }) = self.pending.as_mut() {
            digest.zeroize();
        }
    }
}

/// Result of a completed run
pub struct StretchOutcome {
    digest: [u8; HASH_SIZE],
    iterations: u128,
    elapsed: Duration,
    last_progress: Option<ProgressEvent>,
}

impl StretchOutcome {
    /// The final digest, the candidate private key in big-endian order.
    ///
    /// Not range-checked against the curve order here.
    pub fn digest(&self) -> &[u8; HASH_SIZE] {
        &self.digest
    }

    /// Hashes computed
    pub fn iterations(&self) -> u128 {
        self.iterations
    }

    /// Measured wall time of the run
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// The last checkpoint measurement, if any fired
    pub fn last_progress(&self) -> Option<&ProgressEvent> {
        self.last_progress.as_ref()
    }
}

impl Drop for StretchOutcome {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}

impl std::fmt::Debug for StretchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StretchOutcome")
            .field("digest", &"[REDACTED]")
            .field("iterations", &self.iterations)
            .field("elapsed", &self.elapsed)
            .field("last_progress", &self.last_progress)
            .finish()
    }
}
