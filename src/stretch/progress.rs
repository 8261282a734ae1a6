//! Progress measurement for long stretching runs

use std::fmt;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// A rate/ETA snapshot taken at a checkpoint
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressEvent {
    /// Hashes computed so far, including the seed hash
    pub iterations_done: u128,
    /// Hashes the full run will compute
    pub total_iterations: u128,
    /// Iterations per millisecond
    pub rate: f64,
    /// Estimated time until the run completes
    pub eta_remaining: Duration,
    /// Estimated wall time of the whole run
    pub eta_total: Duration,
}

impl ProgressEvent {
    /// Build a snapshot from raw counters.
    ///
    /// Returns `None` when no rate can be measured yet (`elapsed_ms == 0` or
    /// nothing done).
    pub fn measure(iterations_done: u128, total_iterations: u128, elapsed_ms: u128) -> Option<Self> {
        if elapsed_ms == 0 || iterations_done == 0 {
            return None;
        }

        let rate = iterations_done as f64 / elapsed_ms as f64;
        let remaining = total_iterations.saturating_sub(iterations_done);

        Some(Self {
            iterations_done,
            total_iterations,
            rate,
            eta_remaining: millis_to_duration(remaining as f64 / rate),
            eta_total: millis_to_duration(total_iterations as f64 / rate),
        })
    }

    /// Hashes per second
    pub fn hashes_per_second(&self) -> f64 {
        self.rate * 1000.0
    }

    /// Fraction of the run completed, in `[0, 1]`
    pub fn fraction_done(&self) -> f64 {
        if self.total_iterations == 0 {
            return 1.0;
        }
        (self.iterations_done as f64 / self.total_iterations as f64).min(1.0)
    }

    /// Remaining time as years/days/hours/minutes/seconds
    pub fn remaining(&self) -> TimeBreakdown {
        TimeBreakdown::from_duration(self.eta_remaining)
    }

    /// Total time as years/days/hours/minutes/seconds
    pub fn total(&self) -> TimeBreakdown {
        TimeBreakdown::from_duration(self.eta_total)
    }
}

fn millis_to_duration(millis: f64) -> Duration {
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}

/// A duration split into 365-day years, days, hours, minutes and seconds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBreakdown {
    /// Whole 365-day years
    pub years: u64,
    /// Days, `0..365`
    pub days: u64,
    /// Hours, `0..24`
    pub hours: u64,
    /// Minutes, `0..60`
    pub minutes: u64,
    /// Seconds, `0..60`
    pub seconds: u64,
}

impl TimeBreakdown {
    /// Split whole seconds
    pub fn from_secs(total: u64) -> Self {
        Self {
            years: total / SECONDS_PER_YEAR,
            days: total % SECONDS_PER_YEAR / SECONDS_PER_DAY,
            hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
            minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    /// Split a duration, dropping sub-second precision
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs())
    }
}

impl fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} days, {} hours, {} minutes and {} seconds",
            self.years, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown() {
        let t = TimeBreakdown::from_secs(SECONDS_PER_YEAR + 2 * SECONDS_PER_DAY + 3 * SECONDS_PER_HOUR + 4 * 60 + 5);
        assert_eq!(t, TimeBreakdown { years: 1, days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(t.to_string(), "1 years, 2 days, 3 hours, 4 minutes and 5 seconds");
        assert_eq!(TimeBreakdown::from_secs(0), TimeBreakdown::default());
    }

    #[test]
    fn test_measure_skips_zero_elapsed() {
        assert!(ProgressEvent::measure(1_000_000, 10_000_000, 0).is_none());
        assert!(ProgressEvent::measure(0, 10_000_000, 5).is_none());
    }

    #[test]
    fn test_measure_rate_and_eta() {
        // 1000 iterations per ms, 9,000,000 left
        let event = ProgressEvent::measure(1_000_000, 10_000_000, 1_000).unwrap();
        assert_eq!(event.rate, 1000.0);
        assert_eq!(event.hashes_per_second(), 1_000_000.0);
        assert_eq!(event.eta_remaining, Duration::from_secs(9));
        assert_eq!(event.eta_total, Duration::from_secs(10));
        assert_eq!(event.remaining().seconds, 9);
        assert!((event.fraction_done() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_huge_eta_saturates() {
        let event = ProgressEvent::measure(1, u128::MAX, 1_000_000_000).unwrap();
        assert_eq!(event.eta_total, Duration::MAX);
        assert!(event.total().years > 0);
    }
}
