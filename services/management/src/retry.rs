use std::time::Duration;

use winazure_core::{Error, Result};

/// Capped exponential backoff used while waiting on an operation.
///
/// Delays are `initial_delay, initial_delay * multiplier, ...`, each clamped
/// to `max_delay` unless `max_delay` is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    initial_delay: Duration,
    multiplier: f64,
    max_delay: Duration,
    max_retries: Option<usize>,
}

impl Default for RetryPolicy {
    /// 2s, 4s, 8s, 16s, then 20s forever.
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            multiplier: 2.0,
            max_delay: Duration::from_secs(20),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given first delay and growth factor.
    ///
    /// The multiplier must be a finite number greater than one.
    pub fn new(initial_delay: Duration, multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 1.0 {
            return Err(Error::config_invalid("backoff multiplier must be greater than 1")
                .with_context(format!("multiplier: {multiplier}")));
        }

        Ok(Self {
            initial_delay,
            multiplier,
            max_delay: Duration::ZERO,
            max_retries: None,
        })
    }

    /// Clamp every delay to `max_delay`. Zero disables the ceiling.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Bound the number of sleeps. `None` waits forever.
    pub fn with_max_retries(mut self, max_retries: Option<usize>) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// First delay.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Growth factor between two delays.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Delay ceiling, zero when unbounded.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Maximum number of sleeps.
    pub fn max_retries(&self) -> Option<usize> {
        self.max_retries
    }

    /// Sequence of delays for this policy.
    pub fn backoff(&self) -> Backoff {
        Backoff {
            current: self.initial_delay,
            multiplier: self.multiplier,
            max_delay: self.max_delay,
        }
    }
}

/// Endless iterator over the delays of a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct Backoff {
    current: Duration,
    multiplier: f64,
    max_delay: Duration,
}

impl Backoff {
    fn clamp(&self, delay: Duration) -> Duration {
        if self.max_delay.is_zero() {
            delay
        } else {
            delay.min(self.max_delay)
        }
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.clamp(self.current);
        if delay == self.current {
            self.current = Duration::try_from_secs_f64(self.current.as_secs_f64() * self.multiplier)
                .unwrap_or(Duration::MAX);
        }
        Some(delay)
    }
}
