//! Circuit breaker for provider transport failures
//!
//! State is derived from two numbers rather than stored as an enum: the breaker
//! is open while `now < open_until` and closed otherwise. A call made after the
//! window has elapsed is an implicit probe; its outcome either fully closes the
//! breaker or re-opens a fresh window of the same fixed length.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;
pub const DEFAULT_OPEN_WINDOW: Duration = Duration::from_secs(60);
/// Longest accepted open window: one day.
pub const MAX_OPEN_WINDOW_SECS: u64 = 24 * 60 * 60;

/// Breaker tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerConfig {
    /// Consecutive transport failures that open the breaker
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// How long the breaker stays open, in seconds
    #[serde(default = "default_open_window_secs")]
    pub open_window_secs: u64,
}

fn default_failure_threshold() -> u32 {
    DEFAULT_FAILURE_THRESHOLD
}

fn default_open_window_secs() -> u64 {
    DEFAULT_OPEN_WINDOW.as_secs()
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            open_window_secs: default_open_window_secs(),
        }
    }
}

impl BreakerConfig {
    pub fn open_window(&self) -> Duration {
        Duration::from_secs(self.open_window_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.failure_threshold == 0 {
            return Err("failure_threshold must be at least 1".to_string());
        }
        if self.open_window_secs == 0 {
            return Err("open_window_secs must be at least 1".to_string());
        }
        if self.open_window_secs > MAX_OPEN_WINDOW_SECS {
            return Err(format!(
                "open_window_secs must be at most {}",
                MAX_OPEN_WINDOW_SECS
            ));
        }
        Ok(())
    }
}

/// Source of monotonic time for the breaker.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}

/// Derived breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
}

/// Point-in-time view of the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub consecutive_failures: u32,
    pub open_until: Option<Instant>,
    pub state: BreakerState,
}

/// Consecutive-failure breaker. Not synchronized; callers hold the lock.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    consecutive_failures: u32,
    /// `None` plays the role of "0": never opened or fully reset.
    open_until: Option<Instant>,
    failure_threshold: u32,
    open_window: Duration,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(&BreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: &BreakerConfig) -> Self {
        Self {
            consecutive_failures: 0,
            open_until: None,
            failure_threshold: config.failure_threshold.max(1),
            open_window: config
                .open_window()
                .min(Duration::from_secs(MAX_OPEN_WINDOW_SECS)),
        }
    }

    pub fn is_open(&self, now: Instant) -> bool {
        matches!(self.open_until, Some(until) if now < until)
    }

    pub fn state(&self, now: Instant) -> BreakerState {
        if self.is_open(now) {
            BreakerState::Open
        } else {
            BreakerState::Closed
        }
    }

    /// Record a retryable transport failure. Returns true when this failure
    /// (re-)opened the breaker.
    pub fn record_failure(&mut self, now: Instant) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= self.failure_threshold {
            // open_window is clamped in new(); checked_add keeps this panic-free regardless.
            self.open_until = Some(now.checked_add(self.open_window).unwrap_or(now));
            return true;
        }
        false
    }

    /// Record a transport success; fully closes the breaker.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
        self.open_until = None;
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn open_until(&self) -> Option<Instant> {
        self.open_until
    }

    pub fn snapshot(&self, now: Instant) -> BreakerSnapshot {
        BreakerSnapshot {
            consecutive_failures: self.consecutive_failures,
            open_until: self.open_until,
            state: self.state(now),
        }
    }
}
