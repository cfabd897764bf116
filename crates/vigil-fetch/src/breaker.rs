//! Process-wide circuit breaker guarding all external calls.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use vigil_core::constants::{BREAKER_FAILURE_THRESHOLD, BREAKER_RESET_SECS};
use vigil_core::errors::FetchError;

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_failures: u32,
    open_until: Option<DateTime<Utc>>,
}

/// Opens after a run of consecutive failures and fast-fails every call for a
/// fixed reset window. After the window the next call passes through
/// (half-open); its outcome decides whether the breaker closes or re-opens.
///
/// Time is injected so tests can drive the reset window without sleeping.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    failure_threshold: u32,
    reset_window: Duration,
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::with_limits(BREAKER_FAILURE_THRESHOLD, BREAKER_RESET_SECS)
    }

    /// Custom threshold and reset window (seconds).
    pub fn with_limits(failure_threshold: u32, reset_secs: i64) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            failure_threshold,
            reset_window: Duration::seconds(reset_secs),
        }
    }

    /// Gate a call. `Err(CircuitOpen)` while the reset window is running;
    /// `Ok` once it has elapsed, letting one half-open attempt through.
    pub fn check(&self, now: DateTime<Utc>) -> Result<(), FetchError> {
        let state = self.lock();
        match state.open_until {
            Some(until) if now < until => Err(FetchError::CircuitOpen {
                retry_after_secs: (until - now).num_seconds().max(1),
            }),
            _ => Ok(()),
        }
    }

    /// A call succeeded: close the breaker and zero the failure run.
    pub fn record_success(&self) {
        let mut state = self.lock();
        if state.open_until.is_some() {
            tracing::info!("breaker: closed after successful half-open call");
        }
        state.consecutive_failures = 0;
        state.open_until = None;
    }

    /// A call failed. Opens the breaker when the run reaches the threshold;
    /// a failure during half-open re-opens immediately since the counter is
    /// still at the threshold.
    pub fn record_failure(&self, now: DateTime<Utc>) {
        let mut state = self.lock();
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        if state.consecutive_failures >= self.failure_threshold {
            let until = now + self.reset_window;
            if state.open_until.map_or(true, |u| u < until) {
                tracing::warn!(
                    consecutive_failures = state.consecutive_failures,
                    open_secs = self.reset_window.num_seconds(),
                    "breaker: opened"
                );
                state.open_until = Some(until);
            }
        }
    }

    /// Current counters, for the diagnostics surface.
    pub fn snapshot(&self) -> BreakerSnapshot {
        let state = self.lock();
        BreakerSnapshot {
            consecutive_failures: state.consecutive_failures,
            open_until: state.open_until,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BreakerState> {
        // A poisoned lock only means a panic mid-update; the counters are
        // still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the breaker state.
#[derive(Debug, Clone, Copy)]
pub struct BreakerSnapshot {
    pub consecutive_failures: u32,
    pub open_until: Option<DateTime<Utc>>,
}

impl BreakerSnapshot {
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.open_until.is_some_and(|u| now < u)
    }
}
