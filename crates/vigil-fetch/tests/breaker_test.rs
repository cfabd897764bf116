use chrono::{Duration, Utc};
use vigil_core::constants::{BREAKER_FAILURE_THRESHOLD, BREAKER_RESET_SECS};
use vigil_core::errors::FetchError;
use vigil_fetch::CircuitBreaker;

// ── Opening ──────────────────────────────────────────────────────────────

#[test]
fn stays_closed_below_threshold() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD - 1 {
        breaker.record_failure(now);
    }
    assert!(breaker.check(now).is_ok());
}

#[test]
fn opens_at_threshold_and_fast_fails() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD {
        breaker.record_failure(now);
    }

    let err = breaker.check(now).unwrap_err();
    assert!(
        matches!(err, FetchError::CircuitOpen { retry_after_secs } if retry_after_secs > 0),
        "expected CircuitOpen, got {err:?}"
    );
}

#[test]
fn open_for_the_full_reset_window() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD {
        breaker.record_failure(now);
    }

    let just_before = now + Duration::seconds(BREAKER_RESET_SECS - 1);
    assert!(breaker.check(just_before).is_err());
}

// ── Half-open ────────────────────────────────────────────────────────────

#[test]
fn allows_attempt_after_reset_window() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD {
        breaker.record_failure(now);
    }

    let after = now + Duration::seconds(BREAKER_RESET_SECS);
    assert!(breaker.check(after).is_ok());
}

#[test]
fn success_after_window_closes_breaker() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD {
        breaker.record_failure(now);
    }

    let after = now + Duration::seconds(BREAKER_RESET_SECS + 1);
    assert!(breaker.check(after).is_ok());
    breaker.record_success();

    let snapshot = breaker.snapshot();
    assert_eq!(snapshot.consecutive_failures, 0);
    assert!(!snapshot.is_open(after));
}

#[test]
fn failure_during_half_open_reopens() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD {
        breaker.record_failure(now);
    }

    let after = now + Duration::seconds(BREAKER_RESET_SECS + 1);
    assert!(breaker.check(after).is_ok());
    breaker.record_failure(after);

    assert!(breaker.check(after).is_err());
}

// ── Reset ────────────────────────────────────────────────────────────────

#[test]
fn success_resets_the_failure_run() {
    let breaker = CircuitBreaker::new();
    let now = Utc::now();

    for _ in 0..BREAKER_FAILURE_THRESHOLD - 1 {
        breaker.record_failure(now);
    }
    breaker.record_success();
    // A fresh run has to reach the threshold again from zero.
    for _ in 0..BREAKER_FAILURE_THRESHOLD - 1 {
        breaker.record_failure(now);
    }
    assert!(breaker.check(now).is_ok());
}
