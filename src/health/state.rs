//! Liveness state machine.
//!
//! # State Transitions
//! ```text
//! Healthy → Unhealthy: consecutive failures >= failure_threshold
//! Unhealthy → Healthy: one successful probe
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::observability::metrics;

/// Shared liveness verdict updated by the monitor and read by `/health`.
#[derive(Debug)]
pub struct LivenessState {
    healthy: AtomicBool,
    consecutive_failures: AtomicU32,
    failure_threshold: u32,
}

impl LivenessState {
    /// Create a new state, starting healthy.
    pub fn new(failure_threshold: u32) -> Self {
        Self {
            healthy: AtomicBool::new(true),
            consecutive_failures: AtomicU32::new(0),
            failure_threshold,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Relaxed)
    }

    /// Record a successful probe. Returns true if the state flipped back to
    /// healthy.
    pub fn record_success(&self) -> bool {
        self.consecutive_failures.store(0, Ordering::Relaxed);
        let recovered = !self.healthy.swap(true, Ordering::Relaxed);
        if recovered {
            tracing::info!("Liveness restored");
        }
        metrics::record_health(true);
        recovered
    }

    /// Record a failed probe. Returns true if this failure crossed the
    /// threshold and flipped the state to unhealthy.
    pub fn record_failure(&self) -> bool {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.failure_threshold {
            let flipped = self.healthy.swap(false, Ordering::Relaxed);
            metrics::record_health(false);
            if flipped {
                tracing::warn!(
                    consecutive_failures = failures,
                    "Marking service unhealthy"
                );
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn needs_threshold_failures_to_flip() {
        let state = LivenessState::new(3);
        assert!(!state.record_failure());
        assert!(!state.record_failure());
        assert!(state.is_healthy());
        assert!(state.record_failure());
        assert!(!state.is_healthy());
        assert_eq!(state.consecutive_failures(), 3);
    }

    #[test]
    fn one_success_restores() {
        let state = LivenessState::new(2);
        state.record_failure();
        state.record_failure();
        assert!(!state.is_healthy());
        assert!(state.record_success());
        assert!(state.is_healthy());
        assert_eq!(state.consecutive_failures(), 0);
    }

    #[test]
    fn success_resets_the_counter() {
        let state = LivenessState::new(3);
        state.record_failure();
        state.record_failure();
        state.record_success();
        state.record_failure();
        state.record_failure();
        assert!(state.is_healthy());
    }

    #[test]
    fn flip_reported_only_once() {
        let state = LivenessState::new(1);
        assert!(state.record_failure());
        assert!(!state.record_failure());
    }
}
