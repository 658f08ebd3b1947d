//! Shared counters for the /health endpoint.
//! Updated by the evaluation handlers, read by the API.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Process-wide evaluation counters.
pub struct HealthState {
    started_at: Instant,
    /// Requests that produced a result.
    evaluations: AtomicU64,
    /// Requests rejected by the engine or the payload parser.
    rejections: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            evaluations: AtomicU64::new(0),
            rejections: AtomicU64::new(0),
        }
    }

    pub fn inc_evaluations(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejections(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn rejections(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::new()
    }
}
