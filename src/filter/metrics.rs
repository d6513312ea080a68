//! SHAREBLOOM - Filter Metrics
//! Atomic counters for filter operations, updated lock-free
//! from every thread that shares the filter.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Operation counters for a [`SharedBloomFilter`](super::SharedBloomFilter).
///
/// All counters use `Ordering::Relaxed`; they are for observability only.
#[derive(Debug)]
pub struct FilterMetrics {
    /// Completed `add` calls.
    pub adds: AtomicU64,
    /// Completed `contains` calls.
    pub checks: AtomicU64,
    /// `contains` calls that answered "possibly present".
    pub hits: AtomicU64,
    /// `contains` calls that answered "definitely absent".
    pub misses: AtomicU64,
    /// Bit-store round trips issued (get + set).
    pub store_calls: AtomicU64,
    /// Operations that failed with a store error.
    pub store_errors: AtomicU64,
    /// When the filter was opened.
    opened: Instant,
}

impl FilterMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self {
            adds: AtomicU64::new(0),
            checks: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            store_calls: AtomicU64::new(0),
            store_errors: AtomicU64::new(0),
            opened: Instant::now(),
        }
    }

    pub fn record_add(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_check(&self, present: bool) {
        self.checks.fetch_add(1, Ordering::Relaxed);
        if present {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_store_calls(&self, calls: u64) {
        self.store_calls.fetch_add(calls, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Seconds since the filter was opened.
    pub fn uptime_secs(&self) -> f64 {
        self.opened.elapsed().as_secs_f64()
    }

    /// Completed adds plus checks.
    pub fn total_ops(&self) -> u64 {
        self.adds.load(Ordering::Relaxed) + self.checks.load(Ordering::Relaxed)
    }

    /// Fraction of checks that answered "possibly present".
    pub fn hit_ratio(&self) -> f64 {
        let checks = self.checks.load(Ordering::Relaxed);
        if checks == 0 {
            return 0.0;
        }
        self.hits.load(Ordering::Relaxed) as f64 / checks as f64
    }

    /// Format metrics as a human-readable report.
    pub fn report(&self) -> String {
        format!(
            "\n═══ SHAREBLOOM Filter Metrics ═══\n\
             Operations:\n\
               adds:         {}\n\
               checks:       {}\n\
               hits:         {}\n\
               misses:       {}\n\
               hit ratio:    {:.4}\n\
             Store:\n\
               round trips:  {}\n\
               errors:       {}\n\
             Uptime: {:.2}s",
            self.adds.load(Ordering::Relaxed),
            self.checks.load(Ordering::Relaxed),
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.hit_ratio(),
            self.store_calls.load(Ordering::Relaxed),
            self.store_errors.load(Ordering::Relaxed),
            self.uptime_secs(),
        )
    }
}

impl Default for FilterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
