//! Metrics hooks for filter operations
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use membership_filter::{BloomFilter, Metrics};
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = BloomFilter::memory(1 << 16, 5)
//!     .unwrap()
//!     .with_metrics(metrics.clone());
//!
//! filter.put_str("r1").unwrap();
//! assert!(filter.has_str("r1").unwrap());
//! assert_eq!(metrics.snapshot().puts_performed, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Thread-safe counters for filter activity
#[derive(Default)]
pub struct Metrics {
    /// Filters constructed
    pub filters_created: AtomicU64,
    /// Filters closed
    pub filters_closed: AtomicU64,
    /// `put` calls completed
    pub puts_performed: AtomicU64,
    /// `has` calls completed
    pub lookups_performed: AtomicU64,
    /// `has` calls that answered true (including false positives)
    pub lookups_positive: AtomicU64,
    /// Cumulative `has` time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative `put` time in nanoseconds
    pub put_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_created(&self, _capacity_bits: u64, _hash_count: u32) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filter_closed(&self, _capacity_bits: u64) {
        self.filters_closed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_put(&self, duration: Duration) {
        self.puts_performed.fetch_add(1, Ordering::Relaxed);
        self.put_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            filters_closed: self.filters_closed.load(Ordering::Relaxed),
            puts_performed: self.puts_performed.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            avg_lookup_ns: average(&self.lookup_time_ns, &self.lookups_performed),
            avg_put_ns: average(&self.put_time_ns, &self.puts_performed),
        }
    }

    /// Ratio of positive lookups to all lookups
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.filters_closed.store(0, Ordering::Relaxed);
        self.puts_performed.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.put_time_ns.store(0, Ordering::Relaxed);
    }
}

fn average(total_ns: &AtomicU64, count: &AtomicU64) -> u64 {
    let count = count.load(Ordering::Relaxed);
    if count > 0 {
        total_ns.load(Ordering::Relaxed) / count
    } else {
        0
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub filters_closed: u64,
    pub puts_performed: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub avg_lookup_ns: u64,
    pub avg_put_ns: u64,
}

/// Sink for filter instrumentation
///
/// Implement this to forward filter activity to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, capacity_bits: u64, hash_count: u32);
    fn record_filter_closed(&self, capacity_bits: u64);
    fn record_put(&self, duration: Duration);
    fn record_lookup(&self, duration: Duration, found: bool);
}

/// Recorder used when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: u64, _: u32) {}
    fn record_filter_closed(&self, _: u64) {}
    fn record_put(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, capacity_bits: u64, hash_count: u32) {
        Metrics::record_filter_created(self, capacity_bits, hash_count);
    }

    fn record_filter_closed(&self, capacity_bits: u64) {
        Metrics::record_filter_closed(self, capacity_bits);
    }

    fn record_put(&self, duration: Duration) {
        Metrics::record_put(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }
}
