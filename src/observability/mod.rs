//! Observability for the relay client.
//!
//! Tracing instrumentation lives on the dispatch path itself; this module
//! carries the request counters and a helper to install a subscriber.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic request counters, shared between the service and the client.
#[derive(Debug, Default)]
pub struct RequestMetrics {
    requests_total: AtomicU64,
    dispatch_failures: AtomicU64,
    responses_2xx: AtomicU64,
    responses_4xx: AtomicU64,
    responses_5xx: AtomicU64,
    responses_other: AtomicU64,
}

impl RequestMetrics {
    /// Creates a new metrics instance with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted dispatch attempt.
    pub fn record_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a dispatch failure (no response descriptor produced).
    pub fn record_dispatch_failure(&self) {
        self.dispatch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed round trip by status class.
    pub fn record_response(&self, status: u16) {
        let counter = match status {
            200..=299 => &self.responses_2xx,
            400..=499 => &self.responses_4xx,
            500..=599 => &self.responses_5xx,
            _ => &self.responses_other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns a point-in-time snapshot of the counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            dispatch_failures: self.dispatch_failures.load(Ordering::Relaxed),
            responses_2xx: self.responses_2xx.load(Ordering::Relaxed),
            responses_4xx: self.responses_4xx.load(Ordering::Relaxed),
            responses_5xx: self.responses_5xx.load(Ordering::Relaxed),
            responses_other: self.responses_other.load(Ordering::Relaxed),
        }
    }

    /// Resets all counters to zero.
    pub fn reset(&self) {
        self.requests_total.store(0, Ordering::Relaxed);
        self.dispatch_failures.store(0, Ordering::Relaxed);
        self.responses_2xx.store(0, Ordering::Relaxed);
        self.responses_4xx.store(0, Ordering::Relaxed);
        self.responses_5xx.store(0, Ordering::Relaxed);
        self.responses_other.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time view of the request counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Dispatch attempts accepted (valid method token).
    pub requests_total: u64,
    /// Dispatches that failed without a response descriptor.
    pub dispatch_failures: u64,
    /// Round trips with a 2xx status.
    pub responses_2xx: u64,
    /// Round trips with a 4xx status.
    pub responses_4xx: u64,
    /// Round trips with a 5xx status.
    pub responses_5xx: u64,
    /// Round trips with any other status (1xx, 3xx).
    pub responses_other: u64,
}

impl MetricsSnapshot {
    /// Completed round trips, whatever the remote's status class.
    pub fn responses_total(&self) -> u64 {
        self.responses_2xx + self.responses_4xx + self.responses_5xx + self.responses_other
    }
}

/// Installs a global `tracing` fmt subscriber honoring `RUST_LOG`-style
/// filter directives. Intended for binaries and integration tests; returns an
/// error if a subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).try_init()?;
    Ok(())
}
