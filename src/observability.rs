//! Logging setup and loop counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` controls the filter; `info` when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Counters for the poll-dispatch loop
#[derive(Debug, Default)]
pub struct Metrics {
    idle_polls: AtomicU64,
    bootstraps: AtomicU64,
    advances_handled: AtomicU64,
    inspects_handled: AtomicU64,
    requests_rejected: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idle_poll(&self) {
        self.idle_polls.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "idle_polls", "Metric incremented");
    }

    pub fn bootstrap(&self) {
        self.bootstraps.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "bootstraps", "Metric incremented");
    }

    pub fn advance_handled(&self) {
        self.advances_handled.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "advances_handled", "Metric incremented");
    }

    pub fn inspect_handled(&self) {
        self.inspects_handled.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "inspects_handled", "Metric incremented");
    }

    pub fn request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_rejected", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            idle_polls: self.idle_polls.load(Ordering::Relaxed),
            bootstraps: self.bootstraps.load(Ordering::Relaxed),
            advances_handled: self.advances_handled.load(Ordering::Relaxed),
            inspects_handled: self.inspects_handled.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub idle_polls: u64,
    pub bootstraps: u64,
    pub advances_handled: u64,
    pub inspects_handled: u64,
    pub requests_rejected: u64,
}
