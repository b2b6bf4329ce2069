//! Request outcome counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct Metrics {
    pub tokens_verified: AtomicU64,
    pub tokens_rejected: AtomicU64,
    pub documents_served: AtomicU64,
    pub static_served: AtomicU64,
    pub fetch_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_verify(&self) {
        self.tokens_verified.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reject(&self) {
        self.tokens_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_document(&self) {
        self.documents_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_static(&self) {
        self.static_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            tokens_verified: self.tokens_verified.load(Ordering::Relaxed),
            tokens_rejected: self.tokens_rejected.load(Ordering::Relaxed),
            documents_served: self.documents_served.load(Ordering::Relaxed),
            static_served: self.static_served.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub tokens_verified: u64,
    pub tokens_rejected: u64,
    pub documents_served: u64,
    pub static_served: u64,
    pub fetch_failures: u64,
}
