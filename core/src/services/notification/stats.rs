//! Delivery outcome counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counts finished delivery attempts
#[derive(Debug, Default)]
pub struct DeliveryStats {
    sent: AtomicU64,
    failed: AtomicU64,
}

/// Point-in-time copy of [`DeliveryStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeliverySnapshot {
    pub sent: u64,
    pub failed: u64,
}

impl DeliverySnapshot {
    pub fn total(&self) -> u64 {
        self.sent + self.failed
    }
}

impl DeliveryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self) {
        self.sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DeliverySnapshot {
        DeliverySnapshot {
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}
