use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use ot_core::track::EventName;

#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    received: AtomicU64,
    mapped: AtomicU64,
    rejected: AtomicU64,
    products: AtomicU64,
    order_refunded: AtomicU64,
    order_cancelled: AtomicU64,
    order_completed: AtomicU64,
    order_updated: AtomicU64,
}

impl MetricsRegistry {
    pub fn inc_received(&self, delta: u64) {
        self.inner.received.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self, delta: u64) {
        self.inner.rejected.fetch_add(delta, Ordering::Relaxed);
    }

    /// Count one mapped order under its event name.
    pub fn record_mapped(&self, event: EventName, products: u64) {
        self.inner.mapped.fetch_add(1, Ordering::Relaxed);
        self.inner.products.fetch_add(products, Ordering::Relaxed);
        let counter = match event {
            EventName::OrderRefunded => &self.inner.order_refunded,
            EventName::OrderCancelled => &self.inner.order_cancelled,
            EventName::OrderCompleted => &self.inner.order_completed,
            EventName::OrderUpdated => &self.inner.order_updated,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.inner.received.load(Ordering::Relaxed),
            mapped: self.inner.mapped.load(Ordering::Relaxed),
            rejected: self.inner.rejected.load(Ordering::Relaxed),
            products: self.inner.products.load(Ordering::Relaxed),
            order_refunded: self.inner.order_refunded.load(Ordering::Relaxed),
            order_cancelled: self.inner.order_cancelled.load(Ordering::Relaxed),
            order_completed: self.inner.order_completed.load(Ordering::Relaxed),
            order_updated: self.inner.order_updated.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub mapped: u64,
    pub rejected: u64,
    pub products: u64,
    pub order_refunded: u64,
    pub order_cancelled: u64,
    pub order_completed: u64,
    pub order_updated: u64,
}

impl MetricsSnapshot {
    pub fn count_for(&self, event: EventName) -> u64 {
        match event {
            EventName::OrderRefunded => self.order_refunded,
            EventName::OrderCancelled => self.order_cancelled,
            EventName::OrderCompleted => self.order_completed,
            EventName::OrderUpdated => self.order_updated,
        }
    }

    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            #[serde(flatten)]
            counts: &'a MetricsSnapshot,
            elapsed_ms: Option<u128>,
        }

        let payload = Line {
            label,
            counts: self,
            elapsed_ms: elapsed.map(|d| d.as_millis()),
        };
        serde_json::to_string(&payload).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
