use std::sync::atomic::{AtomicU64, Ordering};

pub struct CheckoutMetrics {
    charges_created: AtomicU64,
    payments_confirmed: AtomicU64,
    payments_failed: AtomicU64,
}

impl CheckoutMetrics {
    pub fn new() -> Self {
        Self {
            charges_created: AtomicU64::new(0),
            payments_confirmed: AtomicU64::new(0),
            payments_failed: AtomicU64::new(0),
        }
    }

    pub fn increment_created(&self) {
        self.charges_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_confirmed(&self) {
        self.payments_confirmed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_failed(&self) {
        self.payments_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn charges_created(&self) -> u64 {
        self.charges_created.load(Ordering::Relaxed)
    }

    pub fn payments_confirmed(&self) -> u64 {
        self.payments_confirmed.load(Ordering::Relaxed)
    }

    pub fn payments_failed(&self) -> u64 {
        self.payments_failed.load(Ordering::Relaxed)
    }
}

impl Default for CheckoutMetrics {
    fn default() -> Self {
        Self::new()
    }
}
