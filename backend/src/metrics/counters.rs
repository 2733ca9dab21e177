use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal per-run counters. Latency and percentiles are left to the
/// surrounding harness.
#[derive(Clone, Default, Debug)]
pub struct Counters {
    pub cycles: Arc<AtomicU64>,
    pub cycles_submitted: Arc<AtomicU64>,

    // failure reasons
    pub fetch_failed: Arc<AtomicU64>,
    pub cycles_failed: Arc<AtomicU64>,
    pub submit_failed: Arc<AtomicU64>,

    // submit outcomes
    pub mutations_sent: Arc<AtomicU64>,
    pub bookings_accepted: Arc<AtomicU64>,
    pub bookings_rejected: Arc<AtomicU64>,
}

/// Point-in-time copy of [`Counters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub cycles: u64,
    pub cycles_submitted: u64,
    pub fetch_failed: u64,
    pub cycles_failed: u64,
    pub submit_failed: u64,
    pub mutations_sent: u64,
    pub bookings_accepted: u64,
    pub bookings_rejected: u64,
}

impl CounterSnapshot {
    /// Share of reported outcomes the service rejected, if any were reported.
    pub fn conflict_rate(&self) -> Option<f64> {
        let total = self.bookings_accepted + self.bookings_rejected;
        (total > 0).then(|| self.bookings_rejected as f64 / total as f64)
    }
}

impl Counters {
    pub fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        let load = |c: &Arc<AtomicU64>| c.load(Ordering::Relaxed);

        CounterSnapshot {
            cycles: load(&self.cycles),
            cycles_submitted: load(&self.cycles_submitted),
            fetch_failed: load(&self.fetch_failed),
            cycles_failed: load(&self.cycles_failed),
            submit_failed: load(&self.submit_failed),
            mutations_sent: load(&self.mutations_sent),
            bookings_accepted: load(&self.bookings_accepted),
            bookings_rejected: load(&self.bookings_rejected),
        }
    }
}
