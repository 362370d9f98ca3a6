use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide tally of served summary requests. Not persisted anywhere;
/// restarts reset it to zero.
pub struct SearchCounter(AtomicU64);

pub static SEARCHES: SearchCounter = SearchCounter::new();

impl SearchCounter {
    pub const fn new() -> Self {
        SearchCounter(AtomicU64::new(0))
    }

    /// Records one request and returns the new total.
    pub fn record(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Tests

#[test]
fn counter_increments_per_request() {
    let counter = SearchCounter::new();
    assert_eq!(counter.count(), 0);
    assert_eq!(counter.record(), 1);
    assert_eq!(counter.record(), 2);
    assert_eq!(counter.count(), 2);
}
