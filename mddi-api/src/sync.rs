//! Synchronization primitives shared by panel clients
//!
//! State touched from interrupt context is kept behind these primitives:
//! atomics for flags and counters, and a spinning mutex for slots that are
//! held only for a single store or take.

pub use spin::Mutex;
pub use spin::MutexGuard;
pub use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Monotonic event counter readable from any context
#[derive(Debug, Default)]
pub struct EventCounter(AtomicU64);

impl EventCounter {
    pub const fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Record one event and return the new total
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
