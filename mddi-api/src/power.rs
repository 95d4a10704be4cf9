//! Wake locks
//!
//! A wake lock keeps the system out of idle or suspend while it is held.
//! Panel clients only ever hold one through a [`WakeLockGuard`], so the lock
//! is released on every exit path of the sequence it protects.

use alloc::sync::Arc;

use crate::error::Result;

/// What a wake lock keeps the system out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeLockKind {
    /// Blocks system suspend
    Suspend,
    /// Blocks the low-power idle state
    Idle,
}

/// Platform wake lock
pub trait WakeLock: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
    fn name(&self) -> &'static str;
}

/// Creates wake locks for a device
pub trait WakeLockProvider: Send + Sync {
    /// Fails with [`Error::OutOfMemory`](crate::error::Error::OutOfMemory)
    /// when the lock cannot be allocated.
    fn create(&self, kind: WakeLockKind, name: &'static str) -> Result<Arc<dyn WakeLock>>;
}

/// Holds a wake lock until dropped
#[must_use = "the wake lock is released as soon as the guard is dropped"]
pub struct WakeLockGuard<'a> {
    lock: &'a dyn WakeLock,
}

impl<'a> WakeLockGuard<'a> {
    pub fn acquire(lock: &'a dyn WakeLock) -> Self {
        lock.lock();

        #[cfg(feature = "log")]
        log::trace!("wake lock {} held", lock.name());

        Self { lock }
    }
}

impl Drop for WakeLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();

        #[cfg(feature = "log")]
        log::trace!("wake lock {} released", self.lock.name());
    }
}
