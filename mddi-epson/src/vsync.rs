//! VSync (Vertical Synchronization) support
//!
//! The bridge raises a falling edge on its VSYNC line once per frame. The
//! edge is latched in `pending` until a consumer takes it, and the link has
//! to be reactivated before the bridge reports the next one.
//!
//! Consumers either block in [`VsyncSync::wait_vsync`] or register a
//! one-shot callback with [`VsyncSync::request_vsync`]. Both share the same
//! latch so an edge is never counted twice.

use std::sync::{Arc, Condvar, Mutex as WaitLock, PoisonError};
use std::time::Duration;

use log::{debug, error, trace};
use mddi_api::irq::{IrqHandler, IrqReturn};
use mddi_api::link::LinkController;
use mddi_api::panel::{VsyncCallback, VsyncWait};
use mddi_api::sync::{AtomicBool, EventCounter, Mutex, Ordering};

/// Snapshot of VSYNC activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VsyncStats {
    /// Edges delivered by the interrupt handler
    pub edges: u64,
    /// Registered callbacks that have been run
    pub callbacks: u64,
    /// Times the link was reactivated
    pub rearms: u64,
    /// Blocking waits that ran into the timeout
    pub timeouts: u64,
}

#[derive(Debug, Default)]
struct VsyncCounters {
    edges: EventCounter,
    callbacks: EventCounter,
    rearms: EventCounter,
    timeouts: EventCounter,
}

/// Waiters of one panel
///
/// The lock only orders the waiter's condition check against the
/// handler's notify; nothing is stored behind it.
#[derive(Debug, Default)]
struct WaitQueue {
    lock: WaitLock<()>,
    cond: Condvar,
}

impl WaitQueue {
    /// Block until `ready` holds or `timeout` elapses. Returns `ready()`.
    fn wait_event_timeout(&self, timeout: Duration, ready: impl Fn() -> bool) -> bool {
        let guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (_guard, _) = self
            .cond
            .wait_timeout_while(guard, timeout, |_| !ready())
            .unwrap_or_else(PoisonError::into_inner);
        ready()
    }

    fn wake_up(&self) {
        drop(self.lock.lock().unwrap_or_else(PoisonError::into_inner));
        self.cond.notify_all();
    }
}

/// VSYNC synchronizer for one panel
pub struct VsyncSync {
    link: Arc<dyn LinkController>,
    /// Set by the interrupt handler, cleared by consumers
    pending: AtomicBool,
    /// Bumped once per edge; waiters watch it instead of `pending` so one
    /// edge ends every wait in progress
    generation: EventCounter,
    /// At most one outstanding registration
    callback: Mutex<Option<Arc<dyn VsyncCallback>>>,
    waiters: WaitQueue,
    timeout: Duration,
    counters: VsyncCounters,
}

impl VsyncSync {
    pub fn new(link: Arc<dyn LinkController>, timeout: Duration) -> Self {
        Self {
            link,
            pending: AtomicBool::new(false),
            generation: EventCounter::new(),
            callback: Mutex::new(None),
            waiters: WaitQueue::default(),
            timeout,
            counters: VsyncCounters::default(),
        }
    }

    /// Register `callback` for the next edge.
    ///
    /// A latched edge is acknowledged first so the callback only sees an
    /// edge that happens after this call. Replaces any earlier registration
    /// that has not fired yet.
    pub fn request_vsync(&self, callback: Arc<dyn VsyncCallback>) {
        if self.callback.lock().replace(callback).is_some() {
            debug!("vsync: replacing callback that has not fired");
        }
        if self.pending.swap(false, Ordering::AcqRel) {
            self.rearm();
        }
    }

    /// Drop whatever the link has latched and rearm detection
    pub fn clear_vsync(&self) {
        self.rearm();
    }

    /// Block until the next edge, at most for the configured timeout.
    ///
    /// A timeout is logged and reported, never treated as a failure.
    pub fn wait_vsync(&self) -> VsyncWait {
        let seen = self.generation.get();
        if self.pending.swap(false, Ordering::AcqRel) {
            // clears the interrupt
            self.rearm();
        }

        let edge = self
            .waiters
            .wait_event_timeout(self.timeout, || self.generation.get() != seen);

        // interrupt clears when screen dma starts
        self.pending.store(false, Ordering::Release);

        if edge {
            VsyncWait::Edge
        } else {
            self.counters.timeouts.increment();
            error!("timeout waiting for VSYNC");
            VsyncWait::TimedOut
        }
    }

    /// Interrupt entry point for one VSYNC edge
    pub fn vsync_interrupt(&self) {
        self.pending.store(true, Ordering::Release);
        self.generation.increment();
        let edge = self.counters.edges.increment();

        let callback = self.callback.lock().take();
        if let Some(callback) = callback {
            callback.on_vsync();
            self.counters.callbacks.increment();
        }

        self.waiters.wake_up();
        trace!("vsync: edge {}", edge);
    }

    /// Whether an edge has been latched and not yet consumed
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Whether a registered callback is waiting for an edge
    pub fn has_callback(&self) -> bool {
        self.callback.lock().is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stats(&self) -> VsyncStats {
        VsyncStats {
            edges: self.counters.edges.get(),
            callbacks: self.counters.callbacks.get(),
            rearms: self.counters.rearms.get(),
            timeouts: self.counters.timeouts.get(),
        }
    }

    fn rearm(&self) {
        self.counters.rearms.increment();
        self.link.activate_link();
    }
}

impl IrqHandler for VsyncSync {
    fn handle_irq(&self, _irq: u32) -> IrqReturn {
        self.vsync_interrupt();
        IrqReturn::Handled
    }
}
