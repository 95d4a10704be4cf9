//! Shared fakes for panel client tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use mddi_api::error::{Error, Result};
use mddi_api::irq::{InterruptController, IrqHandler, IrqResource, IrqTrigger};
use mddi_api::link::{BridgeChip, BridgeResult, LinkController};
use mddi_api::panel::{FbData, FbResource, PanelCaps};
use mddi_api::power::{WakeLock, WakeLockKind, WakeLockProvider};
use mddi_epson::{EpsonPanel, PanelConfig, PanelResources};

pub const VSYNC_IRQ: u32 = 42;

pub const FB_DATA: FbData = FbData {
    xres: 320,
    yres: 480,
    width_mm: 48,
    height_mm: 72,
    output_format: 0,
};

/// Link that counts activations
#[derive(Default)]
pub struct FakeLink {
    pub activations: AtomicUsize,
    pub suspends: AtomicUsize,
    pub resumes: AtomicUsize,
    pub bridge: Mutex<Option<Arc<FakeBridge>>>,
}

impl FakeLink {
    pub fn with_bridge(bridge: Arc<FakeBridge>) -> Arc<Self> {
        Arc::new(Self {
            bridge: Mutex::new(Some(bridge)),
            ..Default::default()
        })
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }
}

impl LinkController for FakeLink {
    fn activate_link(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
    }

    fn suspend(&self) {
        self.suspends.fetch_add(1, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.resumes.fetch_add(1, Ordering::SeqCst);
    }

    fn bridge(&self) -> Arc<dyn BridgeChip> {
        let bridge = self.bridge.lock().unwrap().clone();
        bridge.unwrap_or_else(|| Arc::new(FakeBridge::default()))
    }

    fn fb_resource(&self) -> Option<FbResource> {
        Some(FbResource { start: 0x0300_0000, size: 0x0010_0000 })
    }
}

/// Bridge with configurable capabilities
#[derive(Default)]
pub struct FakeBridge {
    pub caps: PanelCaps,
    pub inits: AtomicUsize,
    pub uninits: AtomicUsize,
}

impl FakeBridge {
    pub fn with_caps(caps: PanelCaps) -> Arc<Self> {
        Arc::new(Self { caps, ..Default::default() })
    }
}

impl BridgeChip for FakeBridge {
    fn init(&self) -> BridgeResult {
        self.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn uninit(&self) -> BridgeResult {
        self.uninits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn blank(&self) -> BridgeResult {
        Ok(())
    }

    fn unblank(&self) -> BridgeResult {
        Ok(())
    }

    fn panel_caps(&self) -> PanelCaps {
        self.caps
    }

    fn fb_data(&self) -> FbData {
        FB_DATA
    }
}

/// Interrupt controller that lets tests raise lines by hand
#[derive(Default)]
pub struct FakeIrqController {
    pub handlers: Mutex<Vec<(u32, IrqTrigger, &'static str, Arc<dyn IrqHandler>)>>,
    pub freed: Mutex<Vec<u32>>,
    pub refuse: Option<i32>,
}

impl FakeIrqController {
    pub fn refusing(errno: i32) -> Arc<Self> {
        Arc::new(Self { refuse: Some(errno), ..Default::default() })
    }

    /// Deliver one edge on `irq`. Returns false if nothing is subscribed.
    pub fn fire(&self, irq: u32) -> bool {
        let handler = self
            .handlers
            .lock()
            .unwrap()
            .iter()
            .find(|entry| entry.0 == irq)
            .map(|entry| entry.3.clone());
        match handler {
            Some(handler) => {
                handler.handle_irq(irq);
                true
            }
            None => false,
        }
    }

    pub fn subscribed(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}

impl InterruptController for FakeIrqController {
    fn request_irq(
        &self,
        irq: u32,
        trigger: IrqTrigger,
        name: &'static str,
        handler: Arc<dyn IrqHandler>,
    ) -> std::result::Result<(), i32> {
        if let Some(errno) = self.refuse {
            return Err(errno);
        }
        self.handlers.lock().unwrap().push((irq, trigger, name, handler));
        Ok(())
    }

    fn free_irq(&self, irq: u32) {
        self.handlers.lock().unwrap().retain(|entry| entry.0 != irq);
        self.freed.lock().unwrap().push(irq);
    }
}

/// Wake lock that records its hold depth
#[derive(Default)]
pub struct FakeWakeLock {
    pub depth: AtomicUsize,
    pub acquisitions: AtomicUsize,
}

impl WakeLock for FakeWakeLock {
    fn lock(&self) {
        self.depth.fetch_add(1, Ordering::SeqCst);
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
    }

    fn unlock(&self) {
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Hands out one shared wake lock, or fails
#[derive(Default)]
pub struct FakeWakeLocks {
    pub lock: Arc<FakeWakeLock>,
    pub created: Mutex<Vec<(WakeLockKind, &'static str)>>,
    pub fail: bool,
}

impl WakeLockProvider for FakeWakeLocks {
    fn create(&self, kind: WakeLockKind, name: &'static str) -> Result<Arc<dyn WakeLock>> {
        if self.fail {
            return Err(Error::OutOfMemory);
        }
        self.created.lock().unwrap().push((kind, name));
        Ok(self.lock.clone() as Arc<dyn WakeLock>)
    }
}

/// Everything a probed panel is bound to
pub struct Rig {
    pub link: Arc<FakeLink>,
    pub bridge: Arc<FakeBridge>,
    pub irqs: Arc<FakeIrqController>,
    pub wake_locks: FakeWakeLocks,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_caps(PanelCaps::empty())
    }

    pub fn with_caps(caps: PanelCaps) -> Self {
        let bridge = FakeBridge::with_caps(caps);
        Self {
            link: FakeLink::with_bridge(bridge.clone()),
            bridge,
            irqs: Arc::new(FakeIrqController::default()),
            wake_locks: FakeWakeLocks::default(),
        }
    }

    pub fn probe(&self, config: PanelConfig) -> Result<EpsonPanel> {
        let resources = [IrqResource::new("vsync", VSYNC_IRQ)];
        self.probe_with(config, &resources)
    }

    pub fn probe_with(&self, config: PanelConfig, irqs: &[IrqResource]) -> Result<EpsonPanel> {
        EpsonPanel::probe(
            config,
            PanelResources {
                link: self.link.clone(),
                irqs,
                irq_controller: self.irqs.clone(),
                wake_locks: &self.wake_locks,
            },
        )
    }
}

/// Periodic VSYNC source driving a handler from its own thread
pub struct VsyncSource {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<usize>>,
}

impl VsyncSource {
    pub fn start(period: Duration, mut edge: impl FnMut() + Send + 'static) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let thread = thread::spawn(move || {
            let mut edges = 0;
            while !flag.load(Ordering::SeqCst) {
                thread::sleep(period);
                edge();
                edges += 1;
            }
            edges
        });
        Self { stop, thread: Some(thread) }
    }

    /// Stop the source and return how many edges it delivered
    pub fn stop(mut self) -> usize {
        self.stop.store(true, Ordering::SeqCst);
        self.thread
            .take()
            .map(|thread| thread.join().unwrap())
            .unwrap_or(0)
    }
}

impl Drop for VsyncSource {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
