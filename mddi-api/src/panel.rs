//! Panel operations contract
//!
//! What the framebuffer layer sees of a panel: power sequencing, the two
//! VSYNC consumption models, the advertised capability set and the
//! framebuffer description.

use alloc::sync::Arc;
use bitflags::bitflags;
use core::fmt;

use crate::error::Result;
use crate::link::LinkController;

bitflags! {
    /// Panel capabilities
    ///
    /// Always an explicit set: a panel advertises exactly the bits it
    /// supports and nothing else.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PanelCaps: u32 {
        /// Panel accepts updates of a sub-rectangle of the screen
        const PARTIAL_UPDATES = 1 << 0;
        /// Content adaptive backlight control
        const CABC = 1 << 1;
    }
}

impl PanelCaps {
    /// Whether partial-screen updates may be issued
    pub fn supports_partial_updates(self) -> bool {
        self.contains(PanelCaps::PARTIAL_UPDATES)
    }
}

/// Framebuffer description of the attached panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FbData {
    pub xres: u32,
    pub yres: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub output_format: u32,
}

/// Framebuffer memory region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FbResource {
    pub start: usize,
    pub size: usize,
}

/// Device descriptor a panel client hands to the platform for registration
#[derive(Clone)]
pub struct PanelDevice {
    pub name: &'static str,
    pub id: i32,
    pub resource: Option<FbResource>,
    /// Platform data: the link a driver bound to this device talks through
    pub link: Option<Arc<dyn LinkController>>,
}

impl PanelDevice {
    pub fn new(name: &'static str, id: i32) -> Self {
        Self { name, id, resource: None, link: None }
    }

    pub fn with_resource(mut self, resource: Option<FbResource>) -> Self {
        self.resource = resource;
        self
    }

    pub fn with_link(mut self, link: Arc<dyn LinkController>) -> Self {
        self.link = Some(link);
        self
    }
}

impl fmt::Debug for PanelDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDevice")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("resource", &self.resource)
            .field("link", &self.link.is_some())
            .finish()
    }
}

/// Callback run on the next VSYNC edge
///
/// Invoked from interrupt context: implementations must not block.
pub trait VsyncCallback: Send + Sync {
    fn on_vsync(&self);
}

impl<F> VsyncCallback for F
where
    F: Fn() + Send + Sync,
{
    fn on_vsync(&self) {
        self()
    }
}

/// How a blocking VSYNC wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VsyncWait {
    /// An edge arrived during the wait
    Edge,
    /// No edge arrived before the timeout
    TimedOut,
}

impl VsyncWait {
    pub fn timed_out(self) -> bool {
        self == VsyncWait::TimedOut
    }
}

/// Operations a display pipeline invokes on a panel
///
/// Power operations are serialized by the caller and may sleep. VSYNC
/// operations may be called from any consumer context.
pub trait PanelOps: Send + Sync {
    fn suspend(&self) -> Result<()>;
    fn resume(&self) -> Result<()>;
    fn blank(&self) -> Result<()>;
    fn unblank(&self) -> Result<()>;

    /// Block until the next VSYNC edge or the panel's timeout
    fn wait_vsync(&self) -> VsyncWait;

    /// Run `callback` once on the next VSYNC edge
    fn request_vsync(&self, callback: Arc<dyn VsyncCallback>);

    /// Drop any latched VSYNC and rearm detection
    fn clear_vsync(&self);

    fn caps(&self) -> PanelCaps;
    fn fb_data(&self) -> FbData;
}
