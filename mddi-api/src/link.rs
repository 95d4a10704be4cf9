//! Display link and bridge chip capabilities
//!
//! The link controller owns the physical MDDI link. The bridge chip sits on
//! the far side of the link and runs its own register sequences; a link
//! carries exactly one bridge as its private client data.

use alloc::sync::Arc;

use crate::panel::{FbData, FbResource, PanelCaps};

/// Raw result of a bridge sequence: `Err` carries the chip driver's code
pub type BridgeResult = core::result::Result<(), i32>;

/// Bridge chip register sequences
///
/// Every sequence may sleep and must only be called from a context that can
/// block.
pub trait BridgeChip: Send + Sync {
    /// Power up and program the panel
    fn init(&self) -> BridgeResult;

    /// Put the panel into its lowest power state
    fn uninit(&self) -> BridgeResult;

    /// Turn the panel output off while keeping it initialized
    fn blank(&self) -> BridgeResult;

    /// Turn the panel output back on
    fn unblank(&self) -> BridgeResult;

    /// Capabilities the bridge supports
    fn panel_caps(&self) -> PanelCaps {
        PanelCaps::empty()
    }

    /// Framebuffer geometry of the attached panel
    fn fb_data(&self) -> FbData;
}

/// MDDI link controller
pub trait LinkController: Send + Sync {
    /// Acknowledge the client interrupt and restart link activity.
    ///
    /// Consumer context only; never called from the interrupt handler.
    fn activate_link(&self);

    /// Power down the physical link. May sleep.
    fn suspend(&self);

    /// Power up the physical link. May sleep.
    fn resume(&self);

    /// Bridge chip attached to this link
    fn bridge(&self) -> Arc<dyn BridgeChip>;

    /// Framebuffer memory resource published with the panel device
    fn fb_resource(&self) -> Option<FbResource> {
        None
    }
}
