//! MDDI API - Capability interfaces and types for MDDI display panel clients
//!
//! This crate provides the interfaces a panel client consumes from the
//! platform (link controller, bridge chip, interrupt controller, wake locks)
//! and the panel-operations contract it exposes to the framebuffer layer.
//!
//! # Architecture
//!
//! - **Link**: the serial display link and the bridge chip behind it
//! - **Irq**: interrupt subscription and the scoped registration handle
//! - **Power**: wake locks and the scoped wake-lock guard
//! - **Panel**: capability set, framebuffer description, VSYNC callbacks and
//!   the `PanelOps` contract
//! - **Error**: common error type and errno mapping
//!
//! # Usage
//!
//! ```rust
//! use mddi_api::panel::{PanelCaps, VsyncCallback};
//!
//! let caps = PanelCaps::CABC;
//! assert!(!caps.contains(PanelCaps::PARTIAL_UPDATES));
//!
//! let on_vsync = || {};
//! on_vsync.on_vsync();
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod error;
pub mod irq;
pub mod link;
pub mod panel;
pub mod power;
pub mod sync;

// Re-export commonly used types
pub use crate::error::{BridgeOp, Error, Result};
pub use crate::irq::{InterruptController, IrqHandler, IrqRegistration, IrqResource, IrqReturn, IrqTrigger};
pub use crate::link::{BridgeChip, BridgeResult, LinkController};
pub use crate::panel::{FbData, FbResource, PanelCaps, PanelDevice, PanelOps, VsyncCallback, VsyncWait};
pub use crate::power::{WakeLock, WakeLockGuard, WakeLockKind, WakeLockProvider};
