//! MDDI Epson panel client
//!
//! Glue between an Epson MDDI bridge panel and the framebuffer layer. The
//! bridge signals VSYNC on a dedicated interrupt line; this crate turns that
//! edge into the two VSYNC consumption models the framebuffer uses and
//! sequences panel power around the link and the bridge.
//!
//! # Architecture
//!
//! - **Vsync**: interrupt latch, one-shot callback slot and per-panel wait
//!   queue
//! - **Power**: suspend/resume/blank/unblank sequencing under the idle wake
//!   lock
//! - **Panel**: probe/remove binding and the `PanelOps` implementation
//! - **Config**: panel configuration and defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use mddi_epson::{EpsonPanel, PanelConfig, PanelResources};
//! use mddi_api::panel::PanelOps;
//!
//! let panel = EpsonPanel::probe(PanelConfig::default(), resources)?;
//! panel.unblank()?;
//! panel.wait_vsync();
//! ```

pub mod config;
pub mod panel;
pub mod power;
pub mod vsync;

pub use crate::config::{PanelConfig, DEFAULT_VSYNC_TIMEOUT};
pub use crate::panel::{EpsonPanel, PanelResources};
pub use crate::power::{LinkPower, PowerSequencer, PowerState};
pub use crate::vsync::{VsyncStats, VsyncSync};

static_assertions::assert_impl_all!(VsyncSync: Send, Sync, mddi_api::irq::IrqHandler);
static_assertions::assert_impl_all!(PowerSequencer: Send, Sync);
static_assertions::assert_impl_all!(EpsonPanel: Send, Sync, mddi_api::panel::PanelOps);
