//! Panel client configuration

use core::time::Duration;

use mddi_api::error::{invalid_config, Result};
use mddi_api::irq::IrqTrigger;

/// Ceiling on a blocking VSYNC wait
pub const DEFAULT_VSYNC_TIMEOUT: Duration = Duration::from_millis(500);

/// Configuration for one bound panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// How long `wait_vsync` blocks without an edge
    pub vsync_timeout: Duration,
    /// Name of the VSYNC interrupt resource
    pub irq_name: &'static str,
    pub irq_trigger: IrqTrigger,
    /// Name of the idle wake lock held around suspend/resume
    pub wake_lock_name: &'static str,
    /// Panel device published to the framebuffer layer
    pub device_name: &'static str,
    pub device_id: i32,
    /// Companion device published when the bridge supports CABC
    pub cabc_device_name: &'static str,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            vsync_timeout: DEFAULT_VSYNC_TIMEOUT,
            irq_name: "vsync",
            irq_trigger: IrqTrigger::FallingEdge,
            wake_lock_name: "eps_idle_lock",
            device_name: "msm_panel",
            device_id: 0,
            cabc_device_name: "eps_cabc",
        }
    }
}

impl PanelConfig {
    pub fn with_vsync_timeout(mut self, timeout: Duration) -> Self {
        self.vsync_timeout = timeout;
        self
    }

    pub fn with_irq(mut self, name: &'static str, trigger: IrqTrigger) -> Self {
        self.irq_name = name;
        self.irq_trigger = trigger;
        self
    }

    pub fn with_device_id(mut self, id: i32) -> Self {
        self.device_id = id;
        self
    }

    pub fn with_wake_lock_name(mut self, name: &'static str) -> Self {
        self.wake_lock_name = name;
        self
    }

    /// Reject configurations a panel cannot be bound with
    pub fn validate(&self) -> Result<()> {
        if self.vsync_timeout.is_zero() {
            return Err(invalid_config("vsync timeout must be non-zero"));
        }
        if self.irq_name.is_empty() {
            return Err(invalid_config("irq name must not be empty"));
        }
        if self.wake_lock_name.is_empty() {
            return Err(invalid_config("wake lock name must not be empty"));
        }
        if self.device_name.is_empty() {
            return Err(invalid_config("device name must not be empty"));
        }
        Ok(())
    }
}
