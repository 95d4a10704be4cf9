//! Epson MDDI panel client
//!
//! Binds one VSYNC interrupt line and one MDDI link to a panel the
//! framebuffer layer can drive. The interrupt is subscribed before the
//! panel is handed out, and dropping the panel frees it.

use std::sync::Arc;

use log::{debug, error, info};
use mddi_api::error::{Error, Result};
use mddi_api::irq::{irq_by_name, InterruptController, IrqRegistration, IrqResource};
use mddi_api::link::LinkController;
use mddi_api::panel::{FbData, PanelCaps, PanelDevice, PanelOps, VsyncCallback, VsyncWait};
use mddi_api::power::{WakeLockKind, WakeLockProvider};

use crate::config::PanelConfig;
use crate::power::{PowerSequencer, PowerState};
use crate::vsync::{VsyncStats, VsyncSync};

/// Platform resources a panel is bound to
pub struct PanelResources<'a> {
    pub link: Arc<dyn LinkController>,
    pub irqs: &'a [IrqResource],
    pub irq_controller: Arc<dyn InterruptController>,
    pub wake_locks: &'a dyn WakeLockProvider,
}

/// A bound Epson panel
pub struct EpsonPanel {
    // Dropped first: no edge reaches `vsync` once the panel starts going away
    irq: IrqRegistration,
    vsync: Arc<VsyncSync>,
    power: PowerSequencer,
    link: Arc<dyn LinkController>,
    caps: PanelCaps,
    fb_data: FbData,
    device: PanelDevice,
    cabc_device: Option<PanelDevice>,
}

impl EpsonPanel {
    /// Bind a panel to its link and VSYNC interrupt.
    ///
    /// Nothing stays acquired when this fails.
    pub fn probe(config: PanelConfig, resources: PanelResources<'_>) -> Result<Self> {
        config.validate()?;
        debug!("mddi epson client: probe {}.{}", config.device_name, config.device_id);

        let PanelResources { link, irqs, irq_controller, wake_locks } = resources;
        let bridge = link.bridge();
        let bridge_caps = bridge.panel_caps();

        let cabc_device = if bridge_caps.contains(PanelCaps::CABC) {
            info!("CABC enabled");
            Some(PanelDevice::new(config.cabc_device_name, 0).with_link(link.clone()))
        } else {
            None
        };

        let irq_num = irq_by_name(irqs, config.irq_name)
            .ok_or(Error::IrqUnavailable(config.irq_name))?;

        let vsync = Arc::new(VsyncSync::new(link.clone(), config.vsync_timeout));
        let irq = IrqRegistration::request(
            irq_controller,
            irq_num,
            config.irq_trigger,
            config.irq_name,
            vsync.clone(),
        )
        .inspect_err(|err| error!("mddi epson client: vsync setup failed: {}", err))?;

        let wake_lock = wake_locks.create(WakeLockKind::Idle, config.wake_lock_name)?;
        let power = PowerSequencer::new(link.clone(), bridge.clone(), wake_lock);

        let device =
            PanelDevice::new(config.device_name, config.device_id).with_resource(link.fb_resource());

        Ok(Self {
            irq,
            vsync,
            power,
            caps: bridge_caps.difference(PanelCaps::PARTIAL_UPDATES),
            fb_data: bridge.fb_data(),
            link,
            device,
            cabc_device,
        })
    }

    /// Panel device to publish to the framebuffer layer
    pub fn device(&self) -> &PanelDevice {
        &self.device
    }

    /// CABC companion device, present when the bridge supports CABC
    pub fn cabc_device(&self) -> Option<&PanelDevice> {
        self.cabc_device.as_ref()
    }

    pub fn link(&self) -> &Arc<dyn LinkController> {
        &self.link
    }

    pub fn irq(&self) -> u32 {
        self.irq.irq()
    }

    pub fn vsync(&self) -> &VsyncSync {
        &self.vsync
    }

    pub fn vsync_stats(&self) -> VsyncStats {
        self.vsync.stats()
    }

    pub fn power_state(&self) -> PowerState {
        self.power.state()
    }

    /// Like [`PanelOps::wait_vsync`], but a missing edge is an error
    pub fn wait_vsync_strict(&self) -> Result<()> {
        match self.vsync.wait_vsync() {
            VsyncWait::Edge => Ok(()),
            VsyncWait::TimedOut => Err(Error::Timeout),
        }
    }
}

impl PanelOps for EpsonPanel {
    fn suspend(&self) -> Result<()> {
        self.power.suspend()
    }

    fn resume(&self) -> Result<()> {
        self.power.resume()
    }

    fn blank(&self) -> Result<()> {
        self.power.blank()
    }

    fn unblank(&self) -> Result<()> {
        self.power.unblank()
    }

    fn wait_vsync(&self) -> VsyncWait {
        self.vsync.wait_vsync()
    }

    fn request_vsync(&self, callback: Arc<dyn VsyncCallback>) {
        self.vsync.request_vsync(callback)
    }

    fn clear_vsync(&self) {
        self.vsync.clear_vsync()
    }

    fn caps(&self) -> PanelCaps {
        self.caps
    }

    fn fb_data(&self) -> FbData {
        self.fb_data
    }
}

impl Drop for EpsonPanel {
    fn drop(&mut self) {
        debug!("mddi epson client: remove {}.{}", self.device.name, self.device.id);
    }
}
