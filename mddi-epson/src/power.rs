//! Panel power sequencing
//!
//! Suspend and resume touch both the link and the bridge and may sleep;
//! the bridge half of suspend and the link half of resume run under the
//! idle wake lock so the system cannot drop into idle halfway through.
//! Blank and unblank are plain bridge sequences.
//!
//! Callers serialize these operations. Out-of-order calls are logged and
//! still forwarded to the hardware.

use std::sync::Arc;

use log::{info, warn};
use mddi_api::error::{bridge_error, BridgeOp, Result};
use mddi_api::link::{BridgeChip, LinkController};
use mddi_api::power::{WakeLock, WakeLockGuard};
use spin::Mutex;

/// Link power state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPower {
    Active,
    Suspended,
}

/// Observed power state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerState {
    pub link: LinkPower,
    pub blanked: bool,
}

impl Default for PowerState {
    /// Hardware power-on default
    fn default() -> Self {
        Self { link: LinkPower::Active, blanked: false }
    }
}

/// Power sequencer for one panel
pub struct PowerSequencer {
    link: Arc<dyn LinkController>,
    bridge: Arc<dyn BridgeChip>,
    wake_lock: Arc<dyn WakeLock>,
    state: Mutex<PowerState>,
}

impl PowerSequencer {
    pub fn new(
        link: Arc<dyn LinkController>,
        bridge: Arc<dyn BridgeChip>,
        wake_lock: Arc<dyn WakeLock>,
    ) -> Self {
        Self {
            link,
            bridge,
            wake_lock,
            state: Mutex::new(PowerState::default()),
        }
    }

    /// Uninit the bridge, then power down the link.
    ///
    /// If the bridge refuses, the link is left running and the bridge's
    /// code is returned.
    pub fn suspend(&self) -> Result<()> {
        if self.state().link == LinkPower::Suspended {
            warn!("mddi epson client: suspend while already suspended");
        }

        let ret = {
            let _hold = WakeLockGuard::acquire(self.wake_lock.as_ref());
            self.bridge.uninit()
        };
        if let Err(errno) = ret {
            info!("mddi epson client: non zero return from uninit ({})", errno);
            return Err(bridge_error(BridgeOp::Uninit, errno));
        }

        self.link.suspend();
        self.state.lock().link = LinkPower::Suspended;
        Ok(())
    }

    /// Power up the link, then init the bridge.
    ///
    /// The link stays up even if the bridge init fails.
    pub fn resume(&self) -> Result<()> {
        if self.state().link == LinkPower::Active {
            warn!("mddi epson client: resume while active");
        }

        {
            let _hold = WakeLockGuard::acquire(self.wake_lock.as_ref());
            self.link.resume();
        }
        self.state.lock().link = LinkPower::Active;

        self.bridge.init().map_err(|errno| {
            info!("mddi epson client: non zero return from init ({})", errno);
            bridge_error(BridgeOp::Init, errno)
        })
    }

    pub fn blank(&self) -> Result<()> {
        self.warn_if_suspended("blank");
        self.bridge
            .blank()
            .map_err(|errno| bridge_error(BridgeOp::Blank, errno))?;
        self.state.lock().blanked = true;
        Ok(())
    }

    pub fn unblank(&self) -> Result<()> {
        self.warn_if_suspended("unblank");
        self.bridge
            .unblank()
            .map_err(|errno| bridge_error(BridgeOp::Unblank, errno))?;
        self.state.lock().blanked = false;
        Ok(())
    }

    pub fn state(&self) -> PowerState {
        *self.state.lock()
    }

    fn warn_if_suspended(&self, op: &str) {
        if self.state().link == LinkPower::Suspended {
            warn!("mddi epson client: {} while suspended", op);
        }
    }
}
