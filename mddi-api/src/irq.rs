//! Interrupt subscription
//!
//! Panel clients never touch interrupt hardware directly. They look up the
//! interrupt line by name in the resources the platform handed them and
//! subscribe a handler through an [`InterruptController`]. The returned
//! [`IrqRegistration`] keeps the subscription alive; dropping it frees the
//! line.

use alloc::sync::Arc;

use crate::error::{Error, Result};

/// Interrupt trigger condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqTrigger {
    RisingEdge,
    FallingEdge,
    BothEdges,
    LevelHigh,
    LevelLow,
}

/// Handler verdict reported back to the interrupt controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    /// The interrupt was for this handler and has been handled
    Handled,
    /// The interrupt was not raised by this device
    None,
}

/// Interrupt handler
///
/// Runs in interrupt context: implementations must not block or sleep.
pub trait IrqHandler: Send + Sync {
    fn handle_irq(&self, irq: u32) -> IrqReturn;
}

/// Platform interrupt controller
pub trait InterruptController: Send + Sync {
    /// Subscribe `handler` to `irq`. `Err` carries the controller's code.
    fn request_irq(
        &self,
        irq: u32,
        trigger: IrqTrigger,
        name: &'static str,
        handler: Arc<dyn IrqHandler>,
    ) -> core::result::Result<(), i32>;

    /// Drop the subscription made for `irq`
    fn free_irq(&self, irq: u32);
}

/// Named interrupt resource of a platform device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrqResource {
    pub name: &'static str,
    pub irq: u32,
}

impl IrqResource {
    pub const fn new(name: &'static str, irq: u32) -> Self {
        Self { name, irq }
    }
}

/// Find the interrupt number published under `name`
pub fn irq_by_name(resources: &[IrqResource], name: &str) -> Option<u32> {
    resources.iter().find(|res| res.name == name).map(|res| res.irq)
}

/// Live interrupt subscription, freed on drop
pub struct IrqRegistration {
    irq: u32,
    name: &'static str,
    controller: Arc<dyn InterruptController>,
}

impl IrqRegistration {
    /// Subscribe `handler` and return the owning handle
    pub fn request(
        controller: Arc<dyn InterruptController>,
        irq: u32,
        trigger: IrqTrigger,
        name: &'static str,
        handler: Arc<dyn IrqHandler>,
    ) -> Result<Self> {
        controller
            .request_irq(irq, trigger, name, handler)
            .map_err(|errno| Error::IrqRequest { irq, errno })?;

        #[cfg(feature = "log")]
        log::debug!("irq {} ({}) subscribed, trigger {:?}", irq, name, trigger);

        Ok(Self { irq, name, controller })
    }

    pub fn irq(&self) -> u32 {
        self.irq
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for IrqRegistration {
    fn drop(&mut self) {
        self.controller.free_irq(self.irq);

        #[cfg(feature = "log")]
        log::debug!("irq {} ({}) freed", self.irq, self.name);
    }
}

impl core::fmt::Debug for IrqRegistration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IrqRegistration")
            .field("irq", &self.irq)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irq_by_name() {
        let resources = [IrqResource::new("hsync", 7), IrqResource::new("vsync", 42)];
        assert_eq!(irq_by_name(&resources, "vsync"), Some(42));
        assert_eq!(irq_by_name(&resources, "te"), None);
        assert_eq!(irq_by_name(&[], "vsync"), None);
    }
}
