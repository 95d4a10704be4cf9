//! Error handling module for MDDI panel clients

use core::fmt;

/// Linux-style error numbers used by panel clients and their collaborators
///
/// Codes the client never produces itself, such as `ENODEV`, are still
/// listed because bridge and interrupt providers return them verbatim.
pub mod errno {
    pub const EIO: i32 = 5;
    pub const ENXIO: i32 = 6;
    pub const ENOMEM: i32 = 12;
    pub const EBUSY: i32 = 16;
    pub const ENODEV: i32 = 19;
    pub const EINVAL: i32 = 22;
    pub const ETIMEDOUT: i32 = 110;
}

/// Bridge chip sequence that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeOp {
    Init,
    Uninit,
    Blank,
    Unblank,
}

impl BridgeOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BridgeOp::Init => "init",
            BridgeOp::Uninit => "uninit",
            BridgeOp::Blank => "blank",
            BridgeOp::Unblank => "unblank",
        }
    }
}

impl fmt::Display for BridgeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common error type used by panel clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bridge sequence returned a non-zero code, kept verbatim
    Bridge { op: BridgeOp, errno: i32 },
    /// Named interrupt resource is not present
    IrqUnavailable(&'static str),
    /// Interrupt controller refused the subscription
    IrqRequest { irq: u32, errno: i32 },
    /// Out of memory, returned by providers such as
    /// [`WakeLockProvider::create`](crate::power::WakeLockProvider::create)
    OutOfMemory,
    /// Configuration error
    InvalidConfig(&'static str),
    /// Timeout
    Timeout,
}

impl Error {
    /// Negative errno equivalent of this error.
    ///
    /// Bridge and interrupt failures return the collaborator's code
    /// unchanged.
    pub fn errno(&self) -> i32 {
        match self {
            Error::Bridge { errno, .. } => *errno,
            Error::IrqUnavailable(_) => -errno::ENXIO,
            Error::IrqRequest { errno, .. } => *errno,
            Error::OutOfMemory => -errno::ENOMEM,
            Error::InvalidConfig(_) => -errno::EINVAL,
            Error::Timeout => -errno::ETIMEDOUT,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bridge { op, errno } => write!(f, "Bridge {} failed: {}", op, errno),
            Error::IrqUnavailable(name) => write!(f, "Interrupt '{}' not available", name),
            Error::IrqRequest { irq, errno } => write!(f, "Request for irq {} failed: {}", irq, errno),
            Error::OutOfMemory => write!(f, "Out of memory"),
            Error::InvalidConfig(msg) => write!(f, "Configuration error: {}", msg),
            Error::Timeout => write!(f, "Operation timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type for operations that can fail
pub type Result<T> = core::result::Result<T, Error>;

/// Creates a new bridge error
pub fn bridge_error(op: BridgeOp, errno: i32) -> Error {
    Error::Bridge { op, errno }
}

/// Creates a new invalid configuration error
pub fn invalid_config(msg: &'static str) -> Error {
    Error::InvalidConfig(msg)
}
