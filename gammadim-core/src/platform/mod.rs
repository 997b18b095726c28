//! Operating system gamma ramp backends.

use crate::error::{GammaError, Result};
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(windows)]
mod gdi;
#[cfg(windows)]
pub use self::gdi::GdiGammaDevice;
/// The gamma device for the current platform.
#[cfg(windows)]
pub type SystemGammaDevice = GdiGammaDevice;

#[cfg(all(unix, not(target_os = "macos")))]
mod xvidmode;
#[cfg(all(unix, not(target_os = "macos")))]
pub use self::xvidmode::XVidModeGammaDevice;
/// The gamma device for the current platform.
#[cfg(all(unix, not(target_os = "macos")))]
pub type SystemGammaDevice = XVidModeGammaDevice;

#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
mod unsupported;
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub use self::unsupported::UnsupportedGammaDevice;
/// The gamma device for the current platform.
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub type SystemGammaDevice = UnsupportedGammaDevice;

/// Guard to ensure only one system device handle exists at a time.
static DEVICE_OPEN: AtomicBool = AtomicBool::new(false);

/// Holds the process-wide device slot; released on drop.
#[derive(Debug)]
pub(crate) struct DeviceGuard(());

impl DeviceGuard {
    pub(crate) fn acquire() -> Result<Self> {
        if DEVICE_OPEN.swap(true, Ordering::SeqCst) {
            return Err(GammaError::AlreadyOpen);
        }
        Ok(Self(()))
    }
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        DEVICE_OPEN.store(false, Ordering::SeqCst);
    }
}
