//! Fallback for platforms without a gamma ramp backend.

use crate::device::GammaDevice;
use crate::error::{GammaError, Result};
use crate::ramp::GammaRamp;

/// Placeholder device that can never be opened.
pub struct UnsupportedGammaDevice(());

impl UnsupportedGammaDevice {
    /// Always fails with [`GammaError::DeviceOpen`].
    pub fn open() -> Result<Self> {
        Err(GammaError::DeviceOpen(
            "gamma ramps are not supported on this platform".to_string(),
        ))
    }
}

impl GammaDevice for UnsupportedGammaDevice {
    fn query_ramp(&self) -> Result<GammaRamp> {
        Err(GammaError::DeviceQuery("unsupported platform".to_string()))
    }

    fn apply_ramp(&self, _ramp: &GammaRamp) -> Result<()> {
        Err(GammaError::DeviceApply("unsupported platform".to_string()))
    }
}
