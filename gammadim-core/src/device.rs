//! The display gamma API contract.

use crate::error::Result;
use crate::ramp::GammaRamp;

/// Trait for gamma ramp devices.
///
/// Any platform exposing a three-channel, 256-entry, 16-bit ramp API can
/// implement this. It also allows mock implementations in tests.
pub trait GammaDevice {
    /// Read the ramp currently loaded on the device.
    fn query_ramp(&self) -> Result<GammaRamp>;

    /// Load `ramp` onto the device.
    fn apply_ramp(&self, ramp: &GammaRamp) -> Result<()>;
}

impl<D: GammaDevice + ?Sized> GammaDevice for Box<D> {
    fn query_ramp(&self) -> Result<GammaRamp> {
        (**self).query_ramp()
    }

    fn apply_ramp(&self, ramp: &GammaRamp) -> Result<()> {
        (**self).apply_ramp(ramp)
    }
}
