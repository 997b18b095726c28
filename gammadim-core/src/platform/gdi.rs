//! Windows GDI gamma ramp backend.

use super::DeviceGuard;
use crate::device::GammaDevice;
use crate::error::{GammaError, Result};
use crate::ramp::GammaRamp;

use log::{debug, info};
use std::ffi::c_void;
use windows_sys::Win32::{
    Foundation::GetLastError,
    Graphics::Gdi::{GetDC, HDC, ReleaseDC},
    UI::ColorSystem::{GetDeviceGammaRamp, SetDeviceGammaRamp},
};

/// Screen device context driven through `Get/SetDeviceGammaRamp`.
///
/// # Limitations
///
/// Only one instance can exist at a time. The device context is the whole
/// virtual screen, so every attached display is dimmed together.
pub struct GdiGammaDevice {
    hdc: HDC,
    _guard: DeviceGuard,
}

impl GdiGammaDevice {
    /// Acquire the screen device context.
    ///
    /// # Errors
    ///
    /// - [`GammaError::AlreadyOpen`] if another device handle already exists
    /// - [`GammaError::DeviceOpen`] if `GetDC` fails
    pub fn open() -> Result<Self> {
        let guard = DeviceGuard::acquire()?;

        let hdc = unsafe { GetDC(std::ptr::null_mut()) };
        if hdc.is_null() {
            return Err(GammaError::DeviceOpen(format!(
                "GetDC failed (error code: {})",
                last_error()
            )));
        }

        info!("opened screen device context");
        Ok(Self { hdc, _guard: guard })
    }
}

impl GammaDevice for GdiGammaDevice {
    fn query_ramp(&self) -> Result<GammaRamp> {
        let mut ramp = GammaRamp::identity();
        let ok = unsafe { GetDeviceGammaRamp(self.hdc, &mut ramp as *mut GammaRamp as *mut c_void) };
        if ok == 0 {
            return Err(GammaError::DeviceQuery(format!(
                "GetDeviceGammaRamp failed (error code: {})",
                last_error()
            )));
        }
        debug!("queried ramp: {:?}", ramp);
        Ok(ramp)
    }

    fn apply_ramp(&self, ramp: &GammaRamp) -> Result<()> {
        let ok =
            unsafe { SetDeviceGammaRamp(self.hdc, ramp as *const GammaRamp as *const c_void) };
        if ok == 0 {
            return Err(GammaError::DeviceApply(format!(
                "SetDeviceGammaRamp rejected the ramp (error code: {})",
                last_error()
            )));
        }
        debug!("applied ramp: {:?}", ramp);
        Ok(())
    }
}

impl Drop for GdiGammaDevice {
    fn drop(&mut self) {
        unsafe {
            ReleaseDC(std::ptr::null_mut(), self.hdc);
        }
        debug!("released screen device context");
    }
}

fn last_error() -> u32 {
    unsafe { GetLastError() }
}
