//! X11 gamma ramp backend using the XF86VidMode extension.
//!
//! libX11 and libXxf86vm are loaded at runtime, so the binary still starts
//! (and reports an error) on machines without them.

use super::DeviceGuard;
use crate::device::GammaDevice;
use crate::error::{GammaError, Result};
use crate::ramp::{GammaRamp, RAMP_SIZE};

use libloading::{Library, Symbol};
use log::{debug, info};
use std::ffi::{c_char, c_int, c_void};

const X11_LIB_NAME: &str = "libX11.so.6";
const XVIDMODE_LIB_NAME: &str = "libXxf86vm.so.1";

type Display = c_void;

/// The default X screen driven through `XF86VidMode{Get,Set}GammaRamp`.
///
/// # Limitations
///
/// Only one instance can exist at a time, and only servers reporting a
/// 256-entry ramp are supported.
pub struct XVidModeGammaDevice {
    x11: Library,
    xvidmode: Library,
    display: *mut Display,
    screen: c_int,
    _guard: DeviceGuard,
}

impl XVidModeGammaDevice {
    /// Connect to the X server named by `$DISPLAY` and check its ramp size.
    ///
    /// # Errors
    ///
    /// - [`GammaError::AlreadyOpen`] if another device handle already exists
    /// - [`GammaError::LibraryLoad`] if the X11 libraries or symbols are missing
    /// - [`GammaError::DeviceOpen`] if the display connection fails
    /// - [`GammaError::UnsupportedRampSize`] if the ramp is not 256 entries
    pub fn open() -> Result<Self> {
        let guard = DeviceGuard::acquire()?;

        unsafe {
            let x11 = Library::new(X11_LIB_NAME)?;
            let xvidmode = Library::new(XVIDMODE_LIB_NAME)?;

            // No `?` between XOpenDisplay and building `Self`, or the
            // connection leaks.
            let (display, screen) = {
                type OpenDisplayFn = unsafe extern "C" fn(*const c_char) -> *mut Display;
                type DefaultScreenFn = unsafe extern "C" fn(*mut Display) -> c_int;
                let open_display: Symbol<OpenDisplayFn> = x11.get(b"XOpenDisplay")?;
                let default_screen: Symbol<DefaultScreenFn> = x11.get(b"XDefaultScreen")?;

                let display = open_display(std::ptr::null());
                if display.is_null() {
                    return Err(GammaError::DeviceOpen(
                        "XOpenDisplay failed, is DISPLAY set?".to_string(),
                    ));
                }
                (display, default_screen(display))
            };

            let device = Self {
                x11,
                xvidmode,
                display,
                screen,
                _guard: guard,
            };

            let size = device.ramp_size()?;
            if size != RAMP_SIZE {
                return Err(GammaError::UnsupportedRampSize(size));
            }

            info!("opened X display, screen {}", screen);
            Ok(device)
        }
    }

    fn ramp_size(&self) -> Result<usize> {
        unsafe {
            type RampSizeFn = unsafe extern "C" fn(*mut Display, c_int, *mut c_int) -> c_int;
            let ramp_size: Symbol<RampSizeFn> =
                self.xvidmode.get(b"XF86VidModeGetGammaRampSize")?;

            let mut size: c_int = 0;
            if ramp_size(self.display, self.screen, &mut size) == 0 {
                return Err(GammaError::DeviceQuery(
                    "XF86VidModeGetGammaRampSize failed".to_string(),
                ));
            }
            Ok(usize::try_from(size).unwrap_or(0))
        }
    }

    fn flush(&self) -> Result<()> {
        unsafe {
            type FlushFn = unsafe extern "C" fn(*mut Display) -> c_int;
            let flush: Symbol<FlushFn> = self.x11.get(b"XFlush")?;
            flush(self.display);
        }
        Ok(())
    }
}

type RampFn =
    unsafe extern "C" fn(*mut Display, c_int, c_int, *mut u16, *mut u16, *mut u16) -> c_int;

impl GammaDevice for XVidModeGammaDevice {
    fn query_ramp(&self) -> Result<GammaRamp> {
        let mut ramp = GammaRamp::identity();
        let ok = unsafe {
            let get_ramp: Symbol<RampFn> = self.xvidmode.get(b"XF86VidModeGetGammaRamp")?;
            get_ramp(
                self.display,
                self.screen,
                RAMP_SIZE as c_int,
                ramp.red.as_mut_ptr(),
                ramp.green.as_mut_ptr(),
                ramp.blue.as_mut_ptr(),
            )
        };
        if ok == 0 {
            return Err(GammaError::DeviceQuery(
                "XF86VidModeGetGammaRamp failed".to_string(),
            ));
        }
        debug!("queried ramp: {:?}", ramp);
        Ok(ramp)
    }

    fn apply_ramp(&self, ramp: &GammaRamp) -> Result<()> {
        // Xlib takes mutable pointers but does not write through them.
        let mut ramp = ramp.clone();
        let ok = unsafe {
            let set_ramp: Symbol<RampFn> = self.xvidmode.get(b"XF86VidModeSetGammaRamp")?;
            set_ramp(
                self.display,
                self.screen,
                RAMP_SIZE as c_int,
                ramp.red.as_mut_ptr(),
                ramp.green.as_mut_ptr(),
                ramp.blue.as_mut_ptr(),
            )
        };
        if ok == 0 {
            return Err(GammaError::DeviceApply(
                "XF86VidModeSetGammaRamp rejected the ramp".to_string(),
            ));
        }
        self.flush()?;
        debug!("applied ramp: {:?}", ramp);
        Ok(())
    }
}

impl Drop for XVidModeGammaDevice {
    fn drop(&mut self) {
        unsafe {
            type CloseDisplayFn = unsafe extern "C" fn(*mut Display) -> c_int;
            if let Ok(close) = self.x11.get::<CloseDisplayFn>(b"XCloseDisplay") {
                close(self.display);
            }
        }
        debug!("closed X display");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Passes with or without an X server: whichever way `open` goes, the
    // handle it leaves behind must not block the next attempt.
    #[test]
    fn test_open_leaves_nothing_held() {
        match XVidModeGammaDevice::open() {
            Ok(device) => {
                assert!(matches!(
                    XVidModeGammaDevice::open(),
                    Err(GammaError::AlreadyOpen)
                ));
                drop(device);
                assert!(XVidModeGammaDevice::open().is_ok());
            }
            Err(first) => {
                assert!(!matches!(first, GammaError::AlreadyOpen));
                match XVidModeGammaDevice::open() {
                    Ok(_) => panic!("open succeeded after failing with: {first}"),
                    Err(second) => assert_eq!(second.to_string(), first.to_string()),
                }
            }
        }
    }
}
