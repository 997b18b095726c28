//! Dim a display by linearly scaling its gamma ramp.
//!
//! This crate captures a display's native gamma ramp, loads attenuated
//! copies of it, and restores the original exactly when asked.
//!
//! # Platforms
//!
//! - Windows: GDI `Get/SetDeviceGammaRamp` on the screen device context
//! - Linux/BSD with X11: the XF86VidMode extension (`libXxf86vm`, loaded at runtime)
//!
//! # Example
//!
//! ```no_run
//! use gammadim_core::{GammaController, SystemGammaDevice};
//!
//! fn main() -> Result<(), gammadim_core::GammaError> {
//!     // Open the display (only one handle allowed)
//!     let mut controller = GammaController::new(SystemGammaDevice::open()?);
//!
//!     // Dim to 60%; the original ramp is captured here
//!     controller.apply(0.6)?;
//!
//!     // Put the original calibration back
//!     controller.restore()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! Use [`MockDevice`] to test code without a display:
//!
//! ```
//! use gammadim_core::{GammaController, MockDevice};
//!
//! let mut controller = GammaController::new(MockDevice::new());
//! controller.apply(0.5).unwrap();
//! assert_eq!(controller.device().current().red[255], 32768);
//! ```
//!
//! Only linear scaling of the existing curve is performed. Whatever colour
//! calibration the OS or driver loaded is preserved, only its magnitude is
//! attenuated.

#![warn(missing_docs)]

mod controller;
mod device;
mod error;
mod mock;
mod platform;
mod ramp;

// Re-export public API
pub use controller::{GammaController, brightness_percent};
pub use device::GammaDevice;
pub use error::{GammaError, Result};
pub use mock::MockDevice;
pub use platform::SystemGammaDevice;
#[cfg(windows)]
pub use platform::GdiGammaDevice;
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub use platform::UnsupportedGammaDevice;
#[cfg(all(unix, not(target_os = "macos")))]
pub use platform::XVidModeGammaDevice;
pub use ramp::{Channel, GammaRamp, RAMP_SIZE, scale_channel};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_round_trip_identity() {
        let mut before = GammaRamp::identity();
        before.green[10] = 999;
        let mut controller = GammaController::new(MockDevice::with_ramp(before.clone()));

        controller.apply(1.0).unwrap();
        controller.restore().unwrap();

        assert_eq!(controller.device().current(), before);
    }

    #[test]
    fn test_reset_is_exact_after_repeated_scaling() {
        let mut before = GammaRamp::identity();
        before.red[1] = 3;
        before.blue[254] = 65001;
        let mut controller = GammaController::new(MockDevice::with_ramp(before.clone()));

        for factor in [0.37, 0.91, 0.1, 0.73, 0.999] {
            controller.apply(factor).unwrap();
        }
        controller.restore().unwrap();

        assert_eq!(controller.device().current(), before);
    }

    #[test]
    fn test_boxed_device() {
        let device: Box<dyn GammaDevice> = Box::new(MockDevice::new());
        let mut controller = GammaController::new(device);

        controller.apply(0.5).unwrap();
        assert!(controller.is_captured());
        controller.restore().unwrap();
    }

    #[test]
    fn test_error_messages() {
        let err = GammaError::InvalidRange {
            value: 1.5,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid brightness factor 1.5 (expected 0 < factor <= 1)"
        );

        let err = GammaError::InvalidRampLength {
            channel: Channel::Blue,
            len: 128,
        };
        assert_eq!(
            err.to_string(),
            "Invalid blue channel length 128 (expected 256)"
        );
    }
}
