//! Brightness controller built on a gamma ramp device.

use crate::device::GammaDevice;
use crate::error::{GammaError, Result};
use crate::ramp::GammaRamp;

use log::{debug, info};

/// Translates a brightness factor into a scaled gamma ramp.
///
/// The device's original ramp is captured lazily on the first [`apply`],
/// not at construction, so a ramp left dimmed by an earlier crashed run is
/// not mistaken for the baseline before the user touches anything. Once
/// captured, the original is never recomputed and [`restore`] re-applies it
/// verbatim.
///
/// # Example
///
/// ```
/// use gammadim_core::{GammaController, GammaRamp, MockDevice};
///
/// let mut ramp = GammaRamp::identity();
/// ramp.red[128] = 40000;
///
/// let mut controller = GammaController::new(MockDevice::with_ramp(ramp));
/// controller.apply(0.5)?;
/// assert_eq!(controller.device().current().red[128], 20000);
///
/// controller.restore()?;
/// assert_eq!(controller.device().current().red[128], 40000);
/// # Ok::<(), gammadim_core::GammaError>(())
/// ```
///
/// [`apply`]: GammaController::apply
/// [`restore`]: GammaController::restore
pub struct GammaController<D> {
    device: D,
    original: Option<GammaRamp>,
}

impl<D: GammaDevice> GammaController<D> {
    /// Wrap an opened device. Nothing is read from the device yet.
    pub fn new(device: D) -> Self {
        Self {
            device,
            original: None,
        }
    }

    /// Query the ramp currently loaded on the device.
    ///
    /// # Errors
    /// Returns [`GammaError::DeviceQuery`] if the device cannot be read.
    pub fn capture(&self) -> Result<GammaRamp> {
        self.device.query_ramp()
    }

    /// Dim the display to `factor` of its original output.
    ///
    /// Every entry of the original ramp is passed through
    /// [`scale_channel`](crate::scale_channel). A factor of `1.0` loads the
    /// original ramp unchanged.
    ///
    /// # Errors
    ///
    /// - [`GammaError::InvalidRange`] if `factor` is not in `(0, 1]`
    /// - [`GammaError::DeviceQuery`] if the first capture fails
    /// - [`GammaError::DeviceApply`] if the device rejects the ramp
    pub fn apply(&mut self, factor: f64) -> Result<()> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(GammaError::InvalidRange {
                value: factor,
                min: 0.0,
                max: 1.0,
            });
        }

        let original = match self.original {
            Some(ref ramp) => ramp,
            None => {
                let ramp = self.capture()?;
                info!("captured original gamma ramp: {:?}", ramp);
                &*self.original.insert(ramp)
            }
        };

        let scaled = original.scaled(factor);
        self.device.apply_ramp(&scaled)?;
        debug!("applied brightness factor {}", factor);
        Ok(())
    }

    /// Re-apply the captured original ramp.
    ///
    /// Safe to call repeatedly. Does nothing if no ramp was ever captured.
    ///
    /// # Errors
    /// Returns [`GammaError::DeviceApply`] if the device rejects the ramp.
    pub fn restore(&self) -> Result<()> {
        match self.original {
            Some(ref ramp) => {
                self.device.apply_ramp(ramp)?;
                info!("restored original gamma ramp");
                Ok(())
            }
            None => {
                debug!("restore skipped, no ramp captured");
                Ok(())
            }
        }
    }

    /// The captured original ramp, if any.
    pub fn original(&self) -> Option<&GammaRamp> {
        self.original.as_ref()
    }

    /// Whether the original ramp has been captured.
    pub fn is_captured(&self) -> bool {
        self.original.is_some()
    }

    /// Borrow the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }
}

/// Convert a brightness factor (0.0-1.0) to a percentage (0-100).
///
/// NaN reads as 0%.
pub fn brightness_percent(factor: f64) -> u32 {
    if factor.is_nan() {
        return 0;
    }
    (factor.clamp(0.0, 1.0) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDevice;
    use crate::ramp::Channel;
    use proptest::prelude::*;

    fn calibrated_ramp() -> GammaRamp {
        let mut ramp = GammaRamp::identity();
        for (i, entry) in ramp.blue.iter_mut().enumerate() {
            *entry = (i as u16) * 200;
        }
        ramp.red[128] = 40000;
        ramp
    }

    #[test]
    fn test_apply_half_then_restore() {
        let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));

        controller.apply(0.5).unwrap();
        assert_eq!(controller.device().current().red[128], 20000);

        controller.restore().unwrap();
        assert_eq!(controller.device().current().red[128], 40000);
    }

    #[test]
    fn test_unit_factor_round_trip() {
        let before = calibrated_ramp();
        let mut controller = GammaController::new(MockDevice::with_ramp(before.clone()));

        controller.apply(1.0).unwrap();
        assert_eq!(controller.device().current(), before);
        controller.restore().unwrap();
        assert_eq!(controller.device().current(), before);
    }

    #[test]
    fn test_capture_is_lazy_and_happens_once() {
        let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));
        assert!(!controller.is_captured());
        assert_eq!(controller.device().query_count(), 0);

        controller.apply(0.8).unwrap();
        controller.apply(0.3).unwrap();
        controller.apply(0.6).unwrap();

        assert_eq!(controller.device().query_count(), 1);
        assert_eq!(controller.original(), Some(&calibrated_ramp()));
    }

    #[test]
    fn test_scaling_always_from_original() {
        let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));

        controller.apply(0.3).unwrap();
        controller.apply(0.9).unwrap();

        let expected = calibrated_ramp().scaled(0.9);
        assert_eq!(controller.device().current(), expected);
    }

    #[test]
    fn test_restore_without_capture_is_noop() {
        let controller = GammaController::new(MockDevice::new());
        controller.restore().unwrap();
        assert_eq!(controller.device().apply_count(), 0);
    }

    #[test]
    fn test_restore_is_idempotent() {
        let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));
        controller.apply(0.4).unwrap();

        controller.restore().unwrap();
        let once = controller.device().current();
        controller.restore().unwrap();

        assert_eq!(controller.device().current(), once);
        assert_eq!(controller.original(), Some(&calibrated_ramp()));
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let mut controller = GammaController::new(MockDevice::new());

        for factor in [0.0, -0.5, 1.01, f64::NAN] {
            let err = controller.apply(factor).unwrap_err();
            assert!(matches!(err, GammaError::InvalidRange { .. }));
        }
        assert!(!controller.is_captured());
        assert_eq!(controller.device().apply_count(), 0);
    }

    #[test]
    fn test_failed_capture_is_retried_later() {
        let mut controller = GammaController::new(MockDevice::new());
        controller.device().fail_queries(true);

        let err = controller.apply(0.5).unwrap_err();
        assert!(matches!(err, GammaError::DeviceQuery(_)));
        assert!(!controller.is_captured());

        controller.device().fail_queries(false);
        controller.apply(0.5).unwrap();
        assert!(controller.is_captured());
    }

    #[test]
    fn test_apply_failure_keeps_original() {
        let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));
        controller.apply(0.7).unwrap();

        controller.device().fail_applies(true);
        let err = controller.apply(0.2).unwrap_err();
        assert!(matches!(err, GammaError::DeviceApply(_)));
        assert_eq!(controller.original(), Some(&calibrated_ramp()));

        controller.device().fail_applies(false);
        controller.restore().unwrap();
        assert_eq!(controller.device().current(), calibrated_ramp());
    }

    #[test]
    fn test_saturated_entries_stay_in_range() {
        let mut ramp = GammaRamp::identity();
        ramp.green = [u16::MAX; 256];
        let mut controller = GammaController::new(MockDevice::with_ramp(ramp));

        controller.apply(1.0).unwrap();
        assert!(controller.device().current().green.iter().all(|&v| v == u16::MAX));

        controller.apply(0.1).unwrap();
        assert!(controller.device().current().green.iter().all(|&v| v == 6554));
    }

    #[test]
    fn test_brightness_percent() {
        assert_eq!(brightness_percent(1.0), 100);
        assert_eq!(brightness_percent(0.1), 10);
        assert_eq!(brightness_percent(0.555), 56);
        assert_eq!(brightness_percent(1.7), 100);
        assert_eq!(brightness_percent(f64::NAN), 0);
    }

    proptest! {
        #[test]
        fn prop_dimmer_factor_never_brightens(f1 in 0.01f64..=1.0, f2 in 0.01f64..=1.0) {
            let (lo, hi) = if f1 <= f2 { (f1, f2) } else { (f2, f1) };
            let mut controller = GammaController::new(MockDevice::with_ramp(calibrated_ramp()));

            controller.apply(lo).unwrap();
            let dim = controller.device().current();
            controller.apply(hi).unwrap();
            let bright = controller.device().current();

            for channel in Channel::ALL {
                let pairs = dim.channel(channel).iter().zip(bright.channel(channel));
                for (d, b) in pairs {
                    prop_assert!(d <= b);
                }
            }
        }
    }
}
