//! Gamma ramp data.

use crate::error::{GammaError, Result};
use std::fmt;

/// Number of entries in each channel of a gamma ramp.
pub const RAMP_SIZE: usize = 256;

/// One colour channel of a gamma ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
}

impl Channel {
    /// All channels in ramp order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// A three-channel gamma ramp with 256 16-bit entries per channel.
///
/// The index is the input intensity level and the value is the output
/// intensity level. The layout matches the `GetDeviceGammaRamp` buffer
/// (red, then green, then blue), so a ramp can be handed to the OS as-is.
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct GammaRamp {
    /// Red channel curve.
    pub red: [u16; RAMP_SIZE],
    /// Green channel curve.
    pub green: [u16; RAMP_SIZE],
    /// Blue channel curve.
    pub blue: [u16; RAMP_SIZE],
}

impl GammaRamp {
    /// The linear ramp, mapping level `i` to `i * 257` (0..=65535).
    pub fn identity() -> Self {
        let mut curve = [0u16; RAMP_SIZE];
        for (i, entry) in curve.iter_mut().enumerate() {
            *entry = (i as u16) * 257;
        }
        Self {
            red: curve,
            green: curve,
            blue: curve,
        }
    }

    /// Build a ramp from channel slices of arbitrary length.
    ///
    /// # Errors
    /// Returns [`GammaError::InvalidRampLength`] if any channel is not
    /// exactly [`RAMP_SIZE`] entries long.
    pub fn from_channels(red: &[u16], green: &[u16], blue: &[u16]) -> Result<Self> {
        Ok(Self {
            red: to_curve(Channel::Red, red)?,
            green: to_curve(Channel::Green, green)?,
            blue: to_curve(Channel::Blue, blue)?,
        })
    }

    /// Borrow one channel.
    pub fn channel(&self, channel: Channel) -> &[u16; RAMP_SIZE] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Mutably borrow one channel.
    pub fn channel_mut(&mut self, channel: Channel) -> &mut [u16; RAMP_SIZE] {
        match channel {
            Channel::Red => &mut self.red,
            Channel::Green => &mut self.green,
            Channel::Blue => &mut self.blue,
        }
    }

    /// A copy of this ramp with every entry passed through [`scale_channel`].
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        for channel in Channel::ALL {
            for entry in out.channel_mut(channel).iter_mut() {
                *entry = scale_channel(*entry, factor);
            }
        }
        out
    }
}

impl Default for GammaRamp {
    fn default() -> Self {
        Self::identity()
    }
}

// 768 numbers are useless in logs, so only the endpoints and midpoint are shown.
impl fmt::Debug for GammaRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = |c: &[u16; RAMP_SIZE]| [c[0], c[RAMP_SIZE / 2], c[RAMP_SIZE - 1]];
        f.debug_struct("GammaRamp")
            .field("red", &summary(&self.red))
            .field("green", &summary(&self.green))
            .field("blue", &summary(&self.blue))
            .finish()
    }
}

fn to_curve(channel: Channel, data: &[u16]) -> Result<[u16; RAMP_SIZE]> {
    data.try_into().map_err(|_| GammaError::InvalidRampLength {
        channel,
        len: data.len(),
    })
}

/// Linearly scale one ramp entry: `clamp(round(original * factor), 0, 65535)`.
///
/// A factor of `1.0` returns `original` unchanged.
pub fn scale_channel(original: u16, factor: f64) -> u16 {
    let scaled = (f64::from(original) * factor).round();
    // `as` saturates and maps NaN to 0, the clamp keeps the intent explicit.
    scaled.clamp(0.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identity_endpoints() {
        let ramp = GammaRamp::identity();
        assert_eq!(ramp.red[0], 0);
        assert_eq!(ramp.green[128], 128 * 257);
        assert_eq!(ramp.blue[255], u16::MAX);
    }

    #[test]
    fn test_from_channels_rejects_wrong_length() {
        let full = vec![0u16; RAMP_SIZE];
        let short = vec![0u16; 255];

        let err = GammaRamp::from_channels(&full, &short, &full).unwrap_err();
        assert!(matches!(
            err,
            GammaError::InvalidRampLength {
                channel: Channel::Green,
                len: 255
            }
        ));

        let ramp = GammaRamp::from_channels(&full, &full, &full).unwrap();
        assert!(ramp.red.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_scale_channel_rounds() {
        assert_eq!(scale_channel(40000, 0.5), 20000);
        assert_eq!(scale_channel(3, 0.5), 2);
        assert_eq!(scale_channel(1, 0.4), 0);
        assert_eq!(scale_channel(u16::MAX, 1.0), u16::MAX);
    }

    #[test]
    fn test_scaled_by_one_is_identical() {
        let mut ramp = GammaRamp::identity();
        ramp.red[7] = 12345;
        ramp.blue[200] = 1;
        assert_eq!(ramp.scaled(1.0), ramp);
    }

    #[test]
    fn test_low_factor_never_negative() {
        let scaled = GammaRamp::identity().scaled(0.1);
        assert_eq!(scaled.red[0], 0);
        assert_eq!(scaled.red[255], 6554);
    }

    proptest! {
        #[test]
        fn prop_scaling_is_monotonic(
            original in any::<u16>(),
            f1 in 0.0001f64..=1.0,
            f2 in 0.0001f64..=1.0,
        ) {
            let (lo, hi) = if f1 <= f2 { (f1, f2) } else { (f2, f1) };
            prop_assert!(scale_channel(original, lo) <= scale_channel(original, hi));
        }

        #[test]
        fn prop_scaling_stays_in_range(original in any::<u16>(), factor in 0.0001f64..=1.0) {
            let scaled = scale_channel(original, factor);
            prop_assert!(scaled <= original);
        }

        #[test]
        fn prop_unit_factor_is_identity(original in any::<u16>()) {
            prop_assert_eq!(scale_channel(original, 1.0), original);
        }
    }
}
