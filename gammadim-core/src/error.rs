//! Error types for the gamma controller.

use crate::ramp::Channel;

/// Result type returned from functions that can fail with a [`GammaError`].
pub type Result<T, E = GammaError> = std::result::Result<T, E>;

/// Errors that can occur when talking to a display's gamma ramp.
#[derive(Debug, thiserror::Error)]
pub enum GammaError {
    /// The display device handle could not be acquired.
    #[error("Failed to open display device: {0}")]
    DeviceOpen(String),

    /// Attempted to open a second system device.
    #[error("Display device already open - only one handle allowed")]
    AlreadyOpen,

    /// Failed to load a display library or one of its symbols.
    #[cfg(all(unix, not(target_os = "macos")))]
    #[error("Failed to load library: {0}")]
    LibraryLoad(#[from] libloading::Error),

    /// Reading the current gamma ramp from the device failed.
    #[error("Failed to query gamma ramp: {0}")]
    DeviceQuery(String),

    /// The device rejected a gamma ramp.
    #[error("Failed to apply gamma ramp: {0}")]
    DeviceApply(String),

    /// The device uses a ramp size other than 256 entries per channel.
    #[error("Unsupported gamma ramp size {0} (expected 256)")]
    UnsupportedRampSize(usize),

    /// Channel data of the wrong length was supplied.
    #[error("Invalid {channel} channel length {len} (expected 256)")]
    InvalidRampLength {
        /// The offending channel.
        channel: Channel,
        /// The length that was supplied.
        len: usize,
    },

    /// A brightness factor was outside the accepted range.
    #[error("Invalid brightness factor {value} (expected {min} < factor <= {max})")]
    InvalidRange {
        /// The invalid value provided.
        value: f64,
        /// Exclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}
