//! Mock gamma device for testing.

use crate::device::GammaDevice;
use crate::error::{GammaError, Result};
use crate::ramp::GammaRamp;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// An in-memory gamma device for testing.
///
/// This allows testing code that depends on [`GammaDevice`] without a real
/// display. Failures can be switched on to exercise error paths.
///
/// # Example
///
/// ```
/// use gammadim_core::{GammaDevice, GammaRamp, MockDevice};
///
/// let mock = MockDevice::new();
/// mock.apply_ramp(&GammaRamp::identity().scaled(0.5)).unwrap();
/// assert_eq!(mock.current().red[255], 32768);
/// ```
pub struct MockDevice {
    ramp: Mutex<GammaRamp>,
    queries: AtomicUsize,
    applies: AtomicUsize,
    fail_query: AtomicBool,
    fail_apply: AtomicBool,
}

impl MockDevice {
    /// Create a mock device loaded with the identity ramp.
    pub fn new() -> Self {
        Self::with_ramp(GammaRamp::identity())
    }

    /// Create a mock device loaded with a custom ramp.
    pub fn with_ramp(ramp: GammaRamp) -> Self {
        Self {
            ramp: Mutex::new(ramp),
            queries: AtomicUsize::new(0),
            applies: AtomicUsize::new(0),
            fail_query: AtomicBool::new(false),
            fail_apply: AtomicBool::new(false),
        }
    }

    /// The ramp currently "on screen".
    pub fn current(&self) -> GammaRamp {
        self.ramp.lock().unwrap().clone()
    }

    /// Number of successful ramp queries.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Number of successfully applied ramps.
    pub fn apply_count(&self) -> usize {
        self.applies.load(Ordering::SeqCst)
    }

    /// Make subsequent queries fail (or succeed again).
    pub fn fail_queries(&self, fail: bool) {
        self.fail_query.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent applies fail (or succeed again).
    pub fn fail_applies(&self, fail: bool) {
        self.fail_apply.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GammaDevice for MockDevice {
    fn query_ramp(&self) -> Result<GammaRamp> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(GammaError::DeviceQuery("mock query failure".to_string()));
        }
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.current())
    }

    fn apply_ramp(&self, ramp: &GammaRamp) -> Result<()> {
        if self.fail_apply.load(Ordering::SeqCst) {
            return Err(GammaError::DeviceApply("mock apply failure".to_string()));
        }
        *self.ramp.lock().unwrap() = ramp.clone();
        self.applies.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
