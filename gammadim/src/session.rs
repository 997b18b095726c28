//! Wires the slider to the gamma controller.

use crate::slider::{Slider, SliderConfig, SliderError, SliderEvent};

use gammadim_core::{GammaController, GammaDevice, GammaError, brightness_percent};
use log::{error, info};
use std::cell::RefCell;
use std::rc::Rc;

/// Brightness change per keyboard step.
pub const NUDGE_STEP: f64 = 0.05;

/// State shared between the session and the slider's change callback.
struct Link<D: GammaDevice> {
    controller: GammaController<D>,
    percent: u32,
    failure: Option<String>,
}

impl<D: GammaDevice> Link<D> {
    fn brightness_changed(&mut self, value: f64) {
        self.percent = brightness_percent(value);
        match self.controller.apply(value) {
            Ok(()) => self.failure = None,
            Err(e) => {
                error!("failed to apply brightness {}: {}", value, e);
                self.failure = Some(e.to_string());
            }
        }
    }

    fn restore(&mut self) -> Result<(), GammaError> {
        self.controller.restore().inspect_err(|e| {
            error!("failed to restore gamma ramp: {}", e);
            self.failure = Some(e.to_string());
        })
    }
}

/// One dimming session: a slider driving one display.
///
/// Every slider change is applied to the display immediately. The original
/// ramp is restored on [`reset`](Self::reset), on [`close`](Self::close) and,
/// if `close` was never called, when the session is dropped.
pub struct BrightnessSession<D: GammaDevice + 'static> {
    slider: Slider,
    link: Rc<RefCell<Link<D>>>,
    closed: bool,
}

impl<D: GammaDevice + 'static> BrightnessSession<D> {
    /// Build the slider and subscribe the controller to its changes.
    ///
    /// # Errors
    /// Returns [`SliderError::InvalidBounds`] for an invalid slider range.
    pub fn new(controller: GammaController<D>, config: SliderConfig) -> Result<Self, SliderError> {
        let mut slider = Slider::new(config)?;
        let link = Rc::new(RefCell::new(Link {
            controller,
            percent: brightness_percent(slider.get()),
            failure: None,
        }));

        let observer = Rc::clone(&link);
        slider.on_change(move |value| observer.borrow_mut().brightness_changed(value));

        Ok(Self {
            slider,
            link,
            closed: false,
        })
    }

    /// Route a pointer or geometry event to the slider.
    pub fn handle(&mut self, event: SliderEvent) {
        self.slider.handle(event);
    }

    /// Move the brightness by `delta`, clamped to the slider range.
    pub fn nudge(&mut self, delta: f64) {
        let value = self.slider.get() + delta;
        self.slider.set(value);
    }

    /// Back to full brightness with the exact original ramp.
    ///
    /// The slider is set to `1.0` (which notifies as usual) and then the
    /// captured ramp is re-applied, so rounding from earlier scaling cannot
    /// leak into the reset state.
    pub fn reset(&mut self) -> Result<(), GammaError> {
        self.slider.set(1.0);
        let mut link = self.link.borrow_mut();
        link.percent = 100;
        link.restore()?;
        link.failure = None;
        Ok(())
    }

    /// Restore the original ramp before the display handle is released.
    ///
    /// A restore failure is logged and returned, never panics.
    pub fn close(&mut self) -> Result<(), GammaError> {
        self.closed = true;
        info!("closing session, restoring gamma ramp");
        self.link.borrow_mut().restore()
    }

    /// The slider model.
    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    /// Readout value, `round(brightness * 100)`.
    pub fn percent(&self) -> u32 {
        self.link.borrow().percent
    }

    /// Message of the last device failure, cleared by the next success.
    pub fn failure(&self) -> Option<String> {
        self.link.borrow().failure.clone()
    }

    /// Run `f` with the controller.
    pub fn with_controller<R>(&self, f: impl FnOnce(&GammaController<D>) -> R) -> R {
        f(&self.link.borrow().controller)
    }
}

impl<D: GammaDevice + 'static> Drop for BrightnessSession<D> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.close();
        }
    }
}
