//! Screen dimmer building blocks.
//!
//! - [`slider`]: the pointer-driven slider model
//! - [`slider_view`]: the iced widget drawing it
//! - [`session`]: wiring the slider to a [`gammadim_core::GammaController`]
//! - [`theme`]: colours and styles

#![warn(missing_docs)]

pub mod session;
pub mod slider;
pub mod slider_view;
pub mod theme;

pub use session::{BrightnessSession, NUDGE_STEP};
pub use slider::{Slider, SliderConfig, SliderError, SliderEvent, SliderPhase};
pub use slider_view::{SliderView, slider_view};
