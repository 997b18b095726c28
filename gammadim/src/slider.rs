//! Pointer-driven slider model.
//!
//! The slider owns its value, its geometry and the cached shapes the view
//! draws. It knows nothing about what the value means; observers register a
//! change callback.

use iced::{Point, Size};
use std::fmt;

/// Space kept free at both ends of the track.
pub const PADDING: f32 = 12.0;
/// Radius of the thumb marker.
pub const THUMB_RADIUS: f32 = 10.0;
/// Line width of the track and progress bar.
pub const TRACK_THICKNESS: f32 = 8.0;

/// Errors building a slider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SliderError {
    /// The bounds are not finite or `min >= max`.
    #[error("Invalid slider bounds {min}..{max} (expected finite min < max)")]
    InvalidBounds {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },
}

/// Construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    /// Lowest selectable value.
    pub min: f64,
    /// Highest selectable value.
    pub max: f64,
    /// Starting value, clamped into range.
    pub initial: f64,
    /// Initial width in logical pixels.
    pub width: f32,
    /// Initial height in logical pixels.
    pub height: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 1.0,
            initial: 1.0,
            width: 380.0,
            height: 36.0,
        }
    }
}

/// Pointer interaction phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderPhase {
    /// No pointer interaction in progress.
    Idle,
    /// The pointer was pressed inside the control and is still held.
    Dragging,
}

/// Pointer and geometry input, in coordinates local to the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Left button pressed inside the control at `x`.
    Pressed(f32),
    /// Pointer moved to `x`.
    Dragged(f32),
    /// Left button released.
    Released,
    /// Pointer left the control.
    Left {
        /// Whether the left button is still held.
        button_held: bool,
    },
    /// The control was laid out with a new size.
    Resized(Size),
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

/// Shapes computed by the last redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLayout {
    /// Full-width background line.
    pub track: Segment,
    /// Filled part of the track, from the start padding to the thumb.
    pub progress: Segment,
    /// Thumb centre.
    pub thumb: Point,
}

/// A bounded continuous control.
///
/// `value` is always within `[min, max]`, and the cached [`SliderLayout`] is
/// always derived from the current value and geometry.
pub struct Slider {
    value: f64,
    min: f64,
    max: f64,
    width: f32,
    height: f32,
    center_y: f32,
    phase: SliderPhase,
    layout: SliderLayout,
    redraws: u64,
    on_change: Option<Box<dyn FnMut(f64)>>,
}

impl Slider {
    /// Build a slider and compute its initial layout.
    ///
    /// # Errors
    /// Returns [`SliderError::InvalidBounds`] unless `min < max` and both are finite.
    pub fn new(config: SliderConfig) -> Result<Self, SliderError> {
        let SliderConfig {
            min,
            max,
            initial,
            width,
            height,
        } = config;
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(SliderError::InvalidBounds { min, max });
        }

        let mut slider = Self {
            value: min,
            min,
            max,
            width,
            height,
            center_y: (height / 2.0).floor(),
            phase: SliderPhase::Idle,
            layout: SliderLayout {
                track: Segment {
                    from: Point::ORIGIN,
                    to: Point::ORIGIN,
                },
                progress: Segment {
                    from: Point::ORIGIN,
                    to: Point::ORIGIN,
                },
                thumb: Point::ORIGIN,
            },
            redraws: 0,
            on_change: None,
        };
        slider.value = slider.clamp(initial);
        slider.redraw();
        Ok(slider)
    }

    /// Register the change observer, replacing any previous one.
    pub fn on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Set the value, redraw and notify.
    ///
    /// The observer is called even when the clamped value equals the
    /// current one, so callers can use `set` to re-confirm downstream state.
    pub fn set(&mut self, value: f64) {
        let value = self.clamp(value);
        self.commit(value);
    }

    /// Current value.
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Pointer pressed at `x`: start dragging and jump to `x`.
    pub fn press(&mut self, x: f32) {
        self.phase = SliderPhase::Dragging;
        let value = self.x_to_value(x);
        self.commit(value);
    }

    /// Pointer moved to `x`. Ignored unless dragging.
    pub fn drag(&mut self, x: f32) {
        if self.phase != SliderPhase::Dragging {
            return;
        }
        let value = self.x_to_value(x);
        self.commit(value);
    }

    /// Pointer released.
    pub fn release(&mut self) {
        self.phase = SliderPhase::Idle;
    }

    /// Pointer left the control. Dragging continues while the button is held.
    pub fn leave(&mut self, button_held: bool) {
        if !button_held {
            self.phase = SliderPhase::Idle;
        }
    }

    /// New control size. The value is kept, the shapes follow the geometry.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.center_y = (height / 2.0).floor();
        self.redraw();
    }

    /// Feed one pointer or geometry event.
    pub fn handle(&mut self, event: SliderEvent) {
        match event {
            SliderEvent::Pressed(x) => self.press(x),
            SliderEvent::Dragged(x) => self.drag(x),
            SliderEvent::Released => self.release(),
            SliderEvent::Left { button_held } => self.leave(button_held),
            SliderEvent::Resized(size) => self.resize(size.width, size.height),
        }
    }

    /// Current interaction phase.
    pub fn phase(&self) -> SliderPhase {
        self.phase
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.phase == SliderPhase::Dragging
    }

    /// Shapes from the last redraw.
    pub fn layout(&self) -> &SliderLayout {
        &self.layout
    }

    /// Current geometry.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Number of redraws so far.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    fn commit(&mut self, value: f64) {
        self.value = value;
        self.redraw();
        if let Some(callback) = self.on_change.as_mut() {
            callback(value);
        }
    }

    // Track, progress and thumb are always recomputed together.
    fn redraw(&mut self) {
        let x = self.value_to_x(self.value);
        let start = Point::new(PADDING, self.center_y);

        self.layout = SliderLayout {
            track: Segment {
                from: start,
                to: Point::new(self.width - PADDING, self.center_y),
            },
            progress: Segment {
                from: start,
                to: Point::new(x, self.center_y),
            },
            thumb: Point::new(x, self.center_y),
        };
        self.redraws += 1;
    }

    fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    fn interior(&self) -> f32 {
        self.width - 2.0 * PADDING
    }

    fn value_to_x(&self, value: f64) -> f32 {
        let ratio = (value - self.min) / (self.max - self.min);
        PADDING + (ratio as f32) * self.interior().max(0.0)
    }

    fn x_to_value(&self, x: f32) -> f64 {
        let interior = self.interior();
        let raw = f64::from((x - PADDING) / interior);
        // NaN maps to the minimum, like `set(NaN)`.
        let ratio = if interior > 0.0 && !raw.is_nan() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        };
        // Weighted form keeps both edges exact.
        (self.min * (1.0 - ratio) + self.max * ratio).clamp(self.min, self.max)
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("size", &self.size())
            .field("phase", &self.phase)
            .field("redraws", &self.redraws)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_slider() -> (Slider, Rc<RefCell<Vec<f64>>>) {
        let mut slider = Slider::new(SliderConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        slider.on_change(move |value| sink.borrow_mut().push(value));
        (slider, seen)
    }

    #[test]
    fn test_press_at_edges() {
        let (mut slider, _) = recording_slider();

        slider.press(12.0);
        assert_eq!(slider.get(), 0.1);

        slider.press(368.0);
        assert_eq!(slider.get(), 1.0);
    }

    #[test]
    fn test_press_midpoint() {
        let (mut slider, seen) = recording_slider();
        slider.press(190.0);
        assert!((slider.get() - 0.55).abs() < 1e-9);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_set_same_value_still_notifies() {
        let (mut slider, seen) = recording_slider();
        let current = slider.get();

        slider.set(current);

        assert_eq!(*seen.borrow(), vec![current]);
    }

    #[test]
    fn test_set_clamps() {
        let (mut slider, seen) = recording_slider();

        slider.set(5.0);
        assert_eq!(slider.get(), 1.0);
        slider.set(-3.0);
        assert_eq!(slider.get(), 0.1);
        slider.set(f64::NAN);
        assert_eq!(slider.get(), 0.1);

        assert_eq!(*seen.borrow(), vec![1.0, 0.1, 0.1]);
    }

    #[test]
    fn test_each_mutation_redraws_once() {
        let (mut slider, seen) = recording_slider();
        let before = slider.redraw_count();

        slider.set(0.5);
        assert_eq!(slider.redraw_count(), before + 1);
        slider.press(100.0);
        assert_eq!(slider.redraw_count(), before + 2);
        slider.drag(150.0);
        assert_eq!(slider.redraw_count(), before + 3);
        slider.release();
        assert_eq!(slider.redraw_count(), before + 3);

        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_drag_requires_press() {
        let (mut slider, seen) = recording_slider();

        slider.drag(100.0);
        assert_eq!(slider.get(), 1.0);
        assert!(seen.borrow().is_empty());

        slider.press(368.0);
        slider.drag(12.0);
        assert_eq!(slider.get(), 0.1);

        slider.release();
        slider.drag(368.0);
        assert_eq!(slider.get(), 0.1);
    }

    #[test]
    fn test_leave_keeps_drag_while_button_held() {
        let (mut slider, _) = recording_slider();

        slider.press(100.0);
        slider.leave(true);
        assert_eq!(slider.phase(), SliderPhase::Dragging);

        slider.drag(-50.0);
        assert_eq!(slider.get(), 0.1);

        slider.leave(false);
        assert_eq!(slider.phase(), SliderPhase::Idle);
    }

    #[test]
    fn test_far_out_of_bounds_saturates() {
        let (mut slider, _) = recording_slider();

        slider.press(-1000.0);
        assert_eq!(slider.get(), 0.1);
        slider.drag(1_000_000.0);
        assert_eq!(slider.get(), 1.0);
    }

    #[test]
    fn test_nan_pointer_maps_to_min() {
        let (mut slider, seen) = recording_slider();

        slider.press(f32::NAN);
        assert_eq!(slider.get(), 0.1);
        assert_eq!(slider.layout().thumb.x, PADDING);

        slider.drag(f32::INFINITY);
        assert_eq!(slider.get(), 1.0);
        slider.drag(f32::NAN);
        assert_eq!(slider.get(), 0.1);

        assert_eq!(*seen.borrow(), vec![0.1, 1.0, 0.1]);
    }

    #[test]
    fn test_resize_keeps_value_and_moves_shapes() {
        let (mut slider, seen) = recording_slider();
        slider.set(0.55);
        let value = slider.get();

        slider.resize(480.0, 50.0);

        assert_eq!(slider.get(), value);
        assert_eq!(seen.borrow().len(), 1);

        let layout = slider.layout();
        assert_eq!(layout.track.from, Point::new(12.0, 25.0));
        assert_eq!(layout.track.to, Point::new(468.0, 25.0));
        assert!((layout.thumb.x - 240.0).abs() < 1e-3);
        assert_eq!(layout.progress.to, layout.thumb);
    }

    #[test]
    fn test_initial_layout() {
        let slider = Slider::new(SliderConfig::default()).unwrap();
        let layout = slider.layout();

        assert_eq!(slider.redraw_count(), 1);
        assert_eq!(layout.track.from, Point::new(12.0, 18.0));
        assert_eq!(layout.track.to, Point::new(368.0, 18.0));
        assert_eq!(layout.thumb, Point::new(368.0, 18.0));
        assert_eq!(layout.progress.from, layout.track.from);
    }

    #[test]
    fn test_degenerate_width_maps_to_min() {
        let (mut slider, _) = recording_slider();
        slider.resize(20.0, 36.0);

        slider.press(15.0);
        assert_eq!(slider.get(), 0.1);
        assert_eq!(slider.layout().thumb.x, PADDING);
    }

    #[test]
    fn test_invalid_bounds() {
        for (min, max) in [(1.0, 1.0), (1.0, 0.1), (f64::NAN, 1.0), (0.0, f64::INFINITY)] {
            let config = SliderConfig {
                min,
                max,
                ..SliderConfig::default()
            };
            assert!(matches!(
                Slider::new(config),
                Err(SliderError::InvalidBounds { .. })
            ));
        }
    }

    #[test]
    fn test_initial_value_clamped_without_notify() {
        let config = SliderConfig {
            initial: 7.0,
            ..SliderConfig::default()
        };
        let slider = Slider::new(config).unwrap();
        assert_eq!(slider.get(), 1.0);
    }

    proptest! {
        #[test]
        fn prop_value_stays_in_bounds(
            xs in proptest::collection::vec(-1_000_000.0f32..1_000_000.0, 1..50),
            width in 0.0f32..2000.0,
        ) {
            let mut slider = Slider::new(SliderConfig::default()).unwrap();
            slider.resize(width, 36.0);

            slider.press(xs[0]);
            for &x in &xs[1..] {
                slider.drag(x);
                prop_assert!(slider.get() >= slider.min() && slider.get() <= slider.max());
            }
            prop_assert!(slider.get() >= 0.1 && slider.get() <= 1.0);
        }
    }
}
