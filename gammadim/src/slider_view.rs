//! iced widget that draws a [`Slider`] and reports pointer input.
//!
//! The widget is stateless with respect to the value: it draws the shapes
//! cached by the model and turns mouse input into [`SliderEvent`]s. The
//! application feeds those back into the model.

use crate::slider::{Segment, Slider, SliderEvent, THUMB_RADIUS, TRACK_THICKNESS};
use crate::theme;

use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::widget::{Tree, Widget, tree};
use iced::advanced::{Clipboard, Shell};
use iced::{Border, Color, Element, Event, Length, Point, Rectangle, Size, Vector, mouse};

const THUMB_BORDER: f32 = 2.0;

/// Draws a [`Slider`] and publishes its pointer events as messages.
pub struct SliderView<'a, Message> {
    slider: &'a Slider,
    on_event: Box<dyn Fn(SliderEvent) -> Message + 'a>,
    width: Length,
}

/// Create a [`SliderView`] for `slider`.
pub fn slider_view<'a, Message>(
    slider: &'a Slider,
    on_event: impl Fn(SliderEvent) -> Message + 'a,
) -> SliderView<'a, Message> {
    SliderView {
        slider,
        on_event: Box::new(on_event),
        width: Length::Fill,
    }
}

impl<Message> SliderView<'_, Message> {
    /// Set the width of the control.
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }
}

#[derive(Debug, Default)]
struct State {
    hovered: bool,
    button_held: bool,
    reported: Option<Size>,
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer> for SliderView<'_, Message>
where
    Renderer: renderer::Renderer,
{
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<State>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(State::default())
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: self.width,
            height: Length::Fixed(self.slider.size().height),
        }
    }

    fn layout(
        &mut self,
        _tree: &mut Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let height = Length::Fixed(self.slider.size().height);
        layout::Node::new(limits.resolve(self.width, height, Size::ZERO))
    }

    fn update(
        &mut self,
        tree: &mut Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_mut::<State>();
        let bounds = layout.bounds();

        // Report each new size once; the model catches up on the next view.
        if bounds.size() != self.slider.size() && state.reported != Some(bounds.size()) {
            state.reported = Some(bounds.size());
            shell.publish((self.on_event)(SliderEvent::Resized(bounds.size())));
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                state.button_held = true;
                if let Some(position) = cursor.position_over(bounds) {
                    shell.publish((self.on_event)(SliderEvent::Pressed(position.x - bounds.x)));
                    shell.capture_event();
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let over = cursor.is_over(bounds);
                if state.hovered && !over {
                    shell.publish((self.on_event)(SliderEvent::Left {
                        button_held: state.button_held,
                    }));
                }
                state.hovered = over;

                if self.slider.is_dragging() {
                    if let Some(position) = cursor.position() {
                        shell.publish((self.on_event)(SliderEvent::Dragged(
                            position.x - bounds.x,
                        )));
                        shell.capture_event();
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.button_held = false;
                if self.slider.is_dragging() {
                    shell.publish((self.on_event)(SliderEvent::Released));
                    shell.capture_event();
                }
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                if state.hovered {
                    state.hovered = false;
                    shell.publish((self.on_event)(SliderEvent::Left {
                        button_held: state.button_held,
                    }));
                }
            }
            _ => {}
        }
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let offset = Vector::new(layout.bounds().x, layout.bounds().y);
        let shapes = self.slider.layout();

        draw_line(renderer, shapes.track, offset, theme::TRACK);
        draw_line(renderer, shapes.progress, offset, theme::ACCENT);

        let center = shapes.thumb + offset;
        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: center.x - THUMB_RADIUS,
                    y: center.y - THUMB_RADIUS,
                    width: THUMB_RADIUS * 2.0,
                    height: THUMB_RADIUS * 2.0,
                },
                border: Border {
                    color: theme::ACCENT,
                    width: THUMB_BORDER,
                    radius: THUMB_RADIUS.into(),
                },
                ..renderer::Quad::default()
            },
            theme::THUMB,
        );
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if self.slider.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

// A horizontal line with round caps, like a canvas line drawn with a round
// cap style: the caps stick out half a thickness past each end.
fn draw_line<Renderer: renderer::Renderer>(
    renderer: &mut Renderer,
    segment: Segment,
    offset: Vector,
    color: Color,
) {
    let half = TRACK_THICKNESS / 2.0;
    let from: Point = segment.from + offset;
    let to: Point = segment.to + offset;

    renderer.fill_quad(
        renderer::Quad {
            bounds: Rectangle {
                x: from.x - half,
                y: from.y - half,
                width: (to.x - from.x).max(0.0) + TRACK_THICKNESS,
                height: TRACK_THICKNESS,
            },
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: half.into(),
            },
            ..renderer::Quad::default()
        },
        color,
    );
}

impl<'a, Message, Theme, Renderer> From<SliderView<'a, Message>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: renderer::Renderer + 'a,
{
    fn from(view: SliderView<'a, Message>) -> Self {
        Element::new(view)
    }
}
