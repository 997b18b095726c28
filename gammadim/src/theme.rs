//! Colours of the dark dimmer theme.

use iced::widget::{button, container};
use iced::{Border, Color, Theme};

/// Window background.
pub const BACKGROUND: Color = Color::from_rgb8(0x1e, 0x1e, 0x2e);
/// Card behind the controls.
pub const CARD: Color = Color::from_rgb8(0x2a, 0x2a, 0x3e);
/// Accent used for the readout, progress bar and thumb border.
pub const ACCENT: Color = Color::from_rgb8(0x6c, 0x5c, 0xe7);
/// Unfilled slider track.
pub const TRACK: Color = Color::from_rgb8(0x3a, 0x3a, 0x4e);
/// Slider thumb fill.
pub const THUMB: Color = Color::WHITE;
/// Primary text.
pub const TEXT: Color = Color::WHITE;
/// Secondary text.
pub const TEXT_SECONDARY: Color = Color::from_rgb8(0xa0, 0xa0, 0xa0);

const BUTTON: Color = Color::from_rgb8(0x4a, 0x4a, 0x5e);
const BUTTON_HOVERED: Color = Color::from_rgb8(0x5a, 0x5a, 0x6e);

/// Outer window container.
pub fn background(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(BACKGROUND.into()),
        text_color: Some(TEXT),
        ..container::Style::default()
    }
}

/// Rounded card.
pub fn card(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(CARD.into()),
        border: Border {
            radius: 12.0.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}

/// Flat action button.
pub fn action_button(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => BUTTON_HOVERED,
        button::Status::Active | button::Status::Disabled => BUTTON,
    };
    button::Style {
        background: Some(background.into()),
        text_color: TEXT,
        border: Border {
            radius: 6.0.into(),
            ..Border::default()
        },
        ..button::Style::default()
    }
}
