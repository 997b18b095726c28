use gammadim::{BrightnessSession, NUDGE_STEP, SliderConfig, SliderEvent, slider_view, theme};
use gammadim_core::{GammaController, SystemGammaDevice};
use iced::keyboard::{self, Event as KeyboardEvent, Key, key::Named};
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme, window};
use log::{error, info};

pub fn main() -> iced::Result {
    env_logger::init();

    iced::application(DimmerApp::default, DimmerApp::update, DimmerApp::view)
        .title("Screen Dimmer")
        .subscription(DimmerApp::subscription)
        .theme(DimmerApp::theme)
        .window_size((480.0, 350.0))
        .resizable(false)
        .exit_on_close_request(false)
        .run()
}

struct DimmerApp {
    session: Option<BrightnessSession<SystemGammaDevice>>,
    error_message: Option<String>,
}

#[derive(Debug, Clone)]
enum Message {
    // Slider input
    Slider(SliderEvent),

    // Buttons
    Reset,
    Minimize,

    // Window lifecycle
    CloseRequested(window::Id),

    // Keyboard event
    KeyboardEvent(KeyboardEvent),
}

impl Default for DimmerApp {
    fn default() -> Self {
        let mut app = Self {
            session: None,
            error_message: None,
        };

        // Try to open the display; the window still shows the error otherwise
        match SystemGammaDevice::open() {
            Ok(device) => {
                let controller = GammaController::new(device);
                match BrightnessSession::new(controller, SliderConfig::default()) {
                    Ok(session) => {
                        info!("display opened, brightness session ready");
                        app.session = Some(session);
                    }
                    Err(e) => {
                        app.error_message = Some(format!("Slider error: {}", e));
                    }
                }
            }
            Err(e) => {
                error!("failed to open display: {}", e);
                app.error_message = Some(format!("Failed to open display: {}", e));
            }
        }

        app
    }
}

impl DimmerApp {
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Slider(event) => {
                if let Some(ref mut session) = self.session {
                    session.handle(event);
                    self.error_message = session.failure();
                }
            }

            Message::Reset => {
                if let Some(ref mut session) = self.session {
                    self.error_message = match session.reset() {
                        Ok(()) => None,
                        Err(e) => Some(format!("Reset error: {}", e)),
                    };
                }
            }

            Message::Minimize => {
                return window::latest().and_then(|id| window::minimize(id, true));
            }

            Message::CloseRequested(id) => {
                if let Some(ref mut session) = self.session {
                    // Exit regardless; the failure is already logged
                    let _ = session.close();
                }
                info!("window {:?} closing", id);
                return iced::exit();
            }

            Message::KeyboardEvent(event) => {
                if let KeyboardEvent::KeyPressed { key, .. } = event {
                    match key.as_ref() {
                        Key::Named(Named::ArrowRight | Named::ArrowUp) => {
                            self.nudge(NUDGE_STEP);
                        }
                        Key::Named(Named::ArrowLeft | Named::ArrowDown) => {
                            self.nudge(-NUDGE_STEP);
                        }
                        Key::Character(c) if c == "r" || c == "R" => {
                            return self.update(Message::Reset);
                        }
                        _ => {}
                    }
                }
            }
        }

        Task::none()
    }

    fn nudge(&mut self, delta: f64) {
        if let Some(ref mut session) = self.session {
            session.nudge(delta);
            self.error_message = session.failure();
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let title = text("Screen Dimmer").size(20).color(theme::TEXT);

        // Large percentage readout
        let percent = self.session.as_ref().map_or(100, |s| s.percent());
        let readout = text(format!("{}%", percent)).size(36).color(theme::ACCENT);
        let caption = text("Brightness Level")
            .size(11)
            .color(theme::TEXT_SECONDARY);

        // Slider, only when the display could be opened
        let slider: Element<'_, Message> = match self.session {
            Some(ref session) => slider_view(session.slider(), Message::Slider).into(),
            None => text("Display unavailable")
                .size(14)
                .color(theme::TEXT_SECONDARY)
                .into(),
        };

        // Buttons
        let buttons = row![
            action_button("Reset", Message::Reset),
            action_button("Minimize", Message::Minimize),
        ]
        .spacing(10);

        // Error/status message
        let status = text(self.error_message.as_deref().unwrap_or(""))
            .size(12)
            .color(theme::TEXT_SECONDARY);

        let card = container(
            column![title, readout, caption, slider, buttons, status]
                .spacing(10)
                .align_x(Alignment::Center),
        )
        .padding([25, 30])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::card);

        container(card)
            .padding(20)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(theme::background)
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::listen().map(Message::KeyboardEvent),
            window::close_requests().map(Message::CloseRequested),
        ])
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn action_button(label: &str, message: Message) -> Element<'_, Message> {
    button(text(label).size(13))
        .padding([8, 20])
        .style(theme::action_button)
        .on_press(message)
        .into()
}
