//! On-screen notices

use folio_core::{Notice, Notifier, Severity};
use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Border, Color, Element, Length, Theme};

/// Most notices shown at once; older ones are dropped first
const MAX_NOTICES: usize = 5;

/// Notices waiting to be dismissed, oldest first
#[derive(Debug, Default)]
pub struct Toasts {
    notices: Vec<Notice>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn dismiss(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        on_dismiss: impl Fn(usize) -> Message,
    ) -> Element<'a, Message> {
        let mut list = column![].spacing(5);
        for (idx, notice) in self.notices.iter().enumerate() {
            let accent = accent(notice.severity);
            let card = container(
                row![
                    column![text(&notice.title).size(14), text(&notice.message).size(13)].spacing(2),
                    horizontal_space(),
                    button("×").on_press(on_dismiss(idx)),
                ]
                .spacing(10),
            )
            .padding(10)
            .width(Length::Fill)
            .style(move |theme: &Theme| container::Style {
                border: Border {
                    color: accent,
                    width: 1.0,
                    radius: 4.0.into(),
                },
                ..container::rounded_box(theme)
            });
            list = list.push(card);
        }
        list.into()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notice: Notice) {
        tracing::info!(title = %notice.title, severity = %notice.severity, "{}", notice.message);
        // A repeated notice moves to the end instead of stacking
        self.notices.retain(|shown| *shown != notice);
        self.notices.push(notice);
        if self.notices.len() > MAX_NOTICES {
            let excess = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..excess);
        }
    }
}

fn accent(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::from_rgb(0.4, 0.6, 0.9),
        Severity::Warning => Color::from_rgb(0.95, 0.7, 0.2),
        Severity::Error => Color::from_rgb(0.94, 0.27, 0.27),
    }
}
