use anyhow::Context;
use clap::Parser;
use folio_core::{
    DocumentLoader, DocumentRef, LoadError, LoadStatus, LoadToken, Viewer, ViewerConfig,
};
use iced::{
    widget::{
        button, column, container, horizontal_space, image as img, pick_list, row, scrollable,
        text, text_input,
    },
    window, Color, Element, Length, Subscription, Task, Theme,
};
use std::fmt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod cli;
mod pdf_viewer;
mod renderer;
mod source;
mod toast;

use cli::{Cli, DEFAULT_LOG_FILTER};
use pdf_viewer::OpenDocument;
use renderer::{Document, PdfiumLoader};
use toast::Toasts;

/// Space around the window content, in logical pixels
const PADDING: f32 = 10.0;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match &cli.log_filter {
        Some(directive) => EnvFilter::try_new(directive).context("Invalid --log-filter")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = cli.viewer_config();
    config.validate().context("Invalid viewer configuration")?;
    let document = cli.document;

    iced::application(Folio::title, Folio::update, Folio::view)
        .subscription(Folio::subscription)
        .theme(|_| Theme::Dark)
        .run_with(move || Folio::new(config, document))
        .context("Viewer window failed")?;

    Ok(())
}

#[derive(Debug, Clone)]
enum Message {
    DocumentInputChanged(String),
    OpenDocument,
    Reload,
    Loaded(LoadToken, Result<Arc<Document>, LoadError>),
    PreviousPage,
    NextPage,
    PageInputChanged(String),
    PageInputSubmitted,
    ScaleSelected(ScaleOption),
    ZoomIn,
    ZoomOut,
    ResetView,
    Rotate,
    ToggleFullscreen,
    Resized(f32),
    DismissNotice(usize),
}

/// A zoom preset as shown in the scale picker
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleOption(f32);

impl fmt::Display for ScaleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * 100.0).round() as u32)
    }
}

struct Folio {
    viewer: Viewer<Toasts>,
    loader: PdfiumLoader,
    document: Option<OpenDocument>,
    page: Option<img::Handle>,
    document_input: String,
    fullscreen: bool,
}

impl Folio {
    fn new(config: ViewerConfig, document: Option<DocumentRef>) -> (Self, Task<Message>) {
        let mut app = Self {
            viewer: Viewer::new(config, Toasts::new()),
            loader: PdfiumLoader,
            document: None,
            page: None,
            document_input: document.as_ref().map(ToString::to_string).unwrap_or_default(),
            fullscreen: false,
        };

        let task = match document {
            Some(reference) => app.open(reference),
            None => Task::none(),
        };
        (app, task)
    }

    fn title(&self) -> String {
        match self.viewer.document() {
            Some(reference) => format!("{} - Folio", reference.display_name()),
            None => "Folio".to_string(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        window::resize_events().map(|(_id, size)| Message::Resized(size.width))
    }

    /// Start loading `reference`, dropping whatever is on screen
    fn open(&mut self, reference: DocumentRef) -> Task<Message> {
        self.document = None;
        self.page = None;
        let token = self.viewer.open(reference.clone());
        Task::perform(self.loader.load(reference), move |result| {
            Message::Loaded(token, result)
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DocumentInputChanged(value) => {
                self.document_input = value;
            }
            Message::OpenDocument => {
                if self.document_input.trim().is_empty() {
                    return Task::none();
                }
                let reference = DocumentRef::from(self.document_input.as_str());
                return self.open(reference);
            }
            Message::Reload => {
                if let Some(reference) = self.viewer.document().cloned() {
                    return self.open(reference);
                }
            }
            Message::Loaded(token, result) => {
                if let Some(document) = self.viewer.finish_load(token, result) {
                    let cache_pages = self.viewer.config().render_cache_pages;
                    self.document = Some(OpenDocument::new(document, cache_pages));
                }
            }
            Message::PreviousPage => {
                if let Err(e) = self.viewer.previous_page() {
                    tracing::debug!("Previous page ignored: {}", e);
                }
            }
            Message::NextPage => {
                if let Err(e) = self.viewer.next_page() {
                    tracing::debug!("Next page ignored: {}", e);
                }
            }
            Message::PageInputChanged(value) => {
                self.viewer.set_page_input(value);
            }
            Message::PageInputSubmitted => {
                // Rejected input stays in the field, flagged by page_input_error
                let _ = self.viewer.commit_page_input();
            }
            Message::ScaleSelected(ScaleOption(scale)) => {
                if let Err(e) = self.viewer.set_scale(scale) {
                    tracing::warn!("Scale rejected: {}", e);
                }
            }
            Message::ZoomIn => {
                self.viewer.zoom_in();
            }
            Message::ZoomOut => {
                self.viewer.zoom_out();
            }
            Message::ResetView => {
                self.viewer.reset_view();
            }
            Message::Rotate => {
                self.viewer.rotate90();
            }
            Message::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                let mode = if self.fullscreen {
                    window::Mode::Fullscreen
                } else {
                    window::Mode::Windowed
                };
                return window::get_latest().and_then(move |id| window::change_mode(id, mode));
            }
            Message::Resized(width) => {
                self.viewer.resize((width - 2.0 * PADDING).max(0.0) as u32);
            }
            Message::DismissNotice(index) => {
                self.viewer.notifier_mut().dismiss(index);
            }
        }

        self.refresh_page();
        Task::none()
    }

    /// Redraw the current page if the viewer asks for it
    fn refresh_page(&mut self) {
        let Some(document) = self.document.as_mut() else {
            return;
        };

        match self.viewer.render_pending(document) {
            Some(Ok(handle)) => self.page = Some(handle),
            Some(Err(e)) => {
                tracing::error!("Failed to render page: {:#}", e);
                self.page = None;
            }
            None => {}
        }
    }

    fn view(&self) -> Element<Message> {
        let open_bar = row![
            text_input("Path or URL of a PDF", &self.document_input)
                .on_input(Message::DocumentInputChanged)
                .on_submit(Message::OpenDocument)
                .width(Length::Fill),
            button("Open").on_press(Message::OpenDocument),
            button("Reload").on_press_maybe(self.viewer.document().map(|_| Message::Reload)),
        ]
        .spacing(10);

        let mut content = column![open_bar].spacing(10).padding(PADDING);

        if !self.viewer.notifier().is_empty() {
            content = content.push(self.viewer.notifier().view(Message::DismissNotice));
        }

        if self.viewer.document().is_none() {
            let welcome = container(
                column![
                    text("Folio").size(32),
                    text("Open a PDF document to get started").size(16),
                ]
                .spacing(20)
                .align_x(iced::Alignment::Center),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

            return content.push(welcome).into();
        }

        content.push(self.toolbar()).push(self.page_view()).into()
    }

    fn toolbar(&self) -> Element<Message> {
        let state = self.viewer.state();
        let config = self.viewer.config();

        let page_count = state
            .page_count()
            .map(|count| count.get().to_string())
            .unwrap_or_else(|| "...".to_string());

        let input_invalid = state.is_ready() && self.viewer.page_input_error().is_some();
        let page_input = text_input("1", state.page_input())
            .on_input(Message::PageInputChanged)
            .on_submit(Message::PageInputSubmitted)
            .width(Length::Fixed(56.0))
            .style(move |theme: &Theme, status| {
                let mut style = text_input::default(theme, status);
                if input_invalid {
                    style.border.color = Color::from_rgb(0.94, 0.27, 0.27);
                }
                style
            });

        let presets: Vec<ScaleOption> = config.scale_presets.iter().copied().map(ScaleOption).collect();
        let selected = config.matching_preset(state.scale()).map(ScaleOption);

        row![
            button("◀")
                .on_press_maybe(state.can_go_previous().then_some(Message::PreviousPage)),
            page_input,
            text(format!("/ {}", page_count)),
            button("▶").on_press_maybe(state.can_go_next().then_some(Message::NextPage)),
            horizontal_space(),
            button("−").on_press(Message::ZoomOut),
            pick_list(presets, selected, Message::ScaleSelected).placeholder(format!(
                "{}%",
                (state.scale() * 100.0).round() as u32
            )),
            button("+").on_press(Message::ZoomIn),
            button("⟳").on_press(Message::Rotate),
            button("Reset").on_press(Message::ResetView),
            button(if self.fullscreen { "Exit fullscreen" } else { "Fullscreen" })
                .on_press(Message::ToggleFullscreen),
        ]
        .spacing(10)
        .align_y(iced::Alignment::Center)
        .into()
    }

    fn page_view(&self) -> Element<Message> {
        let placeholder = match self.viewer.state().status() {
            LoadStatus::Loading => "Loading...",
            LoadStatus::Failed => "This document could not be displayed",
            LoadStatus::Ready => "Rendering page...",
        };

        match (&self.page, self.viewer.state().is_ready()) {
            (Some(handle), true) => scrollable(container(img(handle.clone())))
            .direction(scrollable::Direction::Both {
                vertical: scrollable::Scrollbar::default(),
                horizontal: scrollable::Scrollbar::default(),
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
            _ => container(text(placeholder))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        }
    }
}
