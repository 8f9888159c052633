//! Viewer controller
//!
//! Owns the [`ViewerState`] of one viewer and performs the side effects its
//! transitions call for: a notice when a load fails, a redraw whenever the
//! page or its transform changes.

use crate::config::ViewerConfig;
use crate::error::{LoadError, NavigationError, ValidationError};
use crate::loader::{DocumentRef, PagedDocument};
use crate::notify::Notifier;
use crate::render::{PageRenderer, RenderRequest};
use crate::state::{LoadOutcome, LoadToken, ViewerState};
use std::num::NonZeroU32;
use tracing::{debug, error, info};

#[derive(Debug)]
pub struct Viewer<N> {
    config: ViewerConfig,
    state: ViewerState,
    notifier: N,
    document: Option<DocumentRef>,
    render_width: u32,
    last_render: Option<RenderRequest>,
}

impl<N: Notifier> Viewer<N> {
    pub fn new(config: ViewerConfig, notifier: N) -> Self {
        let state = ViewerState::new(config.default_scale);
        let render_width = config.initial_width.max(1);
        Self {
            config,
            state,
            notifier,
            document: None,
            render_width,
            last_render: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// The document currently shown or being loaded
    pub fn document(&self) -> Option<&DocumentRef> {
        self.document.as_ref()
    }

    pub fn render_width(&self) -> u32 {
        self.render_width
    }

    /// Start loading `reference`.
    ///
    /// A different document resets page, zoom and rotation; the same one is
    /// simply reloaded. Results of earlier loads are ignored from now on.
    pub fn open(&mut self, reference: DocumentRef) -> LoadToken {
        let token = if self.document.as_ref() == Some(&reference) {
            self.state.begin_load()
        } else {
            self.state.begin_document(self.config.default_scale)
        };

        info!(document = %reference, generation = token.generation(), "Opening document");
        self.document = Some(reference);
        self.last_render = None;
        token
    }

    /// Load the current document again
    pub fn reload(&mut self) -> Option<LoadToken> {
        let reference = self.document.clone()?;
        Some(self.open(reference))
    }

    /// Apply the result of the load started with `token`.
    ///
    /// Returns the document when it became the one on screen. Superseded
    /// results are dropped without touching the state. A failure, including
    /// a document without pages, sends the configured load-failure notice.
    pub fn finish_load<D: PagedDocument>(
        &mut self,
        token: LoadToken,
        result: Result<D, LoadError>,
    ) -> Option<D> {
        match result {
            Ok(document) => match self.state.complete_load(token, document.page_count()) {
                LoadOutcome::Ready(pages) => {
                    info!(pages = pages.get(), "Document ready");
                    self.last_render = None;
                    Some(document)
                }
                LoadOutcome::Failed => {
                    self.report_load_failure(&LoadError::EmptyDocument);
                    None
                }
                LoadOutcome::Stale => None,
            },
            Err(e) => {
                match self.state.fail_load(token) {
                    LoadOutcome::Failed => self.report_load_failure(&e),
                    _ => debug!(error = %e, "Dropping failure of superseded load"),
                }
                None
            }
        }
    }

    pub fn previous_page(&mut self) -> Result<bool, NavigationError> {
        self.state.go_to_previous_page()
    }

    pub fn next_page(&mut self) -> Result<bool, NavigationError> {
        self.state.go_to_next_page()
    }

    pub fn jump_to_page(&mut self, target: i64) -> Result<(), NavigationError> {
        self.state.jump_to_page(target)
    }

    pub fn set_page_input(&mut self, raw: impl Into<String>) {
        self.state.set_page_input(raw);
    }

    /// Error to flag on the page-jump field, if any
    pub fn page_input_error(&self) -> Option<ValidationError> {
        self.state.page_input_error()
    }

    pub fn commit_page_input(&mut self) -> Result<NonZeroU32, ValidationError> {
        self.state.commit_page_input().inspect_err(|e| {
            debug!(input = self.state.page_input(), error = %e, "Page input rejected");
        })
    }

    pub fn set_scale(&mut self, scale: f32) -> Result<(), NavigationError> {
        self.state.set_scale(scale)
    }

    /// Step up to the next zoom preset. Returns whether the scale changed.
    pub fn zoom_in(&mut self) -> bool {
        match self.config.next_preset(self.state.scale()) {
            Some(scale) => self.state.set_scale(scale).is_ok(),
            None => false,
        }
    }

    /// Step down to the previous zoom preset. Returns whether the scale changed.
    pub fn zoom_out(&mut self) -> bool {
        match self.config.previous_preset(self.state.scale()) {
            Some(scale) => self.state.set_scale(scale).is_ok(),
            None => false,
        }
    }

    pub fn rotate90(&mut self) {
        self.state.rotate90();
    }

    pub fn reset_view(&mut self) {
        // default_scale is validated with the config
        if let Err(e) = self.state.reset_view(self.config.default_scale) {
            error!(error = %e, "Cannot reset view");
        }
    }

    /// Record the width the page is fitted to. Zero widths are ignored.
    pub fn resize(&mut self, width: u32) {
        if width > 0 {
            self.render_width = width;
        }
    }

    /// The page and transform that should currently be on screen
    pub fn render_request(&self) -> Option<RenderRequest> {
        self.state.render_request(self.render_width)
    }

    /// The render request, if it differs from the last one taken
    pub fn take_render_request(&mut self) -> Option<RenderRequest> {
        let request = self.render_request()?;
        if self.last_render == Some(request) {
            return None;
        }
        self.last_render = Some(request);
        Some(request)
    }

    /// Draw the pending render request with `renderer`, if there is one.
    /// A failed draw stays pending and is retried on the next call.
    pub fn render_pending<R: PageRenderer>(
        &mut self,
        renderer: &mut R,
    ) -> Option<Result<R::Surface, R::Error>> {
        let request = self.take_render_request()?;
        debug!(%request, "Rendering");
        let rendered = renderer.render(&request);
        if rendered.is_err() {
            self.last_render = None;
        }
        Some(rendered)
    }

    fn report_load_failure(&mut self, reason: &LoadError) {
        match &self.document {
            Some(reference) => error!(document = %reference, error = %reason, "Failed to load document"),
            None => error!(error = %reason, "Failed to load document"),
        }
        self.notifier.notify(self.config.load_failure.clone());
    }
}
