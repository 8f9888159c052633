//! Viewer state: load status, current page, zoom and rotation
//!
//! Every mutation goes through a named operation that either succeeds in
//! full or leaves the state untouched. `current_page` stays inside
//! `1..=page_count` whenever the page count is known.

use crate::error::{is_valid_scale, NavigationError, ValidationError};
use crate::render::RenderRequest;
use crate::validator;
use std::num::NonZeroU32;
use tracing::{debug, warn};

/// Document load status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed,
}

/// Identifies one load attempt.
///
/// Each [`ViewerState::begin_load`] mints a token with a higher generation
/// than every earlier one. Results carrying any other token are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// What applying a load result did to the state.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document is ready with this many pages
    Ready(NonZeroU32),
    /// The load failed; the state is now `Failed`
    Failed,
    /// The token was superseded or already settled; nothing changed
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    status: LoadStatus,
    page_count: Option<NonZeroU32>,
    current_page: u32,
    scale: f32,
    rotation: i64,
    page_input: String,
    generation: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ViewerState {
    const FIRST_PAGE: u32 = 1;

    /// Fresh state waiting for its first load, zoomed to `scale`.
    ///
    /// An invalid `scale` falls back to `1.0`.
    pub fn new(scale: f32) -> Self {
        Self {
            status: LoadStatus::Loading,
            page_count: None,
            current_page: Self::FIRST_PAGE,
            scale: if is_valid_scale(scale) { scale } else { 1.0 },
            rotation: 0,
            page_input: Self::FIRST_PAGE.to_string(),
            generation: 0,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    pub fn page_count(&self) -> Option<NonZeroU32> {
        self.page_count
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Accumulated rotation in degrees, never normalized
    pub fn rotation(&self) -> i64 {
        self.rotation
    }

    /// Rotation as drawn: 0, 90, 180 or 270 degrees
    pub fn visual_rotation(&self) -> u16 {
        self.rotation.rem_euclid(360) as u16
    }

    /// Text currently in the page-jump field
    pub fn page_input(&self) -> &str {
        &self.page_input
    }

    /// Token of the most recent load attempt
    pub fn load_token(&self) -> LoadToken {
        LoadToken(self.generation)
    }

    /// Start a load attempt for the current document.
    ///
    /// Page state goes back to page one of an unknown page count. Any
    /// outstanding token is invalidated.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.status = LoadStatus::Loading;
        self.page_count = None;
        self.set_page(Self::FIRST_PAGE);
        debug!(generation = self.generation, "Load started");
        LoadToken(self.generation)
    }

    /// Start a load attempt for a different document.
    ///
    /// Like [`begin_load`](Self::begin_load), and also restores zoom and
    /// rotation.
    pub fn begin_document(&mut self, scale: f32) -> LoadToken {
        if is_valid_scale(scale) {
            self.scale = scale;
        }
        self.rotation = 0;
        self.begin_load()
    }

    /// Whether a result carrying `token` would still be applied
    pub fn accepts(&self, token: LoadToken) -> bool {
        token.0 == self.generation && self.status == LoadStatus::Loading
    }

    /// Apply a successful load reporting `page_count` pages.
    ///
    /// A document without pages is treated as a failed load.
    pub fn complete_load(&mut self, token: LoadToken, page_count: u32) -> LoadOutcome {
        if !self.accepts(token) {
            debug!(
                generation = token.0,
                current = self.generation,
                "Ignoring superseded load result"
            );
            return LoadOutcome::Stale;
        }

        let Some(page_count) = NonZeroU32::new(page_count) else {
            return self.fail_load(token);
        };

        self.status = LoadStatus::Ready;
        self.page_count = Some(page_count);
        // Text typed while loading is kept so it can be committed now
        self.current_page = Self::FIRST_PAGE;
        debug!(generation = token.0, pages = page_count.get(), "Load completed");
        LoadOutcome::Ready(page_count)
    }

    /// Apply a failed load. Page state is left as it was.
    pub fn fail_load(&mut self, token: LoadToken) -> LoadOutcome {
        if !self.accepts(token) {
            debug!(
                generation = token.0,
                current = self.generation,
                "Ignoring superseded load failure"
            );
            return LoadOutcome::Stale;
        }

        self.status = LoadStatus::Failed;
        debug!(generation = token.0, "Load failed");
        LoadOutcome::Failed
    }

    pub fn can_go_previous(&self) -> bool {
        self.is_ready() && self.current_page > Self::FIRST_PAGE
    }

    pub fn can_go_next(&self) -> bool {
        match self.page_count {
            Some(count) => self.is_ready() && self.current_page < count.get(),
            None => false,
        }
    }

    /// Step back one page. Returns whether the page changed.
    pub fn go_to_previous_page(&mut self) -> Result<bool, NavigationError> {
        self.ready_page_count()?;
        let previous = self.current_page.saturating_sub(1).max(Self::FIRST_PAGE);
        Ok(self.set_page(previous))
    }

    /// Step forward one page. Returns whether the page changed.
    pub fn go_to_next_page(&mut self) -> Result<bool, NavigationError> {
        let page_count = self.ready_page_count()?;
        let next = self.current_page.saturating_add(1).min(page_count.get());
        Ok(self.set_page(next))
    }

    /// Jump to `target`, which must lie within `1..=page_count`.
    pub fn jump_to_page(&mut self, target: i64) -> Result<(), NavigationError> {
        let out_of_range = NavigationError::OutOfRange {
            target,
            page_count: self.page_count.map(NonZeroU32::get),
        };

        let page_count = match self.ready_page_count() {
            Ok(count) => count,
            Err(_) => {
                warn!(page = target, "Page jump rejected before document is ready");
                return Err(out_of_range);
            }
        };

        if target < i64::from(Self::FIRST_PAGE) || target > i64::from(page_count.get()) {
            warn!(page = target, pages = page_count.get(), "Page jump out of range");
            return Err(out_of_range);
        }

        // Bounded by page_count above
        self.set_page(target as u32);
        Ok(())
    }

    /// Replace the text of the page-jump field without navigating
    pub fn set_page_input(&mut self, raw: impl Into<String>) {
        self.page_input = raw.into();
    }

    /// Current validation error of the page-jump field, checked against
    /// the live page count
    pub fn page_input_error(&self) -> Option<ValidationError> {
        validator::validate(&self.page_input, self.page_count).err()
    }

    /// Validate the page-jump field and navigate to it.
    ///
    /// On failure the field keeps its text and the page is unchanged.
    pub fn commit_page_input(&mut self) -> Result<NonZeroU32, ValidationError> {
        let page = validator::validate(&self.page_input, self.page_count)?;
        // A known bound implies Ready, and validate has range-checked the page
        self.set_page(page.get());
        Ok(page)
    }

    pub fn set_scale(&mut self, value: f32) -> Result<(), NavigationError> {
        if !is_valid_scale(value) {
            return Err(NavigationError::InvalidScale(value));
        }
        self.scale = value;
        Ok(())
    }

    pub fn rotate90(&mut self) {
        self.rotation += 90;
    }

    /// Restore zoom to `scale` and drop any rotation
    pub fn reset_view(&mut self, scale: f32) -> Result<(), NavigationError> {
        self.set_scale(scale)?;
        self.rotation = 0;
        Ok(())
    }

    /// The page and transform to draw at `target_width`, once ready
    pub fn render_request(&self, target_width: u32) -> Option<RenderRequest> {
        if !self.is_ready() {
            return None;
        }

        Some(RenderRequest {
            page: self.current_page,
            scale: self.scale,
            rotation: self.visual_rotation(),
            target_width,
        })
    }

    fn ready_page_count(&self) -> Result<NonZeroU32, NavigationError> {
        match (self.status, self.page_count) {
            (LoadStatus::Ready, Some(count)) => Ok(count),
            _ => Err(NavigationError::NotReady),
        }
    }

    /// Move to `page` and echo the new value into the page-jump field.
    /// Returns whether the page changed.
    fn set_page(&mut self, page: u32) -> bool {
        let changed = page != self.current_page;
        self.current_page = page;
        self.page_input = page.to_string();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ready(pages: u32) -> ViewerState {
        let mut state = ViewerState::default();
        let token = state.begin_load();
        assert_eq!(
            state.complete_load(token, pages),
            LoadOutcome::Ready(NonZeroU32::new(pages).unwrap())
        );
        state
    }

    #[test]
    fn test_initial_state() {
        let state = ViewerState::default();
        assert_eq!(state.status(), LoadStatus::Loading);
        assert_eq!(state.page_count(), None);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.page_input(), "1");
    }

    #[test]
    fn test_invalid_initial_scale_falls_back() {
        assert_eq!(ViewerState::new(0.0).scale(), 1.0);
        assert_eq!(ViewerState::new(2.0).scale(), 2.0);
    }

    #[test]
    fn test_tokens_increase() {
        let mut state = ViewerState::default();
        let first = state.begin_load();
        let second = state.begin_load();
        assert!(second > first);
        assert_eq!(state.load_token(), second);
        assert!(!state.accepts(first));
        assert!(state.accepts(second));
    }

    #[test]
    fn test_result_applied_at_most_once() {
        let mut state = ViewerState::default();
        let token = state.begin_load();
        assert!(matches!(state.complete_load(token, 3), LoadOutcome::Ready(_)));
        assert_eq!(state.fail_load(token), LoadOutcome::Stale);
        assert_eq!(state.complete_load(token, 9), LoadOutcome::Stale);
        assert_eq!(state.status(), LoadStatus::Ready);
        assert_eq!(state.page_count().map(NonZeroU32::get), Some(3));
    }

    #[test]
    fn test_zero_pages_is_a_failure() {
        let mut state = ViewerState::default();
        let token = state.begin_load();
        assert_eq!(state.complete_load(token, 0), LoadOutcome::Failed);
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(state.page_count(), None);
    }

    #[test]
    fn test_fail_load_keeps_page_state() {
        let mut state = ViewerState::default();
        let token = state.begin_load();
        assert_eq!(state.fail_load(token), LoadOutcome::Failed);
        assert_eq!(state.status(), LoadStatus::Failed);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_count(), None);
    }

    #[test]
    fn test_navigation_requires_ready() {
        let mut state = ViewerState::default();
        assert_eq!(state.go_to_next_page(), Err(NavigationError::NotReady));
        assert_eq!(state.go_to_previous_page(), Err(NavigationError::NotReady));
        assert!(!state.can_go_next());
        assert!(!state.can_go_previous());
        assert_eq!(
            state.jump_to_page(1),
            Err(NavigationError::OutOfRange {
                target: 1,
                page_count: None
            })
        );
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_next_and_previous_clamp() {
        let mut state = ready(3);
        assert_eq!(state.go_to_previous_page(), Ok(false));
        assert_eq!(state.current_page(), 1);

        assert_eq!(state.go_to_next_page(), Ok(true));
        assert_eq!(state.go_to_next_page(), Ok(true));
        assert_eq!(state.go_to_next_page(), Ok(false));
        assert_eq!(state.current_page(), 3);
        assert!(!state.can_go_next());
        assert!(state.can_go_previous());
    }

    #[test]
    fn test_navigation_echoes_new_page() {
        let mut state = ready(5);
        state.go_to_next_page().unwrap();
        assert_eq!(state.page_input(), "2");
        state.go_to_next_page().unwrap();
        assert_eq!(state.page_input(), "3");
        state.go_to_previous_page().unwrap();
        assert_eq!(state.page_input(), "2");
        state.jump_to_page(5).unwrap();
        assert_eq!(state.page_input(), "5");
    }

    #[test]
    fn test_jump_out_of_range_leaves_page() {
        let mut state = ready(10);
        state.jump_to_page(4).unwrap();
        for target in [0, -1, 11, i64::MAX] {
            assert_eq!(
                state.jump_to_page(target),
                Err(NavigationError::OutOfRange {
                    target,
                    page_count: Some(10)
                })
            );
            assert_eq!(state.current_page(), 4);
        }
    }

    #[test]
    fn test_page_input_is_decoupled_until_commit() {
        let mut state = ready(10);
        state.set_page_input("7");
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_input_error(), None);

        assert_eq!(state.commit_page_input(), Ok(NonZeroU32::new(7).unwrap()));
        assert_eq!(state.current_page(), 7);
        assert_eq!(state.page_input(), "7");
    }

    #[test]
    fn test_commit_normalizes_input_text() {
        let mut state = ready(10);
        state.set_page_input(" 08 ");
        state.commit_page_input().unwrap();
        assert_eq!(state.page_input(), "8");
    }

    #[test]
    fn test_failed_commit_flags_field() {
        let mut state = ready(10);
        state.set_page_input("12");
        assert_eq!(
            state.page_input_error(),
            Some(ValidationError::OutOfRange { page_count: 10 })
        );
        assert_eq!(
            state.commit_page_input(),
            Err(ValidationError::OutOfRange { page_count: 10 })
        );
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.page_input(), "12");
    }

    #[test]
    fn test_pending_input_becomes_valid_after_load() {
        let mut state = ViewerState::default();
        let token = state.begin_load();
        state.set_page_input("3");
        assert_eq!(state.page_input_error(), Some(ValidationError::BoundUnknown));

        let _ = state.complete_load(token, 5);
        assert_eq!(state.page_input(), "3");
        assert_eq!(state.page_input_error(), None);
        assert_eq!(state.commit_page_input(), Ok(NonZeroU32::new(3).unwrap()));
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_set_scale() {
        let mut state = ViewerState::default();
        assert_eq!(state.set_scale(2.5), Ok(()));
        assert_eq!(state.scale(), 2.5);
        assert_eq!(state.set_scale(0.0), Err(NavigationError::InvalidScale(0.0)));
        assert!(state.set_scale(f32::INFINITY).is_err());
        assert_eq!(state.scale(), 2.5);
    }

    #[test]
    fn test_rotation_accumulates() {
        let mut state = ViewerState::default();
        for _ in 0..5 {
            state.rotate90();
        }
        assert_eq!(state.rotation(), 450);
        assert_eq!(state.visual_rotation(), 90);
    }

    #[test]
    fn test_reset_view() {
        let mut state = ready(2);
        state.set_scale(2.0).unwrap();
        state.rotate90();
        state.go_to_next_page().unwrap();
        state.reset_view(1.0).unwrap();
        assert_eq!(state.scale(), 1.0);
        assert_eq!(state.rotation(), 0);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_begin_document_resets_transform() {
        let mut state = ready(4);
        state.set_scale(2.0).unwrap();
        state.rotate90();
        state.go_to_next_page().unwrap();

        state.begin_document(1.5);
        assert_eq!(state.status(), LoadStatus::Loading);
        assert_eq!(state.page_count(), None);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.scale(), 1.5);
        assert_eq!(state.rotation(), 0);
    }

    #[test]
    fn test_begin_load_keeps_transform() {
        let mut state = ready(4);
        state.set_scale(2.0).unwrap();
        state.rotate90();
        state.begin_load();
        assert_eq!(state.scale(), 2.0);
        assert_eq!(state.rotation(), 90);
    }

    #[test]
    fn test_render_request_only_when_ready() {
        let mut state = ViewerState::default();
        assert_eq!(state.render_request(640), None);

        let token = state.begin_load();
        let _ = state.complete_load(token, 2);
        state.rotate90();
        state.rotate90();
        state.rotate90();
        state.rotate90();
        state.rotate90();
        assert_eq!(
            state.render_request(640),
            Some(RenderRequest {
                page: 1,
                scale: 1.0,
                rotation: 90,
                target_width: 640,
            })
        );
    }
}
