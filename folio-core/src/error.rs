//! Error types for the viewer state machine

use thiserror::Error;

/// A document could not be loaded or opened.
///
/// Fatal for the document it was raised for: the viewer stays `Failed`
/// until a new document reference is supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("failed to read document: {0}")]
    Io(String),

    #[error("failed to fetch document: {0}")]
    Http(String),

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("document renderer unavailable: {0}")]
    Unavailable(String),

    #[error("document has no pages")]
    EmptyDocument,
}

/// A navigation or transform request the current state cannot honour.
///
/// The state is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NavigationError {
    #[error("no document is ready")]
    NotReady,

    #[error("page {target} is out of range")]
    OutOfRange {
        target: i64,
        page_count: Option<u32>,
    },

    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f32),
}

/// Raw page-jump input that does not name a page of the loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("page input is not a number")]
    NotANumber,

    #[error("page count is not known yet")]
    BoundUnknown,

    #[error("page must be between 1 and {page_count}")]
    OutOfRange { page_count: u32 },
}

/// Invalid [`ViewerConfig`](crate::ViewerConfig) values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("scale presets must not be empty")]
    NoScalePresets,

    #[error("scale preset {0} is not a positive finite number")]
    InvalidScalePreset(f32),

    #[error("default scale {0} is not a positive finite number")]
    InvalidDefaultScale(f32),

    #[error("render width must be at least one pixel")]
    ZeroRenderWidth,

    #[error("render cache must hold at least one page")]
    ZeroCacheCapacity,
}

/// Returns true when `value` can be used as a zoom factor.
pub(crate) fn is_valid_scale(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
