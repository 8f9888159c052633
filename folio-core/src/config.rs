//! Viewer configuration

use crate::error::{is_valid_scale, ConfigError};
use crate::notify::Notice;

/// Zoom presets offered by the toolbar
pub const DEFAULT_SCALE_PRESETS: [f32; 4] = [1.0, 1.5, 2.0, 2.5];

/// Tolerance used when matching a scale against the presets
const SCALE_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Zoom factors offered to the user, ascending
    pub scale_presets: Vec<f32>,

    /// Scale used for a freshly opened document and by "reset"
    pub default_scale: f32,

    /// Render width used until the host reports its real width
    pub initial_width: u32,

    /// Notice sent when a document fails to load
    pub load_failure: Notice,

    /// Rendered pages kept around by the host
    pub render_cache_pages: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale_presets: DEFAULT_SCALE_PRESETS.to_vec(),
            default_scale: 1.0,
            initial_width: 800,
            load_failure: Notice::error("Error", "Failed to load document"),
            render_cache_pages: 10,
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the zoom presets; they are sorted ascending
    pub fn with_scale_presets(mut self, presets: impl IntoIterator<Item = f32>) -> Self {
        self.scale_presets = presets.into_iter().collect();
        self.scale_presets.sort_by(f32::total_cmp);
        self.scale_presets.dedup();
        self
    }

    pub fn with_default_scale(mut self, scale: f32) -> Self {
        self.default_scale = scale;
        self
    }

    pub fn with_initial_width(mut self, width: u32) -> Self {
        self.initial_width = width;
        self
    }

    pub fn with_load_failure(mut self, notice: Notice) -> Self {
        self.load_failure = notice;
        self
    }

    pub fn with_render_cache_pages(mut self, pages: usize) -> Self {
        self.render_cache_pages = pages;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale_presets.is_empty() {
            return Err(ConfigError::NoScalePresets);
        }
        if let Some(&bad) = self.scale_presets.iter().find(|s| !is_valid_scale(**s)) {
            return Err(ConfigError::InvalidScalePreset(bad));
        }
        if !is_valid_scale(self.default_scale) {
            return Err(ConfigError::InvalidDefaultScale(self.default_scale));
        }
        if self.initial_width == 0 {
            return Err(ConfigError::ZeroRenderWidth);
        }
        if self.render_cache_pages == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }

    /// Smallest preset strictly above `current`
    pub fn next_preset(&self, current: f32) -> Option<f32> {
        self.scale_presets
            .iter()
            .copied()
            .find(|preset| *preset > current + SCALE_EPSILON)
    }

    /// Largest preset strictly below `current`
    pub fn previous_preset(&self, current: f32) -> Option<f32> {
        self.scale_presets
            .iter()
            .rev()
            .copied()
            .find(|preset| *preset < current - SCALE_EPSILON)
    }

    /// The preset `scale` corresponds to, if any
    pub fn matching_preset(&self, scale: f32) -> Option<f32> {
        self.scale_presets
            .iter()
            .copied()
            .find(|preset| (preset - scale).abs() <= SCALE_EPSILON)
    }
}
