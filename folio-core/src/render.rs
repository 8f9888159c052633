//! Rendering projection
//!
//! The core never draws pixels. It only decides which page should be drawn
//! and with which transform; a [`PageRenderer`] turns that into a surface.

use std::fmt;

/// Widest surface a renderer is asked for, whatever the zoom
pub const MAX_OUTPUT_WIDTH: u32 = 16_384;

/// One page draw request: the complete contract with the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// 1-based page number
    pub page: u32,
    /// Zoom factor applied on top of `target_width`
    pub scale: f32,
    /// Clockwise rotation in degrees, one of 0, 90, 180 or 270
    pub rotation: u16,
    /// Width in pixels of the area the page is fitted to
    pub target_width: u32,
}

impl RenderRequest {
    /// 0-based page index, as most rendering backends address pages
    pub fn page_index(&self) -> u32 {
        self.page - 1
    }

    /// Width in pixels of the drawn surface, between one and [`MAX_OUTPUT_WIDTH`]
    pub fn output_width(&self) -> u32 {
        let width = (f64::from(self.target_width) * f64::from(self.scale)).round();
        if width.is_nan() || width < 1.0 {
            1
        } else if width >= f64::from(MAX_OUTPUT_WIDTH) {
            MAX_OUTPUT_WIDTH
        } else {
            width as u32
        }
    }

    /// Scale as a whole percentage, usable as a cache key
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} at {}% rotated {}° ({}px)",
            self.page,
            self.scale_percent(),
            self.rotation,
            self.target_width
        )
    }
}

/// Draws the page a [`RenderRequest`] describes.
pub trait PageRenderer {
    type Surface;
    type Error;

    fn render(&mut self, request: &RenderRequest) -> Result<Self::Surface, Self::Error>;
}
