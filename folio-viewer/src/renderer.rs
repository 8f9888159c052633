use anyhow::{Context, Result};
use folio_core::{DocumentLoader, DocumentRef, LoadError, PagedDocument, RenderRequest};
use pdfium_render::prelude::*;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use crate::source;

static PDFIUM: OnceLock<Pdfium> = OnceLock::new();

/// Process-wide PDFium instance, bound on first use
fn pdfium() -> Result<&'static Pdfium> {
    if let Some(pdfium) = PDFIUM.get() {
        return Ok(pdfium);
    }

    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .context("Failed to bind to PDFium library. Please install PDFium or download the library from https://github.com/bblanchon/pdfium-binaries")?;

    Ok(PDFIUM.get_or_init(|| Pdfium::new(bindings)))
}

/// A PDF opened with PDFium
pub struct Document {
    inner: PdfDocument<'static>,
}

// Manual Debug impl since PdfDocument does not implement it
impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("page_count", &self.page_count())
            .finish()
    }
}

impl Document {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LoadError> {
        let pdfium = pdfium().map_err(|e| LoadError::Unavailable(format!("{e:#}")))?;
        let inner = pdfium
            .load_pdf_from_byte_vec(bytes, None)
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Draw the requested page, fitted to `request.output_width()` pixels
    pub fn render_page(&self, request: &RenderRequest) -> Result<image::RgbaImage> {
        let index = u16::try_from(request.page_index()).context("Page index out of bounds")?;
        let page = self
            .inner
            .pages()
            .get(index)
            .context("Page index out of bounds")?;

        let rotation = match request.rotation {
            90 => PdfPageRenderRotation::Degrees90,
            180 => PdfPageRenderRotation::Degrees180,
            270 => PdfPageRenderRotation::Degrees270,
            _ => PdfPageRenderRotation::None,
        };

        let width = i32::try_from(request.output_width()).context("Render width out of range")?;
        let render_config = PdfRenderConfig::new()
            .set_target_width(width)
            .rotate(rotation, false);

        let bitmap = page
            .render_with_config(&render_config)
            .context("Failed to render page")?;

        let img = image::RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes(),
        )
        .context("Failed to create image from bitmap")?;

        Ok(img)
    }
}

impl PagedDocument for Document {
    fn page_count(&self) -> u32 {
        u32::from(self.inner.pages().len())
    }
}

/// Loads local or remote PDFs through PDFium
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumLoader;

impl DocumentLoader for PdfiumLoader {
    type Document = Arc<Document>;

    fn load(
        &self,
        reference: DocumentRef,
    ) -> impl Future<Output = Result<Self::Document, LoadError>> + Send + 'static {
        async move {
            let bytes = source::fetch(&reference).await?;
            tracing::debug!(document = %reference, bytes = bytes.len(), "Fetched document");
            Document::from_bytes(bytes).map(Arc::new)
        }
    }
}
