use crate::renderer::Document;
use folio_core::{PageRenderer, RenderRequest};
use iced::widget::image::Handle;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// (page, zoom_percent, rotation, target_width)
type CacheKey = (u32, u32, u16, u32);

/// The document on screen with its rendered page cache
#[derive(Debug)]
pub struct OpenDocument {
    document: Arc<Document>,
    pages: LruCache<CacheKey, Handle>,
}

impl OpenDocument {
    pub fn new(document: Arc<Document>, cache_pages: usize) -> Self {
        Self {
            document,
            pages: LruCache::new(NonZeroUsize::new(cache_pages).unwrap_or(NonZeroUsize::MIN)),
        }
    }
}

impl PageRenderer for OpenDocument {
    type Surface = Handle;
    type Error = anyhow::Error;

    fn render(&mut self, request: &RenderRequest) -> Result<Handle, anyhow::Error> {
        let key = cache_key(request);
        if let Some(handle) = self.pages.get(&key) {
            return Ok(handle.clone());
        }

        let img = self.document.render_page(request)?;
        let handle = Handle::from_rgba(img.width(), img.height(), img.into_raw());
        self.pages.put(key, handle.clone());
        Ok(handle)
    }
}

fn cache_key(request: &RenderRequest) -> CacheKey {
    (
        request.page,
        request.scale_percent(),
        request.rotation,
        request.target_width,
    )
}
