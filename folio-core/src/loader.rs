//! Document references and the loader contract

use crate::error::LoadError;
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentRef {
    Path(PathBuf),
    Url(String),
}

impl DocumentRef {
    /// Short name for window titles and tabs
    pub fn display_name(&self) -> String {
        match self {
            DocumentRef::Path(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("Untitled")
                .to_string(),
            DocumentRef::Url(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|u| u.trim_end_matches('/').rsplit('/').next())
                .filter(|segment| !segment.is_empty() && !segment.contains(':'))
                .unwrap_or(url)
                .to_string(),
        }
    }
}

/// `http://` and `https://` references are URLs, everything else a path.
impl From<&str> for DocumentRef {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentRef::Url(trimmed.to_string())
        } else {
            DocumentRef::Path(PathBuf::from(trimmed))
        }
    }
}

impl FromStr for DocumentRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&Path> for DocumentRef {
    fn from(path: &Path) -> Self {
        DocumentRef::Path(path.to_path_buf())
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRef::Path(path) => write!(f, "{}", path.display()),
            DocumentRef::Url(url) => f.write_str(url),
        }
    }
}

/// A loaded document, as far as the viewer cares.
pub trait PagedDocument {
    fn page_count(&self) -> u32;
}

impl<T: PagedDocument + ?Sized> PagedDocument for Arc<T> {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }
}

/// Loads documents without blocking the caller.
///
/// The returned future owns everything it needs so the host can hand it to
/// its executor and feed the result back to
/// [`Viewer::finish_load`](crate::Viewer::finish_load) later.
pub trait DocumentLoader {
    type Document: PagedDocument + Send + 'static;

    fn load(
        &self,
        reference: DocumentRef,
    ) -> impl Future<Output = Result<Self::Document, LoadError>> + Send + 'static;
}
