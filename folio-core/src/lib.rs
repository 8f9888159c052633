//! # folio-core
//!
//! The state machine behind a paginated document viewer: the asynchronous
//! load lifecycle, page navigation with boundary clamping, zoom and rotation
//! transforms, and a page-jump field validated against a page count that is
//! only known once the document has loaded.
//!
//! Rendering, loading and user notification are collaborators supplied by
//! the host through the [`PageRenderer`], [`DocumentLoader`] and
//! [`Notifier`] traits.
//!
//! ```
//! use folio_core::{DocumentRef, LoadStatus, Notice, PagedDocument, Viewer, ViewerConfig};
//!
//! struct Pages(u32);
//!
//! impl PagedDocument for Pages {
//!     fn page_count(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let mut viewer = Viewer::new(ViewerConfig::default(), Vec::<Notice>::new());
//! let token = viewer.open("report.pdf".parse::<DocumentRef>().unwrap());
//! viewer.finish_load(token, Ok(Pages(12)));
//! assert_eq!(viewer.state().status(), LoadStatus::Ready);
//!
//! viewer.next_page().unwrap();
//! assert_eq!(viewer.render_request().map(|r| r.page), Some(2));
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod notify;
pub mod render;
pub mod state;
pub mod validator;
pub mod viewer;

pub use config::{ViewerConfig, DEFAULT_SCALE_PRESETS};
pub use error::{ConfigError, LoadError, NavigationError, ValidationError};
pub use loader::{DocumentLoader, DocumentRef, PagedDocument};
pub use notify::{Notice, Notifier, Severity};
pub use render::{PageRenderer, RenderRequest, MAX_OUTPUT_WIDTH};
pub use state::{LoadOutcome, LoadStatus, LoadToken, ViewerState};
pub use validator::validate;
pub use viewer::Viewer;
