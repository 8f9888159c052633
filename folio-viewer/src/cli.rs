//! Command-line arguments

use clap::Parser;
use folio_core::{DocumentRef, ViewerConfig};

/// Log filter used when neither `--log-filter` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "folio_viewer=debug,folio_core=debug,info";

/// View PDF documents from disk or the web
#[derive(Debug, Parser)]
#[command(name = "folio-viewer", version, about)]
pub struct Cli {
    /// File path or http(s) URL of the document to open
    pub document: Option<DocumentRef>,

    /// Initial zoom factor
    #[arg(long, default_value_t = 1.0, value_parser = parse_scale)]
    pub scale: f32,

    /// Page width in pixels before the window reports its size
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Number of rendered pages kept in memory
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub cache_pages: u64,

    /// tracing filter directive, e.g. "folio_core=trace"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig::default()
            .with_default_scale(self.scale)
            .with_initial_width(self.width)
            .with_render_cache_pages(usize::try_from(self.cache_pages).unwrap_or(usize::MAX))
    }
}

fn parse_scale(raw: &str) -> Result<f32, String> {
    let scale: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(format!("scale must be a positive number, got {raw}"))
    }
}
