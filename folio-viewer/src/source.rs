//! Fetching raw document bytes from disk or over HTTP

use folio_core::{DocumentRef, LoadError};
use std::io::ErrorKind;
use std::path::Path;

/// Read the bytes `reference` points at.
pub async fn fetch(reference: &DocumentRef) -> Result<Vec<u8>, LoadError> {
    match reference {
        DocumentRef::Path(path) => read_file(path).await,
        DocumentRef::Url(url) => download(url).await,
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::NotFound(path.display().to_string()),
        _ => LoadError::Io(format!("{}: {e}", path.display())),
    })
}

async fn download(url: &str) -> Result<Vec<u8>, LoadError> {
    let response = reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| match e.status() {
            Some(reqwest::StatusCode::NOT_FOUND) => LoadError::NotFound(url.to_string()),
            _ => LoadError::Http(e.to_string()),
        })?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| LoadError::Http(e.to_string()))?;

    Ok(bytes.to_vec())
}
