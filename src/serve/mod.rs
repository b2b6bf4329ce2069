//! Path resolution, bounded fetching, and response shaping for served files.
//! Used by: handlers::documents.

pub mod resolve;
pub mod respond;

use std::time::Duration;

use crate::error::{Error, Result};
use crate::source::{FetchedFile, FileSource};

pub use resolve::{resolve_document, resolve_static, Mounts, Resolution};
pub use respond::{file_response, Tree};

/// Fetches `path`, failing with `Error::Timeout` once `limit` elapses.
pub async fn fetch_within(source: &dyn FileSource, path: &str, limit: Duration) -> Result<FetchedFile> {
    tokio::time::timeout(limit, source.fetch(path))
        .await
        .map_err(|_| Error::Timeout(limit))?
}
