//! Backing document store abstraction.
//! Used by: state, handlers::documents, serve::respond.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;

pub mod local;
pub mod memory;

pub use local::LocalSource;
pub use memory::MemorySource;

pub type ContentStream = Pin<Box<dyn AsyncRead + Send>>;

/// An open object ready to stream. Dropping it releases the underlying reader.
pub struct FetchedFile {
    pub content: ContentStream,
    pub content_type: Option<String>,
    pub size: u64,
}

impl fmt::Debug for FetchedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedFile")
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Fetches documents by logical path.
///
/// Implementations return `Error::NotFound` for a missing object and
/// `Error::Backend` for anything else.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<FetchedFile>;
}

pub fn detect_content_type(path: &str) -> &'static str {
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "xml" => "application/xml; charset=utf-8",
        "txt" => "text/plain; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
