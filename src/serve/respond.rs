//! Builds the streamed response for a fetched file.
//! Used by: handlers::documents.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::response::Response;
use bytes::Bytes;
use futures::{future, stream, StreamExt};
use tokio::io::AsyncReadExt;
use tokio_util::io::ReaderStream;

use crate::source::{detect_content_type, FetchedFile};

const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");

/// Which mount served the file. Drives caching and security headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tree {
    Documents,
    Static,
}

pub fn cache_control(tree: Tree, content_type: &str) -> &'static str {
    match tree {
        Tree::Static => "public, max-age=3600",
        Tree::Documents if content_type.contains("text/html") => "private, max-age=60",
        Tree::Documents => "private, max-age=3600",
    }
}

fn content_type_for(path: &str, declared: Option<&str>) -> HeaderValue {
    declared
        .filter(|ct| !ct.is_empty())
        .and_then(|ct| HeaderValue::from_str(ct).ok())
        .unwrap_or_else(|| HeaderValue::from_static(detect_content_type(path)))
}

pub(crate) fn response_headers(
    tree: Tree,
    path: &str,
    declared_type: Option<&str>,
    size: u64,
    frame_options: &HeaderValue,
) -> HeaderMap {
    let content_type = content_type_for(path, declared_type);
    let cache = cache_control(tree, content_type.to_str().unwrap_or_default());

    let mut headers = HeaderMap::new();
    if tree == Tree::Documents {
        headers.insert(X_ROBOTS_TAG, HeaderValue::from_static("noindex, nofollow, noarchive, nosnippet"));
        headers.insert(X_FRAME_OPTIONS, frame_options.clone());
        headers.insert(REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    }
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(size));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));
    headers
}

pub fn file_response(tree: Tree, path: &str, file: FetchedFile, frame_options: &HeaderValue) -> Response {
    let headers = response_headers(tree, path, file.content_type.as_deref(), file.size, frame_options);
    let mut response = Response::new(body_stream(path.to_string(), file));
    *response.headers_mut() = headers;
    response
}

/// Streams at most `file.size` bytes. The reader lives inside the body and is
/// dropped with it, whether the transfer completes, fails, or is abandoned.
fn body_stream(path: String, file: FetchedFile) -> Body {
    let expected = file.size;
    let sent = Arc::new(AtomicU64::new(0));

    let counter = Arc::clone(&sent);
    let error_path = path.clone();
    let chunks = ReaderStream::new(file.content.take(expected)).inspect(move |chunk| match chunk {
        Ok(bytes) => {
            counter.fetch_add(bytes.len() as u64, Ordering::Relaxed);
        }
        Err(e) => tracing::error!(path = %error_path, error = %e, "error streaming file"),
    });

    let finished = stream::once(async move {
        let copied = sent.load(Ordering::Relaxed);
        if copied < expected {
            tracing::warn!(path = %path, copied, expected, "short read while streaming file");
        } else {
            tracing::debug!(path = %path, bytes = copied, "streamed file");
        }
    })
    .filter_map(|()| future::ready(None::<io::Result<Bytes>>));

    Body::from_stream(chunks.chain(finished))
}
