//! Maps the path left after a mount prefix to a store object.
//! Used by: handlers::documents.

use crate::error::{Error, Result};

/// Store prefix and URL sub-path of the public asset tree.
pub const STATIC_DIR: &str = "static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounts {
    /// Authenticated document mount, e.g. `/docs`.
    pub docs: String,
    /// Public asset mount, always `<docs>/static`.
    pub static_assets: String,
    pub index_document: String,
}

impl Mounts {
    pub fn new(docs: &str, index_document: &str) -> Self {
        let docs = docs.trim_end_matches('/').to_string();
        Self {
            static_assets: format!("{docs}/{STATIC_DIR}"),
            docs,
            index_document: index_document.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Fetch this object from the store.
    Serve(String),
    /// Answer with a permanent redirect to this location.
    Redirect(String),
}

pub fn resolve_document(mounts: &Mounts, remaining: &str) -> Result<Resolution> {
    if let Some(asset) = remaining.strip_prefix(STATIC_DIR).and_then(|r| r.strip_prefix('/')) {
        return Ok(Resolution::Redirect(format!("{}/{asset}", mounts.static_assets)));
    }
    if remaining.is_empty() {
        return Ok(Resolution::Serve(mounts.index_document.clone()));
    }
    if remaining.ends_with('/') {
        return Err(Error::ForbiddenPath(remaining.to_string()));
    }
    reject_parent_segments(remaining)?;
    Ok(Resolution::Serve(remaining.to_string()))
}

/// Resolves a path under the public mount to its object under `static/`.
/// There is no index fallback here.
pub fn resolve_static(remaining: &str) -> Result<String> {
    if remaining.is_empty() {
        return Err(Error::NotFound(remaining.to_string()));
    }
    if remaining.ends_with('/') {
        return Err(Error::ForbiddenPath(remaining.to_string()));
    }
    reject_parent_segments(remaining)?;
    Ok(format!("{STATIC_DIR}/{remaining}"))
}

fn reject_parent_segments(path: &str) -> Result<()> {
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(Error::ForbiddenPath(path.to_string()));
    }
    Ok(())
}
