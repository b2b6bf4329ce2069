//! In-memory document store.
//! Used by: tests, embedding callers.

use std::collections::HashMap;
use std::io::Cursor;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Error, Result};
use crate::source::{FetchedFile, FileSource};

#[derive(Debug, Clone)]
struct MemoryObject {
    data: Bytes,
    content_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    objects: HashMap<String, MemoryObject>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, data: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        self.insert(path, data, content_type);
        self
    }

    pub fn insert(&mut self, path: &str, data: impl Into<Bytes>, content_type: Option<&str>) {
        self.objects.insert(
            path.trim_start_matches('/').to_string(),
            MemoryObject {
                data: data.into(),
                content_type: content_type.map(str::to_owned),
            },
        );
    }
}

#[async_trait]
impl FileSource for MemorySource {
    async fn fetch(&self, path: &str) -> Result<FetchedFile> {
        let object = self
            .objects
            .get(path.trim_start_matches('/'))
            .ok_or_else(|| Error::NotFound(path.to_string()))?;
        Ok(FetchedFile {
            content: Box::pin(Cursor::new(object.data.clone())),
            content_type: object.content_type.clone(),
            size: object.data.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn stored_object_is_returned() -> Result<()> {
        let source = MemorySource::new().with_file("a/b.txt", "hello", Some("text/plain"));
        let mut file = source.fetch("/a/b.txt").await?;
        assert_eq!(file.size, 5);
        assert_eq!(file.content_type.as_deref(), Some("text/plain"));
        let mut body = Vec::new();
        file.content.read_to_end(&mut body).await?;
        assert_eq!(body, b"hello");
        Ok(())
    }

    #[tokio::test]
    async fn absent_object_is_not_found() {
        let source = MemorySource::new();
        assert!(matches!(source.fetch("x").await, Err(Error::NotFound(_))));
    }
}
