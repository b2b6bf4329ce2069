//! Filesystem-backed document store.
//! Used by: main.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::{FetchedFile, FileSource};

#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Config(format!("docs root {} is not a directory", root.display())));
        }
        Ok(Self { root })
    }

    fn object_path(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(Error::ForbiddenPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileSource for LocalSource {
    async fn fetch(&self, path: &str) -> Result<FetchedFile> {
        let object = self.object_path(path)?;
        let file = match tokio::fs::File::open(&object).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::NotFound(path.to_string())),
            Err(e) => return Err(Error::Backend(format!("open {}: {e}", object.display()))),
        };
        let metadata = file
            .metadata()
            .await
            .map_err(|e| Error::Backend(format!("stat {}: {e}", object.display())))?;
        if !metadata.is_file() {
            return Err(Error::NotFound(path.to_string()));
        }

        Ok(FetchedFile {
            content: Box::pin(file),
            content_type: None,
            size: metadata.len(),
        })
    }
}
