//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::serve::Mounts;
use crate::source::{FileSource, LocalSource};
use crate::telemetry::Metrics;
use crate::token::TokenManager;

pub struct AppStateInner {
    pub tokens: TokenManager,
    pub source: Option<Arc<dyn FileSource>>,
    pub mounts: Mounts,
    pub fetch_timeout: Duration,
    pub frame_options: HeaderValue,
    pub metrics: Metrics,
}

pub type AppState = Arc<AppStateInner>;

pub struct StateBuilder {
    tokens: TokenManager,
    source: Option<Arc<dyn FileSource>>,
    mounts: Mounts,
    fetch_timeout: Duration,
    frame_options: String,
}

impl StateBuilder {
    pub fn new(secret: &str) -> Self {
        Self {
            tokens: TokenManager::new(secret),
            source: None,
            mounts: Mounts::new("/docs", "index.html"),
            fetch_timeout: Duration::from_secs(30),
            frame_options: "ALLOWALL".into(),
        }
    }

    pub fn source(mut self, source: impl FileSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn mounts(mut self, mounts: Mounts) -> Self {
        self.mounts = mounts;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn frame_options(mut self, value: &str) -> Self {
        self.frame_options = value.into();
        self
    }

    pub fn build(self) -> Result<AppState> {
        let frame_options = HeaderValue::from_str(&self.frame_options)
            .map_err(|_| Error::Config(format!("invalid frame options {:?}", self.frame_options)))?;
        Ok(Arc::new(AppStateInner {
            tokens: self.tokens,
            source: self.source,
            mounts: self.mounts,
            fetch_timeout: self.fetch_timeout,
            frame_options,
            metrics: Metrics::new(),
        }))
    }
}

pub fn build_state(config: &Config) -> Result<AppState> {
    if config.uses_default_secret() {
        tracing::warn!("TOKEN_SECRET not set, using the built-in default secret");
    }

    let mut builder = StateBuilder::new(&config.token_secret)
        .mounts(Mounts::new(&config.docs_path, &config.index_document))
        .fetch_timeout(config.fetch_timeout)
        .frame_options(&config.frame_options);

    match &config.docs_root {
        Some(root) => {
            builder = builder.source(LocalSource::new(root)?);
            tracing::info!(root = %root.display(), "serving documents from local store");
        }
        None => tracing::warn!("DOCS_ROOT not set, file serving disabled"),
    }

    builder.build()
}
