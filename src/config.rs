//! Environment-driven configuration.
//! Used by: main, bin/docgate-token, state.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_SECRET: &str = "default-secret-change-in-production";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub token_secret: String,
    pub log_level: String,
    pub docs_path: String,
    /// Root of the local document store; `None` disables file serving.
    pub docs_root: Option<PathBuf>,
    pub index_document: String,
    pub fetch_timeout: Duration,
    pub frame_options: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = get("PORT", "8080");
        let port = port
            .parse::<u16>()
            .map_err(|_| Error::Config(format!("PORT must be a port number, got {port:?}")))?;

        let timeout = get("FETCH_TIMEOUT_SECS", "30");
        let fetch_timeout = match timeout.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                return Err(Error::Config(format!(
                    "FETCH_TIMEOUT_SECS must be a positive integer, got {timeout:?}"
                )))
            }
        };

        let index_document = get("INDEX_DOCUMENT", "index.html");
        if index_document.contains('/') {
            return Err(Error::Config("INDEX_DOCUMENT must be a bare file name".into()));
        }

        Ok(Self {
            port,
            token_secret: get("TOKEN_SECRET", DEFAULT_SECRET),
            log_level: get("LOG_LEVEL", "info"),
            docs_path: normalize_mount(&get("DOCS_PATH", "/docs"))?,
            docs_root: lookup("DOCS_ROOT").filter(|v| !v.is_empty()).map(PathBuf::from),
            index_document,
            fetch_timeout,
            frame_options: get("FRAME_OPTIONS", "ALLOWALL"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.token_secret == DEFAULT_SECRET
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("token_secret", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .field("docs_path", &self.docs_path)
            .field("docs_root", &self.docs_root)
            .field("index_document", &self.index_document)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("frame_options", &self.frame_options)
            .finish()
    }
}

fn normalize_mount(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        return Err(Error::Config("DOCS_PATH cannot be the site root".into()));
    }
    if trimmed.split('/').any(|s| s.is_empty() || s == "." || s == ".." || s.starts_with('*') || s.starts_with(':')) {
        return Err(Error::Config(format!("DOCS_PATH {raw:?} is not a plain path")));
    }
    Ok(format!("/{trimmed}"))
}
