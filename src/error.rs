//! Unified error types for docgate.
//! Used by: token, auth, serve, source, config, handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed token")]
    MalformedToken,

    #[error("bad token signature")]
    BadSignature,

    #[error("malformed token payload: {0}")]
    MalformedPayload(String),

    #[error("token expired")]
    Expired,

    #[error("access token required")]
    CredentialMissing,

    #[error("forbidden path: {0}")]
    ForbiddenPath(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("fetch timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("invalid duration format: {0}")]
    InvalidDuration(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for every failure that originates from a presented token.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Error::MalformedToken | Error::BadSignature | Error::MalformedPayload(_) | Error::Expired
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::MalformedToken
            | Error::BadSignature
            | Error::MalformedPayload(_)
            | Error::Expired
            | Error::CredentialMissing => StatusCode::UNAUTHORIZED,
            Error::ForbiddenPath(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Backend(_)
            | Error::Timeout(_)
            | Error::InvalidDuration(_)
            | Error::Config(_)
            | Error::Serialization(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Bodies are fixed per outcome so nothing internal reaches the client.
    fn public_message(&self) -> &'static str {
        match self {
            Error::CredentialMissing => "Access token required",
            e if e.is_token_rejection() => "Invalid or expired token",
            Error::ForbiddenPath(_) => "Forbidden",
            Error::NotFound(_) => "File not found",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
