//! Access gate middleware for the authenticated document mount.
//! Used by: server, handlers::documents.

use axum::extract::{Request, State};
use axum::http::{Extensions, HeaderMap, Uri};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::credential::extract_credential;
use crate::error::{Error, Result};
use crate::state::AppState;
use crate::token::{Token, TokenManager};

/// Claims of the token that admitted the current request.
#[derive(Debug, Clone)]
pub struct AccessGrant {
    pub token: Token,
}

/// Returns the admitting token, or `None` on routes the gate does not cover.
pub fn access_grant(extensions: &Extensions) -> Option<&Token> {
    extensions.get::<AccessGrant>().map(|grant| &grant.token)
}

pub fn authorize(tokens: &TokenManager, uri: &Uri, headers: &HeaderMap) -> Result<Token> {
    let wire = extract_credential(uri, headers).ok_or(Error::CredentialMissing)?;
    tokens.verify(&wire)
}

pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path().to_owned();

    // Never log the credential itself, only the outcome.
    let token = match authorize(&state.tokens, request.uri(), request.headers()) {
        Ok(token) => token,
        Err(Error::CredentialMissing) => {
            state.metrics.record_reject();
            tracing::info!(path = %path, "request without access token");
            return Err(Error::CredentialMissing);
        }
        Err(err) => {
            state.metrics.record_reject();
            tracing::warn!(path = %path, reason = %err, "token validation failed");
            return Err(err);
        }
    };

    state.metrics.record_verify();
    tracing::debug!(path = %path, token_id = %token.id, "access granted");
    request.extensions_mut().insert(AccessGrant { token });
    Ok(next.run(request).await)
}
