//! Document and static asset endpoints.
//! Used by: server.

use axum::extract::{Path, Request, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Extension;

use crate::auth::AccessGrant;
use crate::error::{Error, Result};
use crate::serve::{fetch_within, file_response, resolve_document, resolve_static, Resolution, Tree};
use crate::source::FetchedFile;
use crate::state::{AppState, AppStateInner};

/// Rejects directory-style paths on the document mount before the gate runs,
/// so the outcome does not depend on whether a credential was presented.
/// Judges the same percent-decoded wildcard that `serve_document` receives.
pub async fn forbid_directory_paths(
    State(state): State<AppState>,
    remaining: Option<Path<String>>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let remaining = remaining.map(|Path(p)| p).unwrap_or_default();

    if let Err(err @ Error::ForbiddenPath(_)) = resolve_document(&state.mounts, &remaining) {
        tracing::info!(path = %request.uri().path(), "directory listing refused");
        return Err(err);
    }
    Ok(next.run(request).await)
}

pub async fn serve_document(
    State(state): State<AppState>,
    Extension(grant): Extension<AccessGrant>,
    remaining: Option<Path<String>>,
) -> Result<Response> {
    let remaining = remaining.map(|Path(p)| p).unwrap_or_default();

    let path = match resolve_document(&state.mounts, &remaining) {
        Ok(Resolution::Serve(path)) => path,
        Ok(Resolution::Redirect(location)) => {
            tracing::debug!(from = %remaining, to = %location, "redirecting to static mount");
            return Ok((StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response());
        }
        Err(err) => {
            tracing::info!(path = %remaining, reason = %err, "document path rejected");
            return Err(err);
        }
    };

    let file = fetch(&state, &path).await?;
    tracing::info!(
        path = %path,
        size = file.size,
        content_type = ?file.content_type,
        token_id = %grant.token.id,
        "serving document"
    );
    state.metrics.record_document();
    Ok(file_response(Tree::Documents, &path, file, &state.frame_options))
}

pub async fn serve_static(
    State(state): State<AppState>,
    remaining: Option<Path<String>>,
) -> Result<Response> {
    let remaining = remaining.map(|Path(p)| p).unwrap_or_default();

    let path = resolve_static(&remaining).map_err(|err| {
        tracing::info!(path = %remaining, reason = %err, "static path rejected");
        err
    })?;

    let file = fetch(&state, &path).await?;
    tracing::debug!(path = %path, size = file.size, "serving static asset");
    state.metrics.record_static();
    Ok(file_response(Tree::Static, &path, file, &state.frame_options))
}

async fn fetch(state: &AppStateInner, path: &str) -> Result<FetchedFile> {
    let Some(source) = state.source.as_deref() else {
        return Err(Error::NotFound(path.to_string()));
    };

    fetch_within(source, path, state.fetch_timeout)
        .await
        .map_err(|err| {
            match &err {
                Error::NotFound(_) => tracing::info!(path = %path, "file not found"),
                _ => {
                    state.metrics.record_fetch_failure();
                    tracing::error!(path = %path, error = %err, "error fetching file");
                }
            }
            err
        })
}
