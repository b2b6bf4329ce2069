//! Axum router and server setup.
//! Used by: main.

use axum::extract::Request;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::auth::require_token;
use crate::handlers;
use crate::handlers::documents::forbid_directory_paths;
use crate::state::AppState;

/// Token-gated document mount: `<docs>`, `<docs>/`, `<docs>/*path`.
pub fn documents_router(state: AppState) -> Router {
    let docs = state.mounts.docs.clone();
    Router::new()
        .route(&docs, get(handlers::documents::serve_document))
        .route(&format!("{docs}/"), get(handlers::documents::serve_document))
        .route(&format!("{docs}/*path"), get(handlers::documents::serve_document))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .route_layer(middleware::from_fn_with_state(state.clone(), forbid_directory_paths))
        .with_state(state)
}

/// Public asset mount, no credential required.
pub fn static_router(state: AppState) -> Router {
    let assets = state.mounts.static_assets.clone();
    Router::new()
        .route(&assets, get(handlers::documents::serve_static))
        .route(&format!("{assets}/"), get(handlers::documents::serve_static))
        .route(&format!("{assets}/*path"), get(handlers::documents::serve_static))
        .with_state(state)
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        .route("/ping", get(handlers::health::ping))
        .route("/metrics", get(handlers::metrics::metrics))
        .with_state(state.clone());

    if state.source.is_some() {
        router = router
            .merge(static_router(state.clone()))
            .merge(documents_router(state));
    }

    router.layer(TraceLayer::new_for_http().make_span_with(request_span))
}

/// Request span carrying the method and path only. The query string can hold
/// a credential and is never recorded.
fn request_span(request: &Request) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        version = ?request.version(),
    )
}

pub async fn run(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down server");
}
