use std::time::Duration as StdDuration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::Duration;
use tower::ServiceExt;

use docgate::error::{Error, Result};
use docgate::serve::Mounts;
use docgate::server::build_router;
use docgate::source::{FetchedFile, FileSource, MemorySource};
use docgate::state::{AppState, StateBuilder};

const INDEX: &str = "<html><body>Quarterly report</body></html>";

fn store() -> MemorySource {
    MemorySource::new()
        .with_file("index.html", INDEX, None)
        .with_file("reports/q3.pdf", vec![0x25, 0x50, 0x44, 0x46], Some("application/pdf"))
        .with_file("static/site.css", "body{margin:0}", None)
}

fn gateway(source: impl FileSource + 'static) -> Result<(AppState, Router)> {
    let state = StateBuilder::new("integration-secret").source(source).build()?;
    Ok((state.clone(), build_router(state)))
}

async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn get(router: &Router, uri: &str) -> Response {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn query_token_serves_index_document() -> Result<()> {
    let (state, router) = gateway(store())?;
    let token = state.tokens.issue(Duration::hours(1))?;

    let response = get(&router, &format!("/docs/?token={token}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "text/html; charset=utf-8");
    assert_eq!(headers[header::CACHE_CONTROL], "private, max-age=60");
    assert_eq!(headers[header::CONTENT_LENGTH], INDEX.len().to_string().as_str());
    assert_eq!(headers["x-robots-tag"], "noindex, nofollow, noarchive, nosnippet");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::REFERRER_POLICY], "no-referrer");
    assert!(headers.get(header::X_FRAME_OPTIONS).is_some());
    assert_eq!(body_string(response).await, INDEX);
    Ok(())
}

#[tokio::test]
async fn expired_token_gets_no_document_bytes() -> Result<()> {
    let (state, router) = gateway(store())?;
    let expired = state.tokens.issue(Duration::hours(-1))?;

    let response = get(&router, &format!("/docs/?token={expired}")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_string(response).await;
    assert_eq!(body, "Invalid or expired token");
    assert!(!body.contains("Quarterly"));
    Ok(())
}

#[tokio::test]
async fn rejection_reasons_are_indistinguishable() -> Result<()> {
    let (state, router) = gateway(store())?;
    let expired = state.tokens.issue(Duration::hours(-1))?;
    let foreign = docgate::token::TokenManager::new("other-secret").issue(Duration::hours(1))?;

    let mut bodies = Vec::new();
    for token in [expired.as_str(), foreign.as_str(), "not-a-token", "a.b.c"] {
        let response = get(&router, &format!("/docs/index.html?token={token}")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_string(response).await);
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[tokio::test]
async fn missing_token_is_unauthorized() -> Result<()> {
    let (_, router) = gateway(store())?;
    let response = get(&router, "/docs/index.html").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_string(response).await, "Access token required");
    Ok(())
}

#[tokio::test]
async fn bearer_header_and_cookie_are_accepted() -> Result<()> {
    let (state, router) = gateway(store())?;
    let token = state.tokens.issue(Duration::hours(1))?;

    let bearer = Request::get("/docs/reports/q3.pdf")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&router, bearer).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "private, max-age=3600");

    let cookie = Request::get("/docs/index.html")
        .header(header::COOKIE, format!("theme=dark; access_token={token}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&router, cookie).await.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn query_token_takes_precedence_over_header() -> Result<()> {
    let (state, router) = gateway(store())?;
    let good = state.tokens.issue(Duration::hours(1))?;
    let expired = state.tokens.issue(Duration::hours(-1))?;

    let request = Request::get(format!("/docs/index.html?token={expired}"))
        .header(header::AUTHORIZATION, format!("Bearer {good}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&router, request).await.status(), StatusCode::UNAUTHORIZED);

    let request = Request::get(format!("/docs/index.html?token={good}"))
        .header(header::AUTHORIZATION, format!("Bearer {expired}"))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&router, request).await.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn static_assets_are_public_and_cacheable() -> Result<()> {
    let (_, router) = gateway(store())?;
    let response = get(&router, "/docs/static/site.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "text/css; charset=utf-8");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert!(headers.get("x-robots-tag").is_none());
    assert_eq!(body_string(response).await, "body{margin:0}");
    Ok(())
}

#[tokio::test]
async fn static_tree_rejects_listing_and_missing_files() -> Result<()> {
    let (_, router) = gateway(store())?;
    assert_eq!(get(&router, "/docs/static/").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/docs/static/css/").await.status(), StatusCode::FORBIDDEN);
    assert_eq!(get(&router, "/docs/static/missing.js").await.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn directory_listing_is_forbidden_regardless_of_auth() -> Result<()> {
    let (state, router) = gateway(store())?;
    let token = state.tokens.issue(Duration::hours(1))?;

    let anonymous = get(&router, "/docs/reports/").await;
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

    let authed = get(&router, &format!("/docs/reports/?token={token}")).await;
    assert_eq!(authed.status(), StatusCode::FORBIDDEN);

    for uri in ["/docs/reports%2F".to_string(), format!("/docs/reports%2F?token={token}")] {
        assert_eq!(get(&router, &uri).await.status(), StatusCode::FORBIDDEN, "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn encoded_parent_segments_are_forbidden() -> Result<()> {
    let (state, router) = gateway(store())?;
    let token = state.tokens.issue(Duration::hours(1))?;
    let response = get(&router, &format!("/docs/reports/%2E%2E/index.html?token={token}")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let anonymous = get(&router, "/docs/reports/%2E%2E/index.html").await;
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn missing_document_is_not_found() -> Result<()> {
    let (state, router) = gateway(store())?;
    let token = state.tokens.issue(Duration::hours(1))?;
    let response = get(&router, &format!("/docs/nope.html?token={token}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "File not found");
    Ok(())
}

struct Broken;

#[async_trait]
impl FileSource for Broken {
    async fn fetch(&self, path: &str) -> Result<FetchedFile> {
        Err(Error::Backend(format!("permission denied reading gs://bucket/{path}")))
    }
}

#[tokio::test]
async fn backend_failure_is_a_generic_server_error() -> Result<()> {
    let (state, router) = gateway(Broken)?;
    let token = state.tokens.issue(Duration::hours(1))?;
    let response = get(&router, &format!("/docs/index.html?token={token}")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(response).await;
    assert_eq!(body, "Internal server error");
    assert!(!body.contains("gs://"));
    assert_eq!(state.metrics.snapshot().fetch_failures, 1);
    Ok(())
}

struct Hung;

#[async_trait]
impl FileSource for Hung {
    async fn fetch(&self, _path: &str) -> Result<FetchedFile> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn hung_backend_times_out() -> Result<()> {
    let state = StateBuilder::new("integration-secret")
        .source(Hung)
        .fetch_timeout(StdDuration::from_millis(25))
        .build()?;
    let token = state.tokens.issue(Duration::hours(1))?;
    let router = build_router(state);
    let response = get(&router, &format!("/docs/index.html?token={token}")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn custom_mounts_are_honoured() -> Result<()> {
    let state = StateBuilder::new("integration-secret")
        .source(MemorySource::new().with_file("home.html", "<p>home</p>", None))
        .mounts(Mounts::new("/manuals", "home.html"))
        .frame_options("SAMEORIGIN")
        .build()?;
    let token = state.tokens.issue(Duration::hours(1))?;
    let router = build_router(state);

    let response = get(&router, &format!("/manuals?token={token}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "SAMEORIGIN");
    assert_eq!(body_string(response).await, "<p>home</p>");

    assert_eq!(get(&router, "/docs/home.html").await.status(), StatusCode::NOT_FOUND);
    Ok(())
}
