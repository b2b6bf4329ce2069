//! Locates the candidate access token on an inbound request.
//! Used by: auth::gate.
//!
//! Precedence: `token` query parameter, then `Authorization: Bearer`, then the
//! `access_token` cookie. Empty values are skipped.

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderMap, Uri};

pub const TOKEN_QUERY_PARAM: &str = "token";
pub const TOKEN_COOKIE: &str = "access_token";
const BEARER_PREFIX: &str = "Bearer ";

pub fn extract_credential(uri: &Uri, headers: &HeaderMap) -> Option<String> {
    from_query(uri)
        .or_else(|| from_authorization(headers))
        .or_else(|| from_cookie(headers))
}

fn from_query(uri: &Uri) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn from_authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

fn from_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value.trim_matches('"').to_owned())
        .filter(|value| !value.is_empty())
}
